//! The pokemon resource repository.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, instrument, warn};

use pokedex_core::error::StoreError;
use pokedex_core::{CommitOutcome, Entry, Key, KeyPart, KvStore, KvValue, PokemonId, Record};

use super::{IdAllocator, RepoError, RepoResult};

/// Collection name used when none is configured.
pub const DEFAULT_COLLECTION: &str = "pokemons";

/// CRUD operations over one collection of records.
///
/// Records live under `<collection>/<id>` and the collection's counter under
/// `counter/<collection>`. The repository holds no state besides the store
/// handle; every call goes straight to the store.
#[derive(Clone)]
pub struct PokemonRepository {
    store: Arc<dyn KvStore>,
    collection: String,
    allocator: IdAllocator,
}

impl std::fmt::Debug for PokemonRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokemonRepository")
            .field("collection", &self.collection)
            .field("allocator", &self.allocator)
            .finish()
    }
}

impl PokemonRepository {
    /// Create a repository over the default `pokemons` collection.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    /// Create a repository over a named collection.
    pub fn with_collection(store: Arc<dyn KvStore>, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let allocator = IdAllocator::new(Arc::clone(&store), &collection);
        Self {
            store,
            collection,
            allocator,
        }
    }

    /// The collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The canonical API path of a record.
    pub fn resource_path(&self, id: PokemonId) -> String {
        format!("/api/{}/{}", self.collection, id)
    }

    /// Parse a path segment into an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::InvalidIdentifier`] for anything that is not a
    /// non-negative integer.
    pub fn parse_id(value: &str) -> RepoResult<PokemonId> {
        PokemonId::parse(value).map_err(|_| RepoError::InvalidIdentifier {
            value: value.to_string(),
        })
    }

    fn prefix(&self) -> Key {
        Key::new([self.collection.as_str().into()])
    }

    fn record_key(&self, id: PokemonId) -> Key {
        // Parsed ids are bounded by i64::MAX and allocation never gets near it.
        let part = i64::try_from(id.get()).unwrap_or(i64::MAX);
        self.prefix().child(KeyPart::Int(part))
    }

    fn decode(entry: Entry) -> RepoResult<Record> {
        let key = entry.key.to_string();
        let corrupt = |message: String| RepoError::Store(StoreError::Corrupt { message }.into());

        let value = entry
            .value
            .into_json()
            .ok_or_else(|| corrupt(format!("{} does not hold a record", key)))?;

        Record::new(value).map_err(|e| corrupt(format!("{}: {}", key, e)))
    }

    /// Create a record from client fields.
    ///
    /// Any client-supplied `id` or `createdAt` is replaced by the allocated
    /// identifier and the current time.
    #[instrument(skip(self, fields), fields(collection = %self.collection))]
    pub async fn create(&self, fields: Record) -> RepoResult<Record> {
        let id = self.allocator.next().await?;

        let mut record = fields;
        record.set_id(id);
        record.set_created_at(now_iso8601());

        self.store
            .set(self.record_key(id), KvValue::Json(record.clone().into_value()))
            .await?;

        info!(%id, "Created pokemon");

        Ok(record)
    }

    /// Fetch one record by point lookup.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get_one(&self, id: PokemonId) -> RepoResult<Record> {
        match self.store.get(&self.record_key(id)).await? {
            Some(entry) => Self::decode(entry),
            None => {
                debug!(%id, "Pokemon not found");
                Err(RepoError::NotFound { id })
            }
        }
    }

    /// Fetch every record in ascending id order.
    ///
    /// An empty collection is reported as [`RepoError::EmptyCollection`]
    /// rather than an empty list.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get_all(&self) -> RepoResult<Vec<Record>> {
        let entries = self.store.list(&self.prefix()).await?;

        if entries.is_empty() {
            return Err(RepoError::EmptyCollection {
                collection: self.collection.clone(),
            });
        }

        entries.into_iter().map(Self::decode).collect()
    }

    /// Replace a record.
    ///
    /// The payload's `id` must equal `id`. The stored `createdAt` is carried
    /// over; every other field is replaced by the payload. The write is
    /// conditional on the record being unchanged since it was looked up.
    #[instrument(skip(self, payload), fields(collection = %self.collection))]
    pub async fn update(&self, id: PokemonId, payload: Record) -> RepoResult<()> {
        let key = self.record_key(id);

        let existing = self
            .store
            .get(&key)
            .await?
            .ok_or(RepoError::NotFound { id })?;

        if payload.id() != Some(id) {
            let found = payload
                .get(pokedex_core::record::ID_FIELD)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string());
            warn!(%id, %found, "Rejected update with mismatched id");
            return Err(RepoError::IdentityMismatch { id, found });
        }

        let versionstamp = existing.versionstamp;
        let stored = Self::decode(existing)?;

        let mut record = payload;
        if let Some(created_at) = stored.created_at() {
            record.set_created_at(created_at);
        }

        let op = self
            .store
            .atomic()
            .check(key.clone(), Some(versionstamp))
            .set(key, KvValue::Json(record.into_value()));

        match self.store.commit(op).await? {
            CommitOutcome::Committed(_) => {
                info!(%id, "Updated pokemon");
                Ok(())
            }
            CommitOutcome::CheckFailed => {
                warn!(%id, "Update lost a race with another writer");
                Err(RepoError::Conflict { id })
            }
        }
    }

    /// Delete one record.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn delete_one(&self, id: PokemonId) -> RepoResult<()> {
        let key = self.record_key(id);

        if self.store.get(&key).await?.is_none() {
            debug!(%id, "Pokemon not found");
            return Err(RepoError::NotFound { id });
        }

        self.store.delete(&key).await?;

        info!(%id, "Deleted pokemon");

        Ok(())
    }

    /// Delete every record in one atomic commit, then reset the counter.
    ///
    /// Records created after the listing snapshot are not included. On any
    /// failure nothing is deleted and the counter is left untouched.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn delete_all(&self) -> RepoResult<()> {
        let entries = self
            .store
            .list(&self.prefix())
            .await
            .map_err(|e| RepoError::AtomicFailure {
                reason: e.to_string(),
            })?;

        let count = entries.len();
        let op = entries
            .into_iter()
            .fold(self.store.atomic(), |op, entry| op.delete(entry.key));

        match self.store.commit(op).await {
            Ok(CommitOutcome::Committed(_)) => {}
            Ok(CommitOutcome::CheckFailed) => {
                return Err(RepoError::AtomicFailure {
                    reason: "commit rejected by the store".to_string(),
                });
            }
            Err(e) => {
                warn!(error = %e, "Bulk delete failed");
                return Err(RepoError::AtomicFailure {
                    reason: e.to_string(),
                });
            }
        }

        self.store.delete(self.allocator.key()).await?;

        info!(count, "Deleted all pokemons and reset the counter");

        Ok(())
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
