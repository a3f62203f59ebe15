//! Core value types.
//!
//! These types enforce their invariants at construction time,
//! so an identifier or store URL that exists is always well-formed.

mod key;
mod pokemon_id;
mod store_url;

pub use key::{Key, KeyPart};
pub use pokemon_id::PokemonId;
pub use store_url::StoreUrl;
