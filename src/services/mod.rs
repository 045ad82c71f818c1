// Service exports
pub mod auth;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{verify_credentials, AuthError, TokenIssuer};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{IdentityStore, MatchStore, PreferenceStore, StoreError};
