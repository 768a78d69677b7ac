//! Authentication for the marketplace client.
//!
//! The API issues an opaque bearer token on login; this crate keeps it in an
//! explicit [`Session`] value, persists it through a [`TokenStore`] and drops
//! it on logout or expiry.

mod credentials;
mod error;
mod session;
mod store;
mod token;
mod user;

pub use credentials::{Credentials, LoginResponse};
pub use error::AuthError;
pub use session::{Session, SessionState};
pub use store::{MemoryTokenStore, StoredSession, TokenStore};
pub use token::{AuthToken, TokenClaims};
pub use user::{Role, User};
