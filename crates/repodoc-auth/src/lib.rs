//! Authentication for repodoc.
//!
//! Two halves, matching the two trust boundaries of the gateway:
//!
//! - [`oauth`] — GitHub authorization-code flow: authorize URL construction
//!   and the server-to-server code-for-credential exchange
//! - [`session`] — stateless signed session tokens minted after a
//!   successful exchange and verified on every protected request

pub mod error;
pub mod oauth;
pub mod session;

pub use error::{AuthError, Result};
pub use oauth::{OAuthConfig, build_authorization_url, exchange_code};
pub use session::{SessionClaims, mint_session_token, verify_session_token};
