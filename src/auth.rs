//! Auth-domain models: OAuth scopes, access tokens, and the per-user request session.

pub mod scope;
pub mod session;
pub mod token;

pub use scope::*;
pub use session::*;
pub use token::*;
