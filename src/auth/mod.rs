pub mod handlers;
pub mod middleware;

pub use middleware::{current_user, require_admin, require_auth, TokenClaims};
