mod middleware;
mod password;
mod token;

pub use middleware::{AuthError, OptionalIdentity, RequireAdmin};
pub use password::{hash_password, verify_password};
pub use token::{ADMIN_USERNAME, TokenService};
