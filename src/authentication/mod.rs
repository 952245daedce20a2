mod middleware;
mod token;

pub use middleware::{reject_anonymous_users, reject_non_admin_users};
pub use token::{Actor, JwtKeys, Role, TokenError};
