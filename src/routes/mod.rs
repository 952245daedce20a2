mod admin;
mod comments;
mod health_check;
mod posts;

pub use admin::*;
pub use comments::*;
pub use health_check::*;
pub use posts::*;
