mod posts;
mod routes;

pub use posts::*;
pub use routes::*;
