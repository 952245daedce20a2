mod comment;
mod post;
mod summary;

pub use comment::*;
pub use post::*;
pub use summary::*;
