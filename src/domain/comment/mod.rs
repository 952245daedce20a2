mod comment_content;
mod new_comment;
mod thread;
mod types;

pub use comment_content::CommentContent;
pub use new_comment::{CreateCommentPayload, NewComment};
pub use thread::{MAX_REPLY_DEPTH, build_comment_tree};
pub use types::{CommentNode, CommentRecord};
