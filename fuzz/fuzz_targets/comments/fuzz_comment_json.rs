// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_comment_json
// Purpose: fuzz CreateCommentPayload JSON -> NewComment (uuid and parentComment parsing)
#![no_main]

use blogpress::domain::{CreateCommentPayload, NewComment};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CreateCommentPayload>(data) {
        let _ = NewComment::try_from(payload);
    }
});
