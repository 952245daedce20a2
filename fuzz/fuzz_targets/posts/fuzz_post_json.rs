// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_post_json
// Purpose: fuzz create/update post JSON -> title, slug, tags and cover url parsing
#![no_main]

use blogpress::domain::{CreatePostPayload, NewPost, PostChanges, UpdatePostPayload};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CreatePostPayload>(data) {
        let _ = NewPost::try_from(payload);
    }
    if let Ok(payload) = serde_json::from_slice::<UpdatePostPayload>(data) {
        let _ = PostChanges::try_from(payload);
    }
});
