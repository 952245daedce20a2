// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_comment_tree
// Purpose: arbitrary parent links -> build_comment_tree never duplicates or misplaces a comment
#![no_main]

use arbitrary::Arbitrary;
use blogpress::domain::{CommentNode, CommentRecord, MAX_REPLY_DEPTH, build_comment_tree};
use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use uuid::Uuid;

/// Ids come from a small pool so duplicates, cycles and orphans are common.
#[derive(Arbitrary, Debug)]
struct Entry {
    id: u8,
    parent: Option<u8>,
}

fn id(n: u8) -> Uuid {
    Uuid::from_u128(u128::from(n % 32) + 1)
}

fn count(nodes: &[CommentNode], depth: usize, seen: &mut HashSet<Uuid>) {
    assert!(nodes.is_empty() || depth <= MAX_REPLY_DEPTH, "thread nested past the cap");
    for node in nodes {
        assert!(seen.insert(node.id), "comment rendered twice");
        let siblings: HashSet<Uuid> = node.replies.iter().map(|r| r.id).collect();
        for reply in &node.replies {
            // Only the last level holds replies moved up from below it
            match reply.parent_comment {
                Some(parent) if parent == node.id => {}
                Some(parent) if depth + 1 == MAX_REPLY_DEPTH && siblings.contains(&parent) => {}
                other => panic!("reply misplaced under {:?}: {other:?}", node.id),
            }
        }
        count(&node.replies, depth + 1, seen);
    }
}

fuzz_target!(|entries: Vec<Entry>| {
    let records: Vec<CommentRecord> = entries
        .iter()
        .map(|e| CommentRecord {
            id: id(e.id),
            post_id: Uuid::nil(),
            post_title: "post".into(),
            post_cover_image_url: None,
            author_id: Uuid::nil(),
            author_name: "author".into(),
            author_profile_image_url: None,
            content: "text".into(),
            parent_id: e.parent.map(id),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        })
        .collect();

    let roots = build_comment_tree(records);

    let mut seen = HashSet::new();
    count(&roots, 0, &mut seen);
    assert!(roots.iter().all(|r| r.parent_comment.is_none()));
});
