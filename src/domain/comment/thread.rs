use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{CommentNode, CommentRecord};

/// Deepest level of replies kept in a thread. A reply further down is moved
/// up to this level, next to the reply it answers.
pub const MAX_REPLY_DEPTH: usize = 16;

/// Reassembles flat comment records into display threads.
///
/// `records` must already be in ascending creation order; no sorting happens
/// here. Top-level comments keep their relative input order, and so do the
/// replies under each parent.
///
/// Every record is indexed as a potential parent, so a reply to a reply is
/// attached under the reply it answers, down to [`MAX_REPLY_DEPTH`] levels.
/// How many of those levels get shown is up to the renderer.
///
/// A reply whose parent is not in `records` (deleted, or from another post)
/// is left out, together with anything hanging below it. Nothing is ever
/// duplicated: each record ends up in at most one place.
pub fn build_comment_tree(records: Vec<CommentRecord>) -> Vec<CommentNode> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        index.entry(record.id).or_insert(position);
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (position, record) in records.iter().enumerate() {
        // Repeated ids: only the first copy is placed
        if index.get(&record.id) != Some(&position) {
            continue;
        }
        match record.parent_id {
            None => roots.push(position),
            Some(parent_id) => match index.get(&parent_id) {
                Some(&parent) => children[parent].push(position),
                None => log_orphan(record.id, parent_id),
            },
        }
    }

    let replies = cap_depth(&roots, &children);

    let mut slots: Vec<Option<CommentNode>> = records
        .into_iter()
        .map(|record| Some(CommentNode::from(record)))
        .collect();

    roots
        .into_iter()
        .filter_map(|root| assemble(root, &replies, &mut slots))
        .collect()
}

/// Walks down from the roots and decides where each reachable reply hangs.
/// Anything below `MAX_REPLY_DEPTH` joins the replies of the comment at the
/// level above. Each list comes back in input order.
fn cap_depth(roots: &[usize], children: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut replies: Vec<Vec<usize>> = vec![Vec::new(); children.len()];
    // (position, depth, comment it hangs under)
    let mut pending: Vec<(usize, usize, Option<usize>)> =
        roots.iter().map(|&root| (root, 0, None)).collect();

    while let Some((position, depth, host)) = pending.pop() {
        for &child in &children[position] {
            if depth < MAX_REPLY_DEPTH {
                replies[position].push(child);
                pending.push((child, depth + 1, Some(position)));
            } else if let Some(host) = host {
                replies[host].push(child);
                pending.push((child, depth, Some(host)));
            }
        }
    }

    for list in &mut replies {
        list.sort_unstable();
    }
    replies
}

/// Builds the subtree under `root` without recursion.
fn assemble(
    root: usize,
    replies: &[Vec<usize>],
    slots: &mut [Option<CommentNode>],
) -> Option<CommentNode> {
    // (position, replies already assembled)
    let mut stack = vec![(root, false)];

    while let Some((position, expanded)) = stack.pop() {
        if expanded {
            let nodes: Vec<CommentNode> = replies[position]
                .iter()
                .filter_map(|&child| slots[child].take())
                .collect();
            if let Some(node) = slots[position].as_mut() {
                node.replies = nodes;
            }
        } else {
            stack.push((position, true));
            stack.extend(replies[position].iter().rev().map(|&child| (child, false)));
        }
    }

    slots[root].take()
}

fn log_orphan(comment_id: Uuid, parent_id: Uuid) {
    tracing::debug!(
        comment_id = %comment_id,
        parent_id = %parent_id,
        "Leaving reply out of thread: parent not found"
    );
}
