//! Flattening of the move tree into display order.
//!
//! Each move is tagged with its ply, the branch point its variation hangs
//! from, and a variation number (0 on the line it was first played on). The
//! list is then reordered so every variation follows the move it replaces.
//!
//! The branch point recorded for a variation is the node whose later child
//! started it, which is not always the move a reader would call the
//! variation's parent once variations nest.

use std::collections::HashSet;

use crate::game_state::chess_rules::ROOT_NODE_NAME;
use crate::move_tree::move_tree::{MoveTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearMove {
    /// Quarter-move index, 1 for the first move.
    pub ply: usize,
    pub token: String,
    /// Ply of the branch point (0 for the root).
    pub root_ply: usize,
    /// Token of the branch point, or the root sentinel.
    pub root_token: String,
    pub variation: usize,
}

/// Extend `previous` with the tree's unseen leaves and re-sort.
pub(crate) fn linearize(tree: &MoveTree, previous: Vec<LinearMove>) -> Vec<LinearMove> {
    let mut moves = previous;
    let known = moves.len();

    collect_leaves(tree, tree.root(), 0, 0, ROOT_NODE_NAME, 0, &mut moves);

    if moves.len() == known {
        return moves;
    }
    sort_variations(moves)
}

fn collect_leaves(
    tree: &MoveTree,
    node: NodeId,
    ply: usize,
    mut root_ply: usize,
    root_token: &str,
    mut variation: usize,
    moves: &mut Vec<LinearMove>,
) {
    let name = tree.name(node);
    let children = tree.children(node);

    if children.is_empty() {
        if tree.is_root(node) {
            return;
        }
        let entry = LinearMove {
            ply,
            token: name.to_owned(),
            root_ply,
            root_token: root_token.to_owned(),
            variation,
        };
        if !moves.contains(&entry) {
            moves.push(entry);
        }
        return;
    }

    let mut root_token: &str = root_token;
    for &child in children {
        collect_leaves(tree, child, ply + 1, root_ply, root_token, variation, moves);
        variation += 1;
        root_token = name;
        root_ply = ply;
    }
}

/// Insert each branch point's variations right after the move that follows
/// it, ordered by (variation, ply), keeping the first copy of every tuple.
fn sort_variations(mut moves: Vec<LinearMove>) -> Vec<LinearMove> {
    let mut previous_group = 0usize;
    let mut i = 0usize;

    while i < moves.len() {
        let anchor = moves[i].token.clone();
        let mut group: Vec<LinearMove> = moves
            .iter()
            .filter(|entry| entry.root_token == anchor)
            .cloned()
            .collect();
        group.sort_by_key(|entry| (entry.variation, entry.ply));

        let shift = if previous_group > 0 { 2 + previous_group } else { 2 };
        let at = (i + shift).min(moves.len());
        previous_group = group.len();
        let tail = moves.split_off(at);
        moves.extend(group);
        moves.extend(tail);
        dedup_keep_first(&mut moves);

        i += 1;
    }

    moves
}

fn dedup_keep_first(moves: &mut Vec<LinearMove>) {
    let mut seen = HashSet::with_capacity(moves.len());
    moves.retain(|entry| seen.insert(entry.clone()));
}
