//! Search tree: per-node statistics plus the expansion record.
//!
//! The tree is keyed by node value rather than by arena index, so positions
//! that compare equal share one entry however they were reached. Lookups
//! never insert: asking for the statistics of an unseen node returns the
//! zero defaults and leaves the maps untouched.

use std::collections::{HashMap, HashSet};

use engine_core::{complement, Node};

use crate::node::NodeStats;

/// MCTS tree with hash-map storage keyed by node.
#[derive(Debug, Clone)]
pub struct SearchTree<N: Node> {
    /// Visit count N and accumulated reward Q of every visited node
    stats: HashMap<N, NodeStats>,

    /// Child list of every expanded node. A present key with an empty list
    /// marks an expanded terminal node.
    children: HashMap<N, Vec<N>>,
}

impl<N: Node> Default for SearchTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> SearchTree<N> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            stats: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// Statistics of a node, zero if it was never visited.
    #[inline]
    pub fn get(&self, node: &N) -> NodeStats {
        self.stats.get(node).copied().unwrap_or_default()
    }

    /// Visit count N of a node (0 if unseen).
    #[inline]
    pub fn visits(&self, node: &N) -> u32 {
        self.get(node).visits
    }

    /// Accumulated reward Q of a node (0.0 if unseen).
    #[inline]
    pub fn total_reward(&self, node: &N) -> f64 {
        self.get(node).total_reward
    }

    /// Whether the node's child set has been recorded.
    #[inline]
    pub fn is_expanded(&self, node: &N) -> bool {
        self.children.contains_key(node)
    }

    /// Recorded children of an expanded node, `None` if not expanded.
    #[inline]
    pub fn children(&self, node: &N) -> Option<&[N]> {
        self.children.get(node).map(Vec::as_slice)
    }

    /// First child of an expanded node that has not been expanded itself.
    pub fn unexplored_child(&self, node: &N) -> Option<&N> {
        self.children
            .get(node)?
            .iter()
            .find(|child| !self.children.contains_key(*child))
    }

    /// Record the child set of a node.
    ///
    /// Duplicate children are dropped, keeping the first occurrence so the
    /// recorded order follows `children()`. Returns `false` and leaves the tree
    /// unchanged if the node was already expanded.
    pub fn expand(&mut self, node: N, children: Vec<N>) -> bool {
        if self.children.contains_key(&node) {
            return false;
        }

        let first_seen: Vec<bool> = {
            let mut seen = HashSet::with_capacity(children.len());
            children.iter().map(|child| seen.insert(child)).collect()
        };
        let unique = children
            .into_iter()
            .zip(first_seen)
            .filter_map(|(child, first)| first.then_some(child))
            .collect();

        self.children.insert(node, unique);
        true
    }

    /// Drop an expansion that never received a visit.
    pub(crate) fn forget_expansion(&mut self, node: &N) {
        self.children.remove(node);
    }

    /// Select the child of `node` with the highest UCT score.
    ///
    /// Every child must already be expanded (and therefore visited), and the
    /// node itself must have at least one visit. Ties go to the first maximal
    /// child in recorded order. Returns `None` for unexpanded or childless
    /// nodes.
    pub fn select_uct(&self, node: &N, exploration_weight: f64) -> Option<&N> {
        let children = self.children.get(node)?;
        debug_assert!(
            children
                .iter()
                .all(|child| self.children.contains_key(child)),
            "UCT selection on a node with unexpanded children"
        );

        let parent_visits = self.visits(node);
        debug_assert!(parent_visits > 0, "UCT selection on an unvisited node");

        // Pre-compute ln once instead of per-child comparison
        let ln_parent_visits = (parent_visits as f64).ln();

        first_max_by(children, |child| {
            self.get(child)
                .uct_score(ln_parent_visits, exploration_weight)
        })
    }

    /// Child of `node` with the highest average reward; unvisited children
    /// are never preferred over visited ones. Ties go to the first maximal
    /// child in recorded order.
    pub fn best_child(&self, node: &N) -> Option<&N> {
        let children = self.children.get(node)?;
        first_max_by(children, |child| self.get(child).choice_score())
    }

    /// Backpropagate a reward from the last node of `path` to the first.
    /// The reward is complemented at each level (opponent's perspective).
    pub fn backpropagate(&mut self, path: &[N], reward: f64) {
        let mut current = reward;

        for node in path.iter().rev() {
            self.stats.entry(node.clone()).or_default().record(current);
            current = complement(current);
        }
    }

    /// Per-child statistics of an expanded node, in recorded order.
    pub fn child_stats(&self, node: &N) -> Vec<ChildStats<N>> {
        self.children(node)
            .unwrap_or_default()
            .iter()
            .map(|child| {
                let stats = self.get(child);
                ChildStats {
                    node: child.clone(),
                    visits: stats.visits,
                    total_reward: stats.total_reward,
                }
            })
            .collect()
    }

    /// Visit distribution over the children of `node`.
    /// Returns (child, visit_fraction) pairs, empty if no child was visited.
    pub fn visit_distribution(&self, node: &N) -> Vec<(N, f64)> {
        let children = self.children(node).unwrap_or_default();
        let total_visits: u64 = children.iter().map(|c| self.visits(c) as u64).sum();

        if total_visits == 0 {
            return Vec::new();
        }

        children
            .iter()
            .map(|child| {
                (
                    child.clone(),
                    self.visits(child) as f64 / total_visits as f64,
                )
            })
            .collect()
    }

    /// Number of distinct nodes holding statistics or an expansion.
    pub fn len(&self) -> usize {
        self.stats.len()
            + self
                .children
                .keys()
                .filter(|node| !self.stats.contains_key(*node))
                .count()
    }

    /// Check if the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.children.is_empty()
    }

    /// Number of expanded nodes.
    pub fn expanded_len(&self) -> usize {
        self.children.len()
    }

    /// Discard all statistics and expansions.
    pub fn clear(&mut self) {
        self.stats.clear();
        self.children.clear();
    }

    /// Get statistics about the tree below `root` for debugging.
    pub fn stats(&self, root: &N) -> TreeStats {
        let root_stats = self.get(root);
        TreeStats {
            total_nodes: self.len(),
            expanded_nodes: self.expanded_len(),
            root_visits: root_stats.visits,
            root_value: root_stats.mean_value(),
            max_depth: self.max_depth(root),
        }
    }

    /// Length of the longest chain of recorded expansions starting at `root`.
    ///
    /// Positions are shared between paths, so results are memoized; an edge
    /// back into the current chain (a repeated position) ends that chain.
    pub fn max_depth(&self, root: &N) -> u32 {
        let mut on_path = HashSet::new();
        let mut memo = HashMap::new();
        self.depth_below(root, &mut on_path, &mut memo)
    }

    fn depth_below(&self, node: &N, on_path: &mut HashSet<N>, memo: &mut HashMap<N, u32>) -> u32 {
        if let Some(&depth) = memo.get(node) {
            return depth;
        }
        let children = match self.children.get(node) {
            Some(children) if !children.is_empty() => children,
            _ => return 0,
        };

        on_path.insert(node.clone());
        let mut deepest = 0;
        for child in children {
            if on_path.contains(child) {
                continue;
            }
            deepest = deepest.max(1 + self.depth_below(child, on_path, memo));
        }
        on_path.remove(node);

        memo.insert(node.clone(), deepest);
        deepest
    }
}

/// Return the first element with the maximal score.
fn first_max_by<T>(items: &[T], score: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let s = score(item);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((item, s));
        }
    }
    best.map(|(item, _)| item)
}

/// Statistics of one child, as reported by [`SearchTree::child_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<N> {
    pub node: N,
    pub visits: u32,
    pub total_reward: f64,
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub expanded_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::NodeError;

    /// Bare positions identified by a number; the tree never calls the game
    /// methods, so they are inert.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct P(u32);

    impl Node for P {
        fn children(&self) -> Vec<Self> {
            Vec::new()
        }

        fn is_terminal(&self) -> bool {
            true
        }

        fn reward(&self) -> Result<f64, NodeError> {
            Ok(0.5)
        }
    }

    fn set_stats(tree: &mut SearchTree<P>, node: u32, visits: u32, total_reward: f64) {
        tree.stats
            .insert(P(node), NodeStats::new(visits, total_reward));
    }

    #[test]
    fn test_new_tree() {
        let tree: SearchTree<P> = SearchTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.visits(&P(0)), 0);
        assert!(tree.total_reward(&P(0)).abs() < 1e-12);
        assert!(!tree.is_expanded(&P(0)));
    }

    #[test]
    fn test_lookup_does_not_insert() {
        let tree: SearchTree<P> = SearchTree::new();

        let _ = tree.get(&P(3));
        let _ = tree.children(&P(3));
        let _ = tree.best_child(&P(3));

        assert!(tree.is_empty());
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut tree = SearchTree::new();

        assert!(tree.expand(P(0), vec![P(1), P(2)]));
        assert!(!tree.expand(P(0), vec![P(7)]));

        assert_eq!(tree.children(&P(0)), Some(&[P(1), P(2)][..]));
        assert_eq!(tree.expanded_len(), 1);
    }

    #[test]
    fn test_expand_drops_duplicates_in_order() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(2), P(1), P(2), P(3), P(1)]);

        assert_eq!(tree.children(&P(0)), Some(&[P(2), P(1), P(3)][..]));
    }

    #[test]
    fn test_expand_wide_node_with_repeats() {
        let mut tree = SearchTree::new();
        let width = 20_000;
        let children: Vec<P> = (1..=width).rev().chain(1..=width).map(P).collect();

        assert!(tree.expand(P(0), children));

        let recorded = tree.children(&P(0)).unwrap();
        assert_eq!(recorded.len(), width as usize);
        assert_eq!(recorded.first(), Some(&P(width)));
        assert_eq!(recorded.last(), Some(&P(1)));
    }

    #[test]
    fn test_expanded_without_children_is_distinct_from_unexpanded() {
        let mut tree = SearchTree::new();
        tree.expand(P(9), Vec::new());

        assert!(tree.is_expanded(&P(9)));
        assert_eq!(tree.children(&P(9)), Some(&[][..]));
        assert_eq!(tree.children(&P(8)), None);
        assert_eq!(tree.unexplored_child(&P(9)), None);
    }

    #[test]
    fn test_unexplored_child() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2), P(3)]);
        assert_eq!(tree.unexplored_child(&P(0)), Some(&P(1)));

        tree.expand(P(1), Vec::new());
        assert_eq!(tree.unexplored_child(&P(0)), Some(&P(2)));

        tree.expand(P(2), Vec::new());
        tree.expand(P(3), Vec::new());
        assert_eq!(tree.unexplored_child(&P(0)), None);
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = SearchTree::new();

        // Chain: root -> child -> grandchild, rollout reward 1.0 at the leaf
        tree.backpropagate(&[P(0), P(1), P(2)], 1.0);

        // Check visits
        assert_eq!(tree.visits(&P(2)), 1);
        assert_eq!(tree.visits(&P(1)), 1);
        assert_eq!(tree.visits(&P(0)), 1);

        // Check rewards (complemented at each level)
        assert!((tree.total_reward(&P(2)) - 1.0).abs() < 1e-12);
        assert!(tree.total_reward(&P(1)).abs() < 1e-12);
        assert!((tree.total_reward(&P(0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_backpropagate_accumulates() {
        let mut tree = SearchTree::new();
        tree.backpropagate(&[P(0), P(1)], 0.25);
        tree.backpropagate(&[P(0), P(1)], 0.5);

        assert_eq!(tree.visits(&P(1)), 2);
        assert!((tree.total_reward(&P(1)) - 0.75).abs() < 1e-12);
        assert!((tree.total_reward(&P(0)) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_select_uct_hand_computed() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2)]);
        tree.expand(P(1), Vec::new());
        tree.expand(P(2), Vec::new());

        set_stats(&mut tree, 0, 5, 2.0);
        set_stats(&mut tree, 1, 2, 1.0); // UCT = 1.397061
        set_stats(&mut tree, 2, 3, 2.5); // UCT = 1.565781

        assert_eq!(tree.select_uct(&P(0), 1.0), Some(&P(2)));
    }

    #[test]
    fn test_select_uct_exploration_weight_changes_choice() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2)]);
        tree.expand(P(1), Vec::new());
        tree.expand(P(2), Vec::new());

        set_stats(&mut tree, 0, 101, 50.0);
        set_stats(&mut tree, 1, 1, 0.0); // rarely tried, looks bad
        set_stats(&mut tree, 2, 100, 60.0); // well explored, looks good

        // Pure exploitation prefers the better average
        assert_eq!(tree.select_uct(&P(0), 0.0), Some(&P(2)));
        // Heavy exploration prefers the under-visited child
        assert_eq!(tree.select_uct(&P(0), 2.0), Some(&P(1)));
    }

    #[test]
    fn test_select_uct_ties_pick_first() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(3), P(1), P(2)]);
        for id in 1..=3 {
            tree.expand(P(id), Vec::new());
            set_stats(&mut tree, id, 2, 1.0);
        }
        set_stats(&mut tree, 0, 6, 3.0);

        assert_eq!(tree.select_uct(&P(0), 1.0), Some(&P(3)));
    }

    #[test]
    fn test_best_child_ignores_unvisited() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2)]);
        set_stats(&mut tree, 2, 4, 0.0); // visited, always lost

        // Unvisited child scores -inf, so even a losing visited child wins
        assert_eq!(tree.best_child(&P(0)), Some(&P(2)));
    }

    #[test]
    fn test_best_child_by_average() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2), P(3)]);
        set_stats(&mut tree, 1, 10, 4.0);
        set_stats(&mut tree, 2, 2, 1.8);
        set_stats(&mut tree, 3, 50, 30.0);

        assert_eq!(tree.best_child(&P(0)), Some(&P(2)));
        assert_eq!(tree.best_child(&P(4)), None);
    }

    #[test]
    fn test_child_stats_and_distribution() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2)]);
        set_stats(&mut tree, 1, 30, 12.0);
        set_stats(&mut tree, 2, 70, 35.0);

        let stats = tree.child_stats(&P(0));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].node, P(1));
        assert_eq!(stats[0].visits, 30);
        assert!((stats[1].total_reward - 35.0).abs() < 1e-12);

        let dist = tree.visit_distribution(&P(0));
        assert!((dist[0].1 - 0.3).abs() < 1e-12);
        assert!((dist[1].1 - 0.7).abs() < 1e-12);

        assert!(tree.visit_distribution(&P(1)).is_empty());
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1), P(2)]);
        tree.expand(P(1), vec![P(3)]);
        tree.expand(P(3), Vec::new());
        tree.backpropagate(&[P(0), P(1), P(3)], 0.0);
        tree.backpropagate(&[P(0), P(2)], 1.0);

        let stats = tree.stats(&P(0));
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.expanded_nodes, 3);
        assert_eq!(stats.root_visits, 2);
        // Odd-length path: root gets the leaf reward 0.0.
        // Even-length path: root gets complement(1.0) = 0.0.
        assert!(stats.root_value.abs() < 1e-12);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_max_depth_survives_cycles() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1)]);
        tree.expand(P(1), vec![P(0), P(2)]);
        tree.expand(P(2), Vec::new());

        assert_eq!(tree.max_depth(&P(0)), 2);
    }

    #[test]
    fn test_clear() {
        let mut tree = SearchTree::new();
        tree.expand(P(0), vec![P(1)]);
        tree.backpropagate(&[P(0), P(1)], 1.0);
        assert!(!tree.is_empty());

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.visits(&P(0)), 0);
    }
}
