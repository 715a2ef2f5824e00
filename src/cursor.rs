use core::iter::FusedIterator;
use log::{debug, trace};
use crate::error::Error;
use crate::node::NodeId;
use crate::tree::BinaryTree;




/**
 * Traversal progress of an `InOrderCursor`.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Freshly constructed or reset; the minimum has not been reported yet.
    NotStarted,
    /// The last call to `move_next` returned true.
    Positioned,
    /// Every node has been reported.
    Exhausted,
}




/**
 * A restartable in-order cursor over a `BinaryTree`. The cursor uses only the
 * tree's child and parent links to find each successor, so it allocates
 * nothing, and a full traversal of an n-node tree follows at most 2(n - 1)
 * links.
 *
 * Drive it with `move_next` and `value`, or use it as an `Iterator`.
 */
pub struct InOrderCursor<'a, T> {
    tree: &'a BinaryTree<T>,
    current: Option<NodeId>,
    started: bool,
    links: usize,
}




// ============================================================================
impl<'a, T> InOrderCursor<'a, T> {




    /**
     * Create a cursor over the given tree, positioned at (but not yet
     * reporting) the in-order minimum.
     */
    pub fn new(tree: &'a BinaryTree<T>) -> Self {
        let mut cursor = Self { tree, current: None, started: false, links: 0 };
        cursor.rewind();
        debug!("in-order cursor over {} nodes starts at {:?}", tree.len(), cursor.current);
        cursor
    }




    /**
     * Return the cursor to its freshly constructed state. This may be called
     * at any point, including after the cursor is exhausted.
     */
    pub fn reset(&mut self) {
        self.rewind();
        debug!("in-order cursor reset to {:?}", self.current);
    }




    /**
     * Advance to the in-order successor and return whether there is one. The
     * first call after construction or `reset` reports the minimum without
     * moving.
     */
    pub fn move_next(&mut self) -> bool {
        let id = match self.current {
            Some(id) => id,
            None => return false,
        };

        if !self.started {
            self.started = true;
            return true;
        }

        self.current = match self.tree.node(id).r {
            Some(r) => {
                self.links += 1;
                Some(self.descend_left(r))
            }
            None => self.ascend(id),
        };
        trace!("in-order successor of {} is {:?}", id, self.current);
        self.current.is_some()
    }




    /**
     * Return the value of the node the cursor is positioned at. Fails with
     * `Error::InvalidState` before the first successful `move_next`, and
     * after the cursor is exhausted.
     */
    pub fn value(&self) -> Result<&'a T, Error> {
        let tree = self.tree;

        match (self.state(), self.current) {
            (CursorState::Positioned, Some(id)) => Ok(tree.node(id).value()),
            (state, _) => Err(Error::InvalidState(state)),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        match self.state() {
            CursorState::Positioned => self.current,
            _ => None,
        }
    }

    pub fn state(&self) -> CursorState {
        match (self.current, self.started) {
            (None, _) => CursorState::Exhausted,
            (Some(_), false) => CursorState::NotStarted,
            (Some(_), true) => CursorState::Positioned,
        }
    }




    /**
     * Return the number of tree links followed since construction or the last
     * reset.
     */
    pub fn links_followed(&self) -> usize {
        self.links
    }




    // ========================================================================
    fn rewind(&mut self) {
        self.links = 0;
        self.started = false;
        self.current = match self.tree.root() {
            Some(root) => Some(self.descend_left(root)),
            None => None,
        };
    }

    fn descend_left(&mut self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.tree.node(id).l {
            self.links += 1;
            id = l;
        }
        id
    }

    fn ascend(&mut self, mut id: NodeId) -> Option<NodeId> {
        let mut p = self.tree.node(id).p;

        while let Some(parent) = p {
            self.links += 1;

            if self.tree.node(parent).r != Some(id) {
                break
            }
            id = parent;
            p = self.tree.node(parent).p;
        }
        p
    }
}




// ============================================================================
impl<'a, T> Iterator for InOrderCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.value().ok()
        } else {
            None
        }
    }
}

impl<'a, T> FusedIterator for InOrderCursor<'a, T> {}




// ============================================================================
#[cfg(test)]
mod test {

    use rayon::prelude::*;
    use crate::error::Error;
    use crate::tree::{BinaryTree, TreeBuilder, stupid_random_tree};
    use super::{CursorState, InOrderCursor};

    fn drain(cursor: &mut InOrderCursor<i32>) -> Vec<i32> {
        let mut values = Vec::new();
        while cursor.move_next() {
            values.push(*cursor.value().unwrap());
        }
        values
    }

    fn one_two_three() -> BinaryTree<i32> {
        let mut builder = TreeBuilder::new();
        let l = builder.leaf(2);
        let r = builder.leaf(3);
        let root = builder.node(1, l, r).unwrap();
        builder.finish(root).unwrap()
    }

    fn ten_to_fifty() -> BinaryTree<i32> {
        let mut builder = TreeBuilder::new();
        let n20 = builder.leaf(20);
        let n10 = builder.branch(10, None, Some(n20)).unwrap();
        let n40 = builder.leaf(40);
        let n50 = builder.branch(50, Some(n40), None).unwrap();
        let n30 = builder.node(30, n10, n50).unwrap();
        builder.finish(n30).unwrap()
    }

    fn left_chain(len: usize) -> BinaryTree<i32> {
        let mut builder = TreeBuilder::new();
        let mut top = builder.leaf(0);
        for n in 1..len {
            top = builder.branch(n as i32, Some(top), None).unwrap();
        }
        builder.finish(top).unwrap()
    }

    fn right_chain(len: usize) -> BinaryTree<i32> {
        let mut builder = TreeBuilder::new();
        let mut top = builder.leaf(len as i32 - 1);
        for n in (0..len - 1).rev() {
            top = builder.branch(n as i32, None, Some(top)).unwrap();
        }
        builder.finish(top).unwrap()
    }

    #[test]
    fn three_node_tree_is_visited_left_root_right() {
        let tree = one_two_three();
        assert_eq!(drain(&mut tree.in_order()), vec![2, 1, 3]);
    }

    #[test]
    fn single_node_tree_yields_once_then_never_again() {
        let mut builder = TreeBuilder::new();
        let root = builder.leaf(5);
        let tree = builder.finish(root).unwrap();
        let mut cursor = tree.in_order();

        assert!(cursor.move_next());
        assert_eq!(cursor.value(), Ok(&5));
        for _ in 0..10 {
            assert!(!cursor.move_next());
            assert_eq!(cursor.state(), CursorState::Exhausted);
        }
    }

    #[test]
    fn five_node_tree_is_visited_in_order() {
        let tree = ten_to_fifty();
        assert_eq!(drain(&mut tree.in_order()), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn cursor_starts_at_the_minimum_without_reporting_it() {
        let tree = ten_to_fifty();
        let mut cursor = tree.in_order();

        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert_eq!(cursor.value(), Err(Error::InvalidState(CursorState::NotStarted)));
        assert_eq!(cursor.current(), None);

        assert!(cursor.move_next());
        assert_eq!(cursor.state(), CursorState::Positioned);
        assert_eq!(cursor.value(), Ok(&10));
        assert_eq!(tree.get(cursor.current().unwrap()).unwrap().value(), &10);
    }

    #[test]
    fn value_is_rejected_after_exhaustion() {
        let tree = one_two_three();
        let mut cursor = tree.in_order();
        while cursor.move_next() {}

        assert_eq!(cursor.value(), Err(Error::InvalidState(CursorState::Exhausted)));
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn empty_tree_is_exhausted_immediately() {
        let tree = BinaryTree::<i32>::new();
        let mut cursor = tree.in_order();

        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.move_next());
        assert_eq!(cursor.links_followed(), 0);
        cursor.reset();
        assert!(!cursor.move_next());
    }

    #[test]
    fn traversal_matches_recursive_in_order_for_random_trees() {
        for seed in 0..50 {
            let tree = stupid_random_tree(100 + seed, seed);
            let values = drain(&mut tree.in_order());
            assert_eq!(values, tree.in_order_recursive());
            assert_eq!(values.len(), tree.len());
            assert!(values.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn number_of_successful_advances_equals_number_of_nodes() {
        let tree = stupid_random_tree(777, 3);
        let mut cursor = tree.in_order();
        let mut count = 0;
        while cursor.move_next() {
            count += 1;
        }
        assert_eq!(count, 777);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let tree = stupid_random_tree(64, 9);
        let mut cursor = tree.in_order();
        while cursor.move_next() {}

        let links = cursor.links_followed();
        for _ in 0..5 {
            assert!(!cursor.move_next());
        }
        assert_eq!(cursor.links_followed(), links);
        assert_eq!(cursor.state(), CursorState::Exhausted);
    }

    #[test]
    fn reset_after_exhaustion_replays_the_same_sequence() {
        let tree = stupid_random_tree(300, 17);
        let mut cursor = tree.in_order();
        let first = drain(&mut cursor);
        cursor.reset();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert_eq!(drain(&mut cursor), first);
    }

    #[test]
    fn reset_mid_traversal_replays_the_same_sequence() {
        let tree = ten_to_fifty();
        let mut cursor = tree.in_order();
        cursor.move_next();
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.value(), Ok(&30));

        cursor.reset();
        assert_eq!(drain(&mut cursor), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn reset_before_start_is_harmless() {
        let tree = one_two_three();
        let mut cursor = tree.in_order();
        cursor.reset();
        cursor.reset();
        assert_eq!(drain(&mut cursor), vec![2, 1, 3]);
    }

    #[test]
    fn full_traversal_follows_each_link_at_most_twice() {
        for tree in vec![stupid_random_tree(1000, 1), left_chain(2000), right_chain(2000), BinaryTree::from_in_order((0..1023).collect())] {
            let mut cursor = tree.in_order();
            while cursor.move_next() {}
            assert!(cursor.links_followed() <= 2 * (tree.len() - 1));
        }
    }

    #[test]
    fn deep_chains_are_traversed_without_recursion() {
        assert_eq!(drain(&mut left_chain(2000).in_order()), (0..2000).collect::<Vec<_>>());
        assert_eq!(drain(&mut right_chain(2000).in_order()), (0..2000).collect::<Vec<_>>());
    }

    #[test]
    fn cursor_is_a_fused_iterator() {
        let tree = ten_to_fifty();
        let mut cursor = tree.in_order();
        let values: Vec<_> = cursor.by_ref().copied().collect();
        assert_eq!(values, vec![10, 20, 30, 40, 50]);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn independent_cursors_may_share_a_tree_across_threads() {
        let tree = stupid_random_tree(500, 42);
        let expected: Vec<i32> = (0..500).collect();
        let results: Vec<Vec<i32>> = (0..8)
            .into_par_iter()
            .map(|_| tree.in_order().copied().collect())
            .collect();
        assert!(results.iter().all(|values| values == &expected));
    }
}
