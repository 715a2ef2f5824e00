use core::iter::FromIterator;
use log::debug;
use crate::cursor::InOrderCursor;
use crate::error::Error;
use crate::node::{Node, NodeId};




/**
 * A nested description of a tree shape. This is the form in which tree shapes
 * are read from (or written to) files; `BinaryTree::from_shape` turns it into
 * a linked tree.
 */
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape<T> {
    Leaf(T),
    Node {
        value: T,
        left: Option<Box<Shape<T>>>,
        right: Option<Box<Shape<T>>>,
    },
}




// ============================================================================
impl<T> Shape<T> {

    pub fn leaf(value: T) -> Self {
        Shape::Leaf(value)
    }

    pub fn node(value: T, left: Shape<T>, right: Shape<T>) -> Self {
        Shape::Node {
            value,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }
}




/**
 * An arena of nodes under construction. Leaves are created first, and
 * internal nodes are then assembled from previously created handles. Each
 * handle can be given a parent exactly once. Call `finish` to obtain an
 * immutable `BinaryTree`.
 */
pub struct TreeBuilder<T> {
    nodes: Vec<Node<T>>,
}




// ============================================================================
impl<T> TreeBuilder<T> {

    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }




    /**
     * Create a node with no children and no parent.
     */
    pub fn leaf(&mut self, value: T) -> NodeId {
        self.push(value, None, None)
    }




    /**
     * Create an internal node with the two given children, and point the
     * children's parent links at the new node.
     */
    pub fn node(&mut self, value: T, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.branch(value, Some(left), Some(right))
    }




    /**
     * Like `node`, except either child may be absent. Fails if a child handle
     * is not in this arena, already has a parent, or is given for both sides.
     * Nothing is modified when an error is returned.
     */
    pub fn branch(&mut self, value: T, left: Option<NodeId>, right: Option<NodeId>) -> Result<NodeId, Error> {
        for &child in left.iter().chain(right.iter()) {
            self.check_detached(child)?;
        }
        match (left, right) {
            (Some(l), Some(r)) if l == r => Err(Error::AlreadyAttached(r)),
            _ => Ok(self.push(value, left, right)),
        }
    }




    /**
     * Freeze the arena into a tree rooted at the given node. When every node
     * in the arena is reachable from the root, all handles returned by this
     * builder remain valid in the finished tree. Otherwise the unreachable
     * nodes are dropped and later handles shift; use `finish_remapped` to
     * translate them.
     */
    pub fn finish(self, root: NodeId) -> Result<BinaryTree<T>, Error> {
        self.finish_remapped(root).map(|(tree, _)| tree)
    }




    /**
     * Like `finish`, but also return a table mapping each builder handle (by
     * index) to its handle in the finished tree, or `None` if the node was
     * dropped. Reachable nodes keep their relative order.
     */
    pub fn finish_remapped(self, root: NodeId) -> Result<(BinaryTree<T>, Vec<Option<NodeId>>), Error> {
        self.check_detached(root)?;

        let total = self.nodes.len();
        let mut reachable = vec![false; total];
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            reachable[id.0] = true;
            let node = &self.nodes[id.0];
            stack.extend(node.l);
            stack.extend(node.r);
        }

        let mut remap = vec![None; total];
        let mut count = 0;

        for (old, &keep) in reachable.iter().enumerate() {
            if keep {
                remap[old] = Some(NodeId(count));
                count += 1;
            }
        }

        let nodes = if count == total {
            self.nodes
        } else {
            debug!("discarded {} nodes unreachable from root {}", total - count, root);

            let relink = |id: Option<NodeId>| id.and_then(|id| remap[id.0]);
            self.nodes
                .into_iter()
                .zip(reachable)
                .filter(|(_, keep)| *keep)
                .map(|(mut node, _)| {
                    node.l = relink(node.l);
                    node.r = relink(node.r);
                    node.p = relink(node.p);
                    node
                })
                .collect()
        };
        let root = remap[root.0];
        Ok((BinaryTree { nodes, root }, remap))
    }




    // ========================================================================
    fn check_detached(&self, id: NodeId) -> Result<(), Error> {
        match self.nodes.get(id.0) {
            None => Err(Error::UnknownNode(id)),
            Some(node) if node.p.is_some() => Err(Error::AlreadyAttached(id)),
            Some(_) => Ok(()),
        }
    }

    fn push(&mut self, value: T, l: Option<NodeId>, r: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(value);
        node.l = l;
        node.r = r;
        self.nodes.push(node);

        for child in l.into_iter().chain(r) {
            self.nodes[child.0].p = Some(id)
        }
        id
    }

    fn push_in_order(&mut self, slice: &mut [Option<T>]) -> Option<NodeId> {
        if slice.is_empty() {
            None
        } else {
            let mid = slice.len() / 2;
            let l = self.push_in_order(&mut slice[..mid]);
            let r = self.push_in_order(&mut slice[mid + 1..]);
            let value = slice[mid].take()?;
            Some(self.push(value, l, r))
        }
    }

    fn push_shape(&mut self, shape: Shape<T>) -> NodeId {
        match shape {
            Shape::Leaf(value) => self.push(value, None, None),
            Shape::Node { value, left, right } => {
                let l = left.map(|s| self.push_shape(*s));
                let r = right.map(|s| self.push_shape(*s));
                self.push(value, l, r)
            }
        }
    }
}




// ============================================================================
impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}




/**
 * An immutable binary tree whose nodes know their parent. The tree owns a
 * flat arena of nodes; child and parent links are indexes into it. Any number
 * of cursors may traverse the same tree concurrently.
 */
#[derive(Clone, Debug)]
pub struct BinaryTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,
}




// ============================================================================
impl<T> BinaryTree<T> {

    pub fn new() -> Self {
        Self { nodes: Vec::new(), root: None }
    }




    /**
     * Build a height-balanced tree whose in-order sequence is exactly the
     * given sequence. Values are not compared; pass a sorted sequence to
     * obtain a search tree.
     */
    pub fn from_in_order(values: Vec<T>) -> Self {
        let mut slots: Vec<_> = values.into_iter().map(Some).collect();
        let mut builder = TreeBuilder::new();
        let root = builder.push_in_order(&mut slots[..]);
        Self { nodes: builder.nodes, root }
    }

    pub fn from_shape(shape: Shape<T>) -> Self {
        let mut builder = TreeBuilder::new();
        let root = builder.push_shape(shape);
        Self { nodes: builder.nodes, root: Some(root) }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }




    /**
     * Return the number of nodes on the longest root-to-leaf path.
     */
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.iter().map(|&id| (id, 1)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            height = height.max(depth);
            stack.extend(node.l.map(|l| (l, depth + 1)));
            stack.extend(node.r.map(|r| (r, depth + 1)));
        }
        height
    }




    /**
     * Return a cursor positioned before the in-order minimum of this tree.
     */
    pub fn in_order(&self) -> InOrderCursor<'_, T> {
        InOrderCursor::new(self)
    }

    /**
     * Consume the tree and return its values in in-order sequence.
     */
    pub fn into_values(self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = self.in_order();

        while cursor.move_next() {
            order.extend(cursor.current());
        }

        let mut slots: Vec<_> = self.nodes.into_iter().map(|n| Some(n.into_value())).collect();
        order.iter().filter_map(|id| slots[id.0].take()).collect()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }




    // ========================================================================
    #[cfg(test)]
    pub(crate) fn validate_links(&self) {
        if let Some(root) = self.root {
            if self.node(root).p.is_some() {
                panic!("root node has a parent")
            }
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);

            for child in node.l.into_iter().chain(node.r) {
                if self.node(child).p != Some(id) {
                    panic!("child {} does not point back to parent {}", child, id)
                }
            }
            if let Some(p) = node.p {
                if self.node(p).l != Some(id) && self.node(p).r != Some(id) {
                    panic!("parent {} does not own child {}", p, id)
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn in_order_recursive(&self) -> Vec<T> where T: Clone {
        fn visit<T: Clone>(tree: &BinaryTree<T>, id: Option<NodeId>, values: &mut Vec<T>) {
            if let Some(id) = id {
                let node = tree.node(id);
                visit(tree, node.l, values);
                values.push(node.value().clone());
                visit(tree, node.r, values);
            }
        }
        let mut values = Vec::new();
        visit(self, self.root, &mut values);
        values
    }
}




// ============================================================================
impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}




// ============================================================================
impl<T: Ord> FromIterator<T> for BinaryTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values: Vec<_> = iter.into_iter().collect();
        values.sort();
        Self::from_in_order(values)
    }
}




/**
 * A simple deterministic linear congruential generator:
 *
 * https://en.wikipedia.org/wiki/Linear_congruential_generator
 */
#[cfg(test)]
pub(crate) fn stupid_random_numbers(len: usize, mut seed: usize) -> Vec<usize> {
    let mut values = Vec::new();
    let a = 1103515245;
    let c = 12345;
    let m = 1 << 31;
    for _ in 0..len {
        seed = (a * seed + c) % m;
        values.push(seed)
    }
    values
}




/**
 * Build a tree of randomly chosen shape, whose in-order sequence is 0..len.
 */
#[cfg(test)]
pub(crate) fn stupid_random_tree(len: usize, seed: usize) -> BinaryTree<i32> {
    fn build(builder: &mut TreeBuilder<i32>, lo: usize, hi: usize, rand: &mut Vec<usize>) -> Option<NodeId> {
        if lo == hi {
            None
        } else {
            let mid = lo + rand.pop().unwrap_or(0) % (hi - lo);
            let l = build(builder, lo, mid, rand);
            let r = build(builder, mid + 1, hi, rand);
            Some(builder.branch(mid as i32, l, r).unwrap())
        }
    }
    let mut rand = stupid_random_numbers(len, seed);
    let mut builder = TreeBuilder::new();

    match build(&mut builder, 0, len, &mut rand) {
        Some(root) => builder.finish(root).unwrap(),
        None => BinaryTree::new(),
    }
}
