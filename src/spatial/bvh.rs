use tracing::trace;

use crate::geometry::BoundingBox;

/// A bounding volume hierarchy over a fixed list of boxes.
///
/// The tree is complete and stored as one flat array: node `i` has children
/// `2i + 1` and `2i + 2`, the first `n - 1` nodes are internal and the last
/// `n` are leaves. Every internal box is the union of its two children.
/// The tree is immutable; rebuild it when the boxes change.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    boxes: Vec<BoundingBox>,
    internal_count: usize,
    last_row: usize,
    element_count: usize,
}

/// What a [`BvhNode`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A node with two children.
    Internal,
    /// A node holding one of the boxes the tree was built from.
    Leaf { element_index: usize },
}

/// A view of one node of a [`Bvh`].
#[derive(Debug, Clone, Copy)]
pub struct BvhNode<'a> {
    bvh: &'a Bvh,
    index: usize,
}

impl BvhNode<'_> {
    /// The node's box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bvh.boxes[self.index]
    }

    /// Whether the node is internal or a leaf.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        if self.bvh.is_leaf(self.index) {
            NodeKind::Leaf {
                element_index: self.bvh.element_index(self.index),
            }
        } else {
            NodeKind::Internal
        }
    }
}

impl Bvh {
    /// Builds the tree over `leaf_boxes`; element `i` is `leaf_boxes[i]`.
    #[must_use]
    pub fn new(leaf_boxes: &[BoundingBox]) -> Self {
        let element_count = leaf_boxes.len();
        if element_count == 0 {
            return Self::default();
        }

        let internal_count = element_count - 1;
        let mut last_row = 0;
        while last_row < internal_count {
            last_row = last_row * 2 + 1;
        }

        let mut bvh = Self {
            boxes: vec![BoundingBox::empty(); 2 * element_count - 1],
            internal_count,
            last_row,
            element_count,
        };
        for node in internal_count..bvh.boxes.len() {
            bvh.boxes[node] = leaf_boxes[bvh.element_index(node)];
        }
        for node in (0..internal_count).rev() {
            bvh.boxes[node] = bvh.boxes[2 * node + 1].union(&bvh.boxes[2 * node + 2]);
        }

        trace!(
            elements = element_count,
            internal_nodes = internal_count,
            "built bounding volume hierarchy"
        );
        bvh
    }

    /// Number of boxes the tree was built from.
    #[must_use]
    pub fn len(&self) -> usize {
        self.element_count
    }

    /// Returns `true` if the tree was built from no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Box around everything; empty for an empty tree.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.boxes.first().copied().unwrap_or_else(BoundingBox::empty)
    }

    /// Pre-order traversal from the root (depth 0).
    ///
    /// Returning `false` from `callback` skips the children of that node.
    pub fn visit<F>(&self, mut callback: F)
    where
        F: FnMut(BvhNode<'_>, usize) -> bool,
    {
        if !self.is_empty() {
            self.visit_node(0, 0, &mut callback);
        }
    }

    /// Calls `callback(i, j)` for every pair of elements with overlapping boxes.
    ///
    /// Each unordered pair is reported once, and every element is reported
    /// paired with itself.
    pub fn self_intersect<F>(&self, mut callback: F)
    where
        F: FnMut(usize, usize),
    {
        if !self.is_empty() {
            self.self_pairs(0, &mut callback);
        }
    }

    /// Calls `callback(i, j)` for every element `i` of `self` whose box
    /// overlaps the box of element `j` of `other`.
    pub fn intersect<F>(&self, other: &Bvh, mut callback: F)
    where
        F: FnMut(usize, usize),
    {
        if !self.is_empty() && !other.is_empty() {
            cross_pairs(self, 0, other, 0, &mut callback);
        }
    }

    fn is_leaf(&self, node: usize) -> bool {
        node >= self.internal_count
    }

    /// Maps a leaf node to its element. The last row may be partially
    /// filled, so leaves before `last_row` wrap to the end of the element list.
    fn element_index(&self, node: usize) -> usize {
        if node >= self.last_row {
            node - self.last_row
        } else {
            node + self.element_count - self.last_row
        }
    }

    fn visit_node<F>(&self, node: usize, depth: usize, callback: &mut F)
    where
        F: FnMut(BvhNode<'_>, usize) -> bool,
    {
        if !callback(BvhNode { bvh: self, index: node }, depth) {
            return;
        }
        if !self.is_leaf(node) {
            self.visit_node(2 * node + 1, depth + 1, callback);
            self.visit_node(2 * node + 2, depth + 1, callback);
        }
    }

    fn self_pairs<F>(&self, node: usize, callback: &mut F)
    where
        F: FnMut(usize, usize),
    {
        if self.is_leaf(node) {
            let element = self.element_index(node);
            callback(element, element);
        } else {
            let (left, right) = (2 * node + 1, 2 * node + 2);
            self.self_pairs(left, callback);
            cross_pairs(self, left, self, right, callback);
            self.self_pairs(right, callback);
        }
    }
}

/// Simultaneous descent of two trees (or two subtrees of the same tree).
fn cross_pairs<F>(a: &Bvh, a_node: usize, b: &Bvh, b_node: usize, callback: &mut F)
where
    F: FnMut(usize, usize),
{
    if !a.boxes[a_node].overlaps(&b.boxes[b_node]) {
        return;
    }
    match (a.is_leaf(a_node), b.is_leaf(b_node)) {
        (true, true) => callback(a.element_index(a_node), b.element_index(b_node)),
        (true, false) => {
            cross_pairs(a, a_node, b, 2 * b_node + 1, callback);
            cross_pairs(a, a_node, b, 2 * b_node + 2, callback);
        }
        (false, true) => {
            cross_pairs(a, 2 * a_node + 1, b, b_node, callback);
            cross_pairs(a, 2 * a_node + 2, b, b_node, callback);
        }
        (false, false) => {
            for a_child in [2 * a_node + 1, 2 * a_node + 2] {
                for b_child in [2 * b_node + 1, 2 * b_node + 2] {
                    cross_pairs(a, a_child, b, b_child, callback);
                }
            }
        }
    }
}
