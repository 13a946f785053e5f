//! Union-find forest with seniority ranks.
//!
//! Every node carries a signed `rank_offset`. A node's rank is the sum of
//! the offsets on the path from the node up to and including its root,
//! plus one. Within a set of `n` nodes the ranks are always exactly
//! `1..=n`: merging shifts a whole tree by adjusting one root offset, and
//! path compression folds the skipped offsets into the compressed node.

use log::{debug, trace};
use smallvec::SmallVec;

/// Stable index of a node in a [`RankForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct SetNode<T> {
    payload: T,
    /// Equal to the node's own id iff the node is a root.
    parent: NodeId,
    /// Subtree size. Only read at roots.
    size: usize,
    rank_offset: i64,
    /// Elements ever merged into this set. Only read at roots.
    absolute_count: usize,
}

/// Arena-backed forest of disjoint sets, union by size with path compression.
///
/// Node ids handed out by [`RankForest::make_set`] stay valid for the life
/// of the forest. Passing an id from another forest panics on out-of-range
/// access, like indexing a slice.
#[derive(Debug, Clone)]
pub struct RankForest<T> {
    nodes: Vec<SetNode<T>>,
    sets: usize,
}

impl<T> Default for RankForest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RankForest<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            sets: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// The id the next call to [`make_set`](Self::make_set) will return.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    /// Add a singleton set holding `payload`.
    pub fn make_set(&mut self, payload: T) -> NodeId {
        let id = self.next_id();
        self.nodes.push(SetNode {
            payload,
            parent: id,
            size: 1,
            rank_offset: 0,
            absolute_count: 1,
        });
        self.sets += 1;
        trace!("make_set node {}", id.0);
        id
    }

    pub fn payload(&self, id: NodeId) -> &T {
        &self.nodes[id.0].payload
    }

    pub fn payload_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.0].payload
    }

    /// Find the root of the set containing `id`, compressing the path.
    ///
    /// Nodes are repointed from the one nearest the root downward. When a
    /// node is moved off a non-root parent, that parent's offset (already
    /// relative to the root) is added to the node's own.
    pub fn find(&mut self, id: NodeId) -> NodeId {
        let mut path: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut cur = id;
        while self.nodes[cur.0].parent != cur {
            path.push(cur);
            cur = self.nodes[cur.0].parent;
        }
        let root = cur;

        for &node in path.iter().rev() {
            let parent = self.nodes[node.0].parent;
            if parent != root {
                let folded = self.nodes[parent.0].rank_offset;
                self.nodes[node.0].rank_offset += folded;
                self.nodes[node.0].parent = root;
            }
        }
        if path.len() > 1 {
            trace!("compressed {} hops to root {}", path.len(), root.0);
        }
        root
    }

    pub fn connected(&mut self, a: NodeId, b: NodeId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Size of the set containing `id`.
    pub fn set_size(&mut self, id: NodeId) -> usize {
        let root = self.find(id);
        self.nodes[root.0].size
    }

    /// Elements ever merged into the set containing `id`.
    pub fn absolute_count(&mut self, id: NodeId) -> usize {
        let root = self.find(id);
        self.nodes[root.0].absolute_count
    }

    /// 1-based seniority of `id` within its set.
    pub fn rank(&mut self, id: NodeId) -> usize {
        let root = self.find(id);
        let mut sum = self.nodes[root.0].rank_offset;
        if id != root {
            sum += self.nodes[id.0].rank_offset;
        }
        debug_assert!(sum >= 0, "rank offsets of node {} sum to {sum}", id.0);
        (sum + 1) as usize
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// The larger set is senior; on a tie the set of `a` is. Returns `false`
    /// without changing anything if both are already in one set.
    pub fn unite(&mut self, a: NodeId, b: NodeId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.nodes[root_a.0].size >= self.nodes[root_b.0].size {
            self.merge_roots(root_a, root_b);
        } else {
            self.merge_roots(root_b, root_a);
        }
        true
    }

    /// Merge the set of `junior` into the set of `senior`, ranking every
    /// senior member ahead of every junior member regardless of set sizes.
    pub fn absorb(&mut self, senior: NodeId, junior: NodeId) -> bool {
        let senior_root = self.find(senior);
        let junior_root = self.find(junior);
        if senior_root == junior_root {
            return false;
        }
        self.merge_roots(senior_root, junior_root);
        true
    }

    /// All members of the set containing `id`, ordered by rank.
    pub fn members(&mut self, id: NodeId) -> Vec<NodeId> {
        let root = self.find(id);
        let mut ranked: Vec<(usize, NodeId)> = Vec::with_capacity(self.nodes[root.0].size);
        for i in 0..self.nodes.len() {
            let node = NodeId(i);
            if self.find(node) == root {
                ranked.push((self.rank(node), node));
            }
        }
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, node)| node).collect()
    }

    /// Link two distinct roots. The larger tree keeps its root; offsets are
    /// chosen so that the junior set's ranks move up by the senior set's
    /// count and the senior set's ranks stay put.
    fn merge_roots(&mut self, senior: NodeId, junior: NodeId) {
        let senior_count = self.nodes[senior.0].absolute_count;
        let junior_count = self.nodes[junior.0].absolute_count;
        let shift = senior_count as i64;

        let (root, child) = if self.nodes[senior.0].size >= self.nodes[junior.0].size {
            let senior_offset = self.nodes[senior.0].rank_offset;
            self.nodes[junior.0].rank_offset += shift - senior_offset;
            (senior, junior)
        } else {
            self.nodes[junior.0].rank_offset += shift;
            let junior_offset = self.nodes[junior.0].rank_offset;
            self.nodes[senior.0].rank_offset -= junior_offset;
            (junior, senior)
        };

        let size = self.nodes[senior.0].size + self.nodes[junior.0].size;
        self.nodes[child.0].parent = root;
        self.nodes[root.0].size = size;
        self.nodes[root.0].absolute_count = senior_count + junior_count;
        self.sets -= 1;

        debug!(
            "merged root {} under root {} (junior shift {}, size {})",
            child.0, root.0, shift, size
        );
    }
}
