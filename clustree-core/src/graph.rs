//! Layered graph of clusters and the point flows between them.

use std::{collections::BTreeMap, fmt};

use crate::clustering::ClusterId;

/// Identifies a cluster node by its layer and cluster id.
///
/// Keys order by layer first, then by cluster id.
///
/// # Examples
/// ```
/// use clustree_core::{ClusterId, NodeKey};
///
/// let key = NodeKey::new(1, ClusterId::new(3));
/// assert_eq!(key.to_string(), "(1, 3)");
/// assert!(NodeKey::new(0, ClusterId::new(9)) < key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    /// Layer index.
    pub layer: usize,
    /// Cluster id within the layer.
    pub cluster: ClusterId,
}

impl NodeKey {
    /// Creates a key for cluster `cluster` of layer `layer`.
    #[must_use]
    pub const fn new(layer: usize, cluster: ClusterId) -> Self {
        Self { layer, cluster }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.cluster.get())
    }
}

/// A cluster of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterNode {
    key: NodeKey,
    size: usize,
    rank: usize,
}

impl ClusterNode {
    /// Key of the node.
    #[must_use]
    pub const fn key(&self) -> NodeKey {
        self.key
    }

    /// Number of points in the cluster.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Position of the cluster id in its layer's sorted id list.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }
}

/// Points shared by a cluster and a cluster of the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterEdge {
    source: NodeKey,
    target: NodeKey,
    weight: usize,
    target_size: usize,
}

impl ClusterEdge {
    /// Cluster in the earlier layer.
    #[must_use]
    pub const fn source(&self) -> NodeKey {
        self.source
    }

    /// Cluster in the later layer.
    #[must_use]
    pub const fn target(&self) -> NodeKey {
        self.target
    }

    /// Number of points moving along this edge.
    #[must_use]
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Share of the target cluster's points that came from the source.
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "proportions are reported as floating-point fractions."
    )]
    #[must_use]
    pub fn in_proportion(&self) -> f64 {
        if self.target_size == 0 {
            return 0.0;
        }
        self.weight as f64 / self.target_size as f64
    }
}

/// Nodes keyed by `(layer, cluster)` and the weighted edges joining
/// consecutive layers.
///
/// Nodes are stored layer by layer in ascending id order; edges keep their
/// insertion order, which the renderer relies on when staggering labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterGraph {
    nodes: Vec<ClusterNode>,
    edges: Vec<ClusterEdge>,
    index: BTreeMap<NodeKey, usize>,
}

impl ClusterGraph {
    pub(crate) fn add_node(&mut self, key: NodeKey, size: usize, rank: usize) {
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key, self.nodes.len());
        self.nodes.push(ClusterNode { key, size, rank });
    }

    pub(crate) fn add_edge(&mut self, source: NodeKey, target: NodeKey, weight: usize) {
        let target_size = self.node(target).map_or(0, ClusterNode::size);
        self.edges.push(ClusterEdge {
            source,
            target,
            weight,
            target_size,
        });
    }

    /// All nodes, layer by layer in ascending id order.
    #[must_use]
    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[ClusterEdge] {
        &self.edges
    }

    /// Looks up the node stored under `key`.
    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&ClusterNode> {
        self.index.get(&key).and_then(|&slot| self.nodes.get(slot))
    }

    /// Returns `true` when the graph has a node under `key`.
    #[must_use]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes belonging to `layer`, in ascending id order.
    pub fn layer_nodes(&self, layer: usize) -> impl Iterator<Item = &ClusterNode> {
        self.nodes.iter().filter(move |node| node.key.layer == layer)
    }

    /// Edges leaving `key` towards the next layer.
    pub fn edges_from(&self, key: NodeKey) -> impl Iterator<Item = &ClusterEdge> {
        self.edges.iter().filter(move |edge| edge.source == key)
    }

    /// Edges arriving at `key` from the previous layer.
    pub fn edges_into(&self, key: NodeKey) -> impl Iterator<Item = &ClusterEdge> {
        self.edges.iter().filter(move |edge| edge.target == key)
    }

    /// Sum of the weights of the edges leaving `key`.
    #[must_use]
    pub fn out_weight(&self, key: NodeKey) -> usize {
        self.edges_from(key).map(ClusterEdge::weight).sum()
    }

    /// Sum of the weights of the edges arriving at `key`.
    #[must_use]
    pub fn in_weight(&self, key: NodeKey) -> usize {
        self.edges_into(key).map(ClusterEdge::weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(layer: usize, cluster: u64) -> NodeKey {
        NodeKey::new(layer, ClusterId::new(cluster))
    }

    #[test]
    fn weights_sum_per_direction() {
        let mut graph = ClusterGraph::default();
        graph.add_node(key(0, 0), 3, 0);
        graph.add_node(key(1, 0), 1, 0);
        graph.add_node(key(1, 1), 2, 1);
        graph.add_edge(key(0, 0), key(1, 0), 1);
        graph.add_edge(key(0, 0), key(1, 1), 2);

        assert_eq!(graph.out_weight(key(0, 0)), 3);
        assert_eq!(graph.in_weight(key(1, 1)), 2);
        assert_eq!(graph.out_weight(key(1, 1)), 0);
        assert_eq!(graph.layer_nodes(1).count(), 2);
    }

    #[test]
    fn duplicate_nodes_are_ignored() {
        let mut graph = ClusterGraph::default();
        graph.add_node(key(0, 0), 3, 0);
        graph.add_node(key(0, 0), 8, 0);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(key(0, 0)).map(ClusterNode::size), Some(3));
    }

    #[test]
    fn in_proportion_uses_target_size() {
        let mut graph = ClusterGraph::default();
        graph.add_node(key(0, 0), 2, 0);
        graph.add_node(key(1, 0), 4, 0);
        graph.add_edge(key(0, 0), key(1, 0), 1);
        let edge = graph.edges().first().copied().expect("edge must exist");
        assert!((edge.in_proportion() - 0.25).abs() < f64::EPSILON);
    }
}
