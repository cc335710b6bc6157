//! The assembled cluster tree: graph, layout, and the tallies behind them.

use crate::{
    agreement::LayerAgreement,
    graph::{ClusterGraph, NodeKey},
    layout::{Positions, grid_layout},
    render::{plan::RenderPlan, style::RenderStyle},
    transition::{LayerTally, TransitionMatrix},
};

/// Result of [`crate::ClusterTreeBuilder::build`].
///
/// # Examples
/// ```
/// use clustree_core::{ClusterId, ClusterTreeBuilder, Clustering, NodeKey};
///
/// let tree = ClusterTreeBuilder::new().build(&[
///     Clustering::from_labels([0, 0, 1, 1]),
///     Clustering::from_labels([0, 1, 1, 1]),
/// ])?;
/// assert_eq!(tree.n_points(), 4);
/// assert_eq!(tree.graph().edge_count(), 3);
/// let key = NodeKey::new(1, ClusterId::new(1));
/// assert_eq!(tree.graph().node(key).map(|node| node.size()), Some(3));
/// assert_eq!(tree.position(key), Some([0.0, 0.0]));
/// # Ok::<(), clustree_core::ClustreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    n_points: usize,
    layers: Vec<LayerTally>,
    transitions: Vec<TransitionMatrix>,
    graph: ClusterGraph,
    positions: Positions,
}

impl ClusterTree {
    pub(crate) fn assemble(
        n_points: usize,
        layers: Vec<LayerTally>,
        transitions: Vec<TransitionMatrix>,
    ) -> Self {
        let mut graph = ClusterGraph::default();
        for layer in &layers {
            for (rank, cluster) in layer.clusters().iter().enumerate() {
                graph.add_node(NodeKey::new(layer.layer(), cluster.id), cluster.size, rank);
            }
        }
        for matrix in &transitions {
            let from_layer = matrix.from_layer();
            for (from, to, count) in matrix.nonzero() {
                graph.add_edge(
                    NodeKey::new(from_layer, from),
                    NodeKey::new(from_layer + 1, to),
                    count,
                );
            }
        }
        let positions = grid_layout(&layers);
        Self {
            n_points,
            layers,
            transitions,
            graph,
            positions,
        }
    }

    /// Number of points every layer assigns.
    #[must_use]
    pub const fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Cluster sizes per layer.
    #[must_use]
    pub fn layers(&self) -> &[LayerTally] {
        &self.layers
    }

    /// Transition counts between each pair of consecutive layers.
    #[must_use]
    pub fn transitions(&self) -> &[TransitionMatrix] {
        &self.transitions
    }

    /// The layered graph.
    #[must_use]
    pub const fn graph(&self) -> &ClusterGraph {
        &self.graph
    }

    /// Layout coordinates of every node.
    #[must_use]
    pub const fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Layout coordinates of `key`.
    #[must_use]
    pub fn position(&self, key: NodeKey) -> Option<[f64; 2]> {
        self.positions.get(&key).copied()
    }

    /// ARI and NMI for each pair of consecutive layers.
    #[must_use]
    pub fn agreement(&self) -> Vec<LayerAgreement> {
        self.transitions
            .iter()
            .map(LayerAgreement::from_transition)
            .collect()
    }

    /// Drawing instructions for this tree under `style`.
    #[must_use]
    pub fn render_plan(&self, style: &RenderStyle) -> RenderPlan {
        RenderPlan::new(self, style)
    }
}
