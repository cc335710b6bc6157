//! Drawing instructions derived from a [`ClusterTree`].

use crate::{
    graph::NodeKey,
    render::{style::RenderStyle, surface::DrawingSurface},
    tree::ClusterTree,
};

/// Number of staggered label groups.
pub const LABEL_GROUPS: usize = 3;

/// A node marker in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMark {
    /// Node drawn by this marker.
    pub key: NodeKey,
    /// Layout position `[x, y]`.
    pub position: [f64; 2],
    /// Area in square pixels of the square bounding the marker.
    pub area: f64,
    /// Fill colour.
    pub colour: String,
}

/// An edge stroke in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStroke {
    /// Cluster in the earlier layer.
    pub source: NodeKey,
    /// Cluster in the later layer.
    pub target: NodeKey,
    /// Layout position of the source node.
    pub from: [f64; 2],
    /// Layout position of the target node.
    pub to: [f64; 2],
    /// Stroke width in pixels.
    pub width: f64,
}

/// The weight printed next to an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    /// Cluster in the earlier layer.
    pub source: NodeKey,
    /// Cluster in the later layer.
    pub target: NodeKey,
    /// Printed text, the raw transition count.
    pub text: String,
    /// Anchor of the text in layout coordinates.
    pub position: [f64; 2],
}

/// Everything a [`DrawingSurface`] needs to draw one tree.
///
/// Edge labels are dealt round-robin into [`LABEL_GROUPS`] groups by edge
/// insertion order; group `g` is anchored at `label_positions()[g]` along its
/// edge so neighbouring labels do not pile up at the midpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    nodes: Vec<NodeMark>,
    edges: Vec<EdgeStroke>,
    label_groups: [Vec<EdgeLabel>; LABEL_GROUPS],
}

impl RenderPlan {
    /// Derives drawing instructions for `tree` under `style`.
    #[must_use]
    pub fn new(tree: &ClusterTree, style: &RenderStyle) -> Self {
        let n_points = tree.n_points();
        let graph = tree.graph();

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| NodeMark {
                key: node.key(),
                position: tree.position(node.key()).unwrap_or([0.0, 0.0]),
                area: scaled_fraction(style.node_scale(), node.size(), n_points),
                colour: style.colour_for_layer(node.key().layer).to_owned(),
            })
            .collect();

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut label_groups: [Vec<EdgeLabel>; LABEL_GROUPS] = Default::default();
        let anchors = style.label_positions();
        for (index, edge) in graph.edges().iter().enumerate() {
            let from = tree.position(edge.source()).unwrap_or([0.0, 0.0]);
            let to = tree.position(edge.target()).unwrap_or([0.0, 0.0]);
            edges.push(EdgeStroke {
                source: edge.source(),
                target: edge.target(),
                from,
                to,
                width: scaled_fraction(style.edge_scale(), edge.weight(), n_points),
            });

            let group = index % LABEL_GROUPS;
            let anchor = anchors.get(group).copied().unwrap_or(0.5);
            if let Some(labels) = label_groups.get_mut(group) {
                labels.push(EdgeLabel {
                    source: edge.source(),
                    target: edge.target(),
                    text: edge.weight().to_string(),
                    position: label_anchor(from, to, anchor),
                });
            }
        }

        Self {
            nodes,
            edges,
            label_groups,
        }
    }

    /// Node markers, layer by layer.
    #[must_use]
    pub fn nodes(&self) -> &[NodeMark] {
        &self.nodes
    }

    /// Edge strokes in edge insertion order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeStroke] {
        &self.edges
    }

    /// The staggered label groups.
    #[must_use]
    pub const fn label_groups(&self) -> &[Vec<EdgeLabel>; LABEL_GROUPS] {
        &self.label_groups
    }

    /// Draws edges, then nodes, then each label group onto `surface`.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for edge in &self.edges {
            surface.draw_edge(edge);
        }
        for node in &self.nodes {
            surface.draw_node(node);
        }
        for label in self.label_groups.iter().flatten() {
            surface.draw_edge_label(label);
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "marker sizes are floating-point fractions of the point count."
)]
fn scaled_fraction(scale: f64, count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    scale * count as f64 / total as f64
}

/// Point at `t * from + (1 - t) * to`, so `t = 1` sits on the source.
#[expect(
    clippy::float_arithmetic,
    reason = "interpolation along an edge is floating-point."
)]
fn label_anchor(from: [f64; 2], to: [f64; 2], t: f64) -> [f64; 2] {
    let [from_x, from_y] = from;
    let [to_x, to_y] = to;
    [
        from_x * t + to_x * (1.0 - t),
        from_y * t + to_y * (1.0 - t),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_fraction_handles_empty_totals() {
        assert_eq!(scaled_fraction(50.0, 3, 0), 0.0);
        assert!((scaled_fraction(50.0, 1, 4) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn label_anchor_interpolates_from_target() {
        let anchor = label_anchor([0.0, 0.0], [1.0, 2.0], 0.2);
        assert!((anchor[0] - 0.8).abs() < 1e-12);
        assert!((anchor[1] - 1.6).abs() < 1e-12);
        assert_eq!(label_anchor([0.0, 0.0], [1.0, 2.0], 1.0), [0.0, 0.0]);
    }
}
