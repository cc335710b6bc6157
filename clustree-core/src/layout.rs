//! Fixed grid layout for cluster trees.
//!
//! Layers become columns spread over `[-1, 1)` and clusters become rows
//! within their column, ordered by id.

use std::collections::BTreeMap;

use crate::{graph::NodeKey, transition::LayerTally};

/// Layout coordinates keyed by node, as `[x, y]`.
pub type Positions = BTreeMap<NodeKey, [f64; 2]>;

/// Places every cluster of `layers` on the grid.
pub(crate) fn grid_layout(layers: &[LayerTally]) -> Positions {
    let layer_count = layers.len();
    let mut positions = Positions::new();
    for (layer_index, layer) in layers.iter().enumerate() {
        let x = axis_coordinate(layer_index, layer_count);
        let cluster_count = layer.cluster_count();
        for (rank, cluster) in layer.clusters().iter().enumerate() {
            let y = axis_coordinate(rank, cluster_count);
            positions.insert(NodeKey::new(layer_index, cluster.id), [x, y]);
        }
    }
    positions
}

/// Maps `index` of `count` evenly onto `[-1, 1)`.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "layout coordinates are floating-point fractions of the axis."
)]
fn axis_coordinate(index: usize, count: usize) -> f64 {
    if count == 0 {
        return -1.0;
    }
    -1.0 + (index as f64) * 2.0 / (count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{ClusterId, Clustering};

    #[rstest]
    #[case(0, 1, -1.0)]
    #[case(0, 4, -1.0)]
    #[case(1, 4, -0.5)]
    #[case(2, 4, 0.0)]
    #[case(3, 4, 0.5)]
    #[case(1, 2, 0.0)]
    fn axis_coordinate_spreads_evenly(
        #[case] index: usize,
        #[case] count: usize,
        #[case] expected: f64,
    ) {
        assert!((axis_coordinate(index, count) - expected).abs() < 1e-12);
    }

    #[test]
    fn grid_layout_uses_rank_not_id() {
        let layers = vec![
            LayerTally::from_clustering(0, &Clustering::from_labels([0, 0, 0])),
            LayerTally::from_clustering(1, &Clustering::from_labels([5, 9, 9])),
        ];
        let positions = grid_layout(&layers);
        assert_eq!(positions.len(), 3);
        assert_eq!(
            positions.get(&NodeKey::new(0, ClusterId::new(0))),
            Some(&[-1.0, -1.0])
        );
        assert_eq!(
            positions.get(&NodeKey::new(1, ClusterId::new(5))),
            Some(&[0.0, -1.0])
        );
        assert_eq!(
            positions.get(&NodeKey::new(1, ClusterId::new(9))),
            Some(&[0.0, 0.0])
        );
    }
}
