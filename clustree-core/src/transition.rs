//! Per-layer cluster sizes and inter-layer transition counts.
//!
//! Both tallies are keyed by *rank*, the position of a cluster id in its
//! layer's sorted id list, so sparse or non-zero-based labels never index
//! out of range.

use crate::clustering::{ClusterId, Clustering};

/// Population of one cluster within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSize {
    /// Cluster identifier within the layer.
    pub id: ClusterId,
    /// Number of points assigned to the cluster.
    pub size: usize,
}

/// Cluster sizes of one layer, in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTally {
    layer: usize,
    clusters: Vec<ClusterSize>,
}

impl LayerTally {
    pub(crate) fn from_clustering(layer: usize, clustering: &Clustering) -> Self {
        let mut counts = vec![0_usize; clustering.cluster_count()];
        for &label in clustering.labels() {
            if let Some(slot) = clustering
                .rank_of(label)
                .and_then(|rank| counts.get_mut(rank))
            {
                *slot += 1;
            }
        }
        let clusters = clustering
            .cluster_ids()
            .iter()
            .zip(counts)
            .map(|(&id, size)| ClusterSize { id, size })
            .collect();
        Self { layer, clusters }
    }

    /// Index of the layer this tally describes.
    #[must_use]
    pub const fn layer(&self) -> usize {
        self.layer
    }

    /// Cluster sizes in ascending id order.
    #[must_use]
    pub fn clusters(&self) -> &[ClusterSize] {
        &self.clusters
    }

    /// Number of clusters in the layer.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Size of cluster `id`, or `None` when the layer does not use it.
    #[must_use]
    pub fn size_of(&self, id: ClusterId) -> Option<usize> {
        self.clusters
            .binary_search_by_key(&id, |cluster| cluster.id)
            .ok()
            .and_then(|rank| self.clusters.get(rank))
            .map(|cluster| cluster.size)
    }
}

/// Point-transition counts between layer `from_layer` and the next layer.
///
/// Rows follow the sorted ids of the earlier layer, columns the sorted ids of
/// the later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMatrix {
    from_layer: usize,
    from_ids: Vec<ClusterId>,
    to_ids: Vec<ClusterId>,
    counts: Vec<usize>,
}

impl TransitionMatrix {
    /// Tallies how the points of `previous` move into the clusters of `current`.
    ///
    /// Both clusterings must assign the same points; extra trailing points on
    /// either side are ignored.
    pub(crate) fn tally(from_layer: usize, previous: &Clustering, current: &Clustering) -> Self {
        let from_ids = previous.cluster_ids().to_vec();
        let to_ids = current.cluster_ids().to_vec();
        let columns = to_ids.len();
        let mut counts = vec![0_usize; from_ids.len().saturating_mul(columns)];
        for (&prev_label, &curr_label) in previous.labels().iter().zip(current.labels()) {
            let (Some(row), Some(column)) = (previous.rank_of(prev_label), current.rank_of(curr_label))
            else {
                continue;
            };
            if let Some(slot) = counts.get_mut(row * columns + column) {
                *slot += 1;
            }
        }
        Self {
            from_layer,
            from_ids,
            to_ids,
            counts,
        }
    }

    /// Index of the earlier layer.
    #[must_use]
    pub const fn from_layer(&self) -> usize {
        self.from_layer
    }

    /// Cluster ids labelling the rows.
    #[must_use]
    pub fn from_ids(&self) -> &[ClusterId] {
        &self.from_ids
    }

    /// Cluster ids labelling the columns.
    #[must_use]
    pub fn to_ids(&self) -> &[ClusterId] {
        &self.to_ids
    }

    /// Count at `(row, column)` in rank coordinates.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        if column >= self.to_ids.len() {
            return None;
        }
        self.counts.get(row * self.to_ids.len() + column).copied()
    }

    /// Number of points that moved from cluster `from` to cluster `to`.
    ///
    /// Unknown ids yield zero.
    #[must_use]
    pub fn count(&self, from: ClusterId, to: ClusterId) -> usize {
        let row = self.from_ids.binary_search(&from).ok();
        let column = self.to_ids.binary_search(&to).ok();
        row.zip(column)
            .and_then(|(row, column)| self.get(row, column))
            .unwrap_or(0)
    }

    /// Iterates the matrix rows in rank order.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.counts.chunks(self.to_ids.len().max(1))
    }

    /// Iterates the non-zero cells row by row as `(from, to, count)`.
    pub fn nonzero(&self) -> impl Iterator<Item = (ClusterId, ClusterId, usize)> + '_ {
        self.from_ids
            .iter()
            .zip(self.rows())
            .flat_map(move |(&from, row)| {
                self.to_ids
                    .iter()
                    .zip(row)
                    .filter(|&(_, &count)| count > 0)
                    .map(move |(&to, &count)| (from, to, count))
            })
    }

    /// Sum of every cell.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ClusterId> {
        raw.iter().copied().map(ClusterId::new).collect()
    }

    #[test]
    fn layer_tally_counts_each_cluster() {
        let tally = LayerTally::from_clustering(3, &Clustering::from_labels([1, 0, 1, 1, 2]));
        assert_eq!(tally.layer(), 3);
        let sizes: Vec<usize> = tally.clusters().iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![1, 3, 1]);
        assert_eq!(tally.size_of(ClusterId::new(1)), Some(3));
        assert_eq!(tally.size_of(ClusterId::new(9)), None);
    }

    #[test]
    fn transition_matrix_matches_worked_example() {
        let previous = Clustering::from_labels([0, 0, 1, 1]);
        let current = Clustering::from_labels([0, 1, 1, 1]);
        let matrix = TransitionMatrix::tally(0, &previous, &current);
        let rows: Vec<Vec<usize>> = matrix.rows().map(<[usize]>::to_vec).collect();
        assert_eq!(rows, vec![vec![1, 1], vec![0, 2]]);
        assert_eq!(matrix.total(), 4);
        let cells: Vec<(u64, u64, usize)> = matrix
            .nonzero()
            .map(|(from, to, count)| (from.get(), to.get(), count))
            .collect();
        assert_eq!(cells, vec![(0, 0, 1), (0, 1, 1), (1, 1, 2)]);
    }

    #[test]
    fn sparse_labels_are_ranked_not_indexed() {
        let previous = Clustering::from_labels([0, 0, 1]);
        let current = Clustering::from_labels([10, 40, 40]);
        let matrix = TransitionMatrix::tally(0, &previous, &current);
        assert_eq!(matrix.to_ids(), ids(&[10, 40]).as_slice());
        assert_eq!(matrix.count(ClusterId::new(0), ClusterId::new(40)), 1);
        assert_eq!(matrix.count(ClusterId::new(1), ClusterId::new(40)), 1);
        assert_eq!(matrix.count(ClusterId::new(1), ClusterId::new(10)), 0);
        assert_eq!(matrix.count(ClusterId::new(7), ClusterId::new(10)), 0);
        assert_eq!(matrix.get(0, 2), None);
    }
}
