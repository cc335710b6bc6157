//! Clustering assignments consumed by the tree builder.
//!
//! A [`Clustering`] is one layer of the tree: a cluster id per point. The
//! contiguity rules enforced by [`Clustering::validate_contiguous`] mirror the
//! ones a dense transition matrix would need, although the builder itself
//! never indexes by raw label.

use std::collections::BTreeSet;

use thiserror::Error;

/// Identifier assigned to a cluster within one layer.
///
/// # Examples
/// ```
/// use clustree_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl From<u64> for ClusterId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Error returned when cluster identifiers are not contiguous starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousClusterIds {
    /// The assignments do not include cluster `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// The assignments skip identifiers.
    #[error("cluster identifiers must be contiguous without gaps")]
    Gap,
    /// The assignments require identifiers beyond the host pointer width.
    #[error("cluster identifiers exceed or reach the host pointer-width limit")]
    Overflow,
}

/// Cluster assignments for every point of one layer.
///
/// # Examples
/// ```
/// use clustree_core::{Clustering, ClusterId};
///
/// let clustering = Clustering::from_labels([0, 0, 2, 1]);
/// assert_eq!(clustering.len(), 4);
/// assert_eq!(clustering.cluster_count(), 3);
/// assert_eq!(clustering.cluster_ids()[2], ClusterId::new(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    labels: Vec<ClusterId>,
    cluster_ids: Vec<ClusterId>,
}

impl Clustering {
    /// Builds a clustering from explicit cluster assignments.
    ///
    /// No contiguity check is applied here; see
    /// [`Self::validate_contiguous`].
    #[must_use]
    pub fn new(labels: Vec<ClusterId>) -> Self {
        let cluster_ids = labels
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            labels,
            cluster_ids,
        }
    }

    /// Builds a clustering from raw numeric labels.
    #[must_use]
    pub fn from_labels(labels: impl IntoIterator<Item = u64>) -> Self {
        Self::new(labels.into_iter().map(ClusterId::new).collect())
    }

    /// Number of points assigned by this clustering.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the clustering assigns no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the assignments in point order.
    #[must_use]
    pub fn labels(&self) -> &[ClusterId] {
        &self.labels
    }

    /// Returns the distinct cluster ids in ascending order.
    #[must_use]
    pub fn cluster_ids(&self) -> &[ClusterId] {
        &self.cluster_ids
    }

    /// Counts the distinct clusters used by the assignments.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_ids.len()
    }

    /// Counts the points assigned to `id`.
    ///
    /// # Examples
    /// ```
    /// use clustree_core::{Clustering, ClusterId};
    ///
    /// let clustering = Clustering::from_labels([0, 1, 1]);
    /// assert_eq!(clustering.size_of(ClusterId::new(1)), 2);
    /// assert_eq!(clustering.size_of(ClusterId::new(5)), 0);
    /// ```
    #[must_use]
    pub fn size_of(&self, id: ClusterId) -> usize {
        self.labels.iter().filter(|&&label| label == id).count()
    }

    /// Position of `id` in [`Self::cluster_ids`].
    #[must_use]
    pub fn rank_of(&self, id: ClusterId) -> Option<usize> {
        self.cluster_ids.binary_search(&id).ok()
    }

    /// Checks that the ids used are exactly `0..cluster_count()`.
    ///
    /// An empty clustering is accepted.
    ///
    /// # Errors
    /// Returns [`NonContiguousClusterIds::MissingZero`] when cluster `0` is
    /// absent, [`NonContiguousClusterIds::Gap`] when ids skip values, and
    /// [`NonContiguousClusterIds::Overflow`] when the largest id does not fit
    /// the host pointer width.
    ///
    /// # Examples
    /// ```
    /// use clustree_core::{Clustering, NonContiguousClusterIds};
    ///
    /// assert!(Clustering::from_labels([1, 0, 1]).validate_contiguous().is_ok());
    /// assert_eq!(
    ///     Clustering::from_labels([1, 2]).validate_contiguous(),
    ///     Err(NonContiguousClusterIds::MissingZero),
    /// );
    /// assert_eq!(
    ///     Clustering::from_labels([0, 2]).validate_contiguous(),
    ///     Err(NonContiguousClusterIds::Gap),
    /// );
    /// ```
    pub fn validate_contiguous(&self) -> Result<(), NonContiguousClusterIds> {
        let (Some(first), Some(last)) = (self.cluster_ids.first(), self.cluster_ids.last()) else {
            return Ok(());
        };
        if first.get() != 0 {
            return Err(NonContiguousClusterIds::MissingZero);
        }
        let max_id = usize::try_from(last.get()).map_err(|_| NonContiguousClusterIds::Overflow)?;
        let expected = max_id
            .checked_add(1)
            .ok_or(NonContiguousClusterIds::Overflow)?;
        if expected != self.cluster_ids.len() {
            return Err(NonContiguousClusterIds::Gap);
        }
        Ok(())
    }
}

impl From<Vec<u64>> for Clustering {
    fn from(labels: Vec<u64>) -> Self {
        Self::from_labels(labels)
    }
}

impl FromIterator<ClusterId> for Clustering {
    fn from_iter<I: IntoIterator<Item = ClusterId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
