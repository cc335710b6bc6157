//! Configuration and entry points for building cluster trees.
//!
//! [`ClusterTreeBuilder`] validates a sequence of clusterings, tallies cluster
//! sizes and transitions, lays the tree out, and optionally draws it.

use std::fmt;

use tracing::{Span, debug, field, instrument, warn};

use crate::{
    Result,
    clustering::Clustering,
    display::DisplayMode,
    error::{ClustreeError, DrawError},
    render::{style::RenderStyle, surface::DrawingSurface},
    transition::{LayerTally, TransitionMatrix},
    tree::ClusterTree,
};

/// Which layers must use zero-based contiguous cluster ids.
///
/// Tallies never index by raw label, so layers left unchecked by
/// [`LayerValidation::FirstLayerOnly`] still produce correct trees.
///
/// # Examples
/// ```
/// use clustree_core::LayerValidation;
///
/// assert_eq!(LayerValidation::default(), LayerValidation::AllLayers);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayerValidation {
    /// Every layer is checked.
    #[default]
    AllLayers,
    /// Only layer 0 is checked; later layers may use any ids.
    FirstLayerOnly,
}

impl fmt::Display for LayerValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AllLayers => "all-layers",
            Self::FirstLayerOnly => "first-layer-only",
        })
    }
}

/// Builds and draws cluster trees.
///
/// # Examples
/// ```
/// use clustree_core::{ClusterTreeBuilder, Clustering, DisplayMode, LayerValidation};
///
/// let builder = ClusterTreeBuilder::new()
///     .with_validation(LayerValidation::FirstLayerOnly)
///     .with_display(DisplayMode::ReturnOnly);
/// let tree = builder.build(&[
///     Clustering::from_labels([0, 0, 1]),
///     Clustering::from_labels([3, 7, 7]),
/// ])?;
/// assert_eq!(tree.graph().node_count(), 4);
/// # Ok::<(), clustree_core::ClustreeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterTreeBuilder {
    validation: LayerValidation,
    style: RenderStyle,
    display: DisplayMode,
}

impl ClusterTreeBuilder {
    /// Creates a builder that validates every layer, uses the default
    /// style, and leaves figures on their surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides which layers are validated.
    #[must_use]
    pub fn with_validation(mut self, validation: LayerValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Overrides the render style.
    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Overrides what happens to a drawn figure.
    #[must_use]
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Returns the configured validation policy.
    #[must_use]
    pub const fn validation(&self) -> LayerValidation {
        self.validation
    }

    /// Returns the configured render style.
    #[must_use]
    pub const fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Returns the configured display mode.
    #[must_use]
    pub const fn display(&self) -> &DisplayMode {
        &self.display
    }

    /// Tallies `clusterings` into a graph and its layout.
    ///
    /// # Errors
    /// Returns [`ClustreeError::NoClusterings`] for an empty sequence,
    /// [`ClustreeError::EmptyClustering`] when layer 0 assigns no points,
    /// [`ClustreeError::LengthMismatch`] when a layer's length differs from
    /// layer 0, and [`ClustreeError::NonContiguousLayer`] when a validated
    /// layer's ids are not `0..k`.
    #[instrument(
        name = "core.build",
        err,
        skip(self, clusterings),
        fields(
            layers = clusterings.len(),
            points = field::Empty,
            validation = %self.validation,
        ),
    )]
    pub fn build(&self, clusterings: &[Clustering]) -> Result<ClusterTree> {
        let first = clusterings.first().ok_or(ClustreeError::NoClusterings)?;
        let n_points = first.len();
        Span::current().record("points", n_points);
        if n_points == 0 {
            return Err(ClustreeError::EmptyClustering);
        }
        self.validate(clusterings, n_points)?;

        let layers: Vec<LayerTally> = clusterings
            .iter()
            .enumerate()
            .map(|(layer, clustering)| {
                let tally = LayerTally::from_clustering(layer, clustering);
                debug!(layer, clusters = tally.cluster_count(), "layer tallied");
                tally
            })
            .collect();
        let transitions: Vec<TransitionMatrix> = clusterings
            .iter()
            .zip(clusterings.iter().skip(1))
            .enumerate()
            .map(|(from_layer, (previous, current))| {
                TransitionMatrix::tally(from_layer, previous, current)
            })
            .collect();

        let tree = ClusterTree::assemble(n_points, layers, transitions);
        debug!(
            nodes = tree.graph().node_count(),
            edges = tree.graph().edge_count(),
            "cluster tree assembled"
        );
        Ok(tree)
    }

    /// Builds the tree, draws it onto `surface`, and presents the figure
    /// according to [`Self::display`].
    ///
    /// # Errors
    /// Returns [`DrawError::Build`] for any error [`Self::build`] reports and
    /// [`DrawError::Display`] when the figure cannot be presented.
    #[instrument(
        name = "core.draw",
        err,
        skip(self, clusterings, surface),
        fields(display = %self.display),
    )]
    pub fn draw<S>(
        &self,
        clusterings: &[Clustering],
        surface: &mut S,
    ) -> core::result::Result<ClusterTree, DrawError>
    where
        S: DrawingSurface + ?Sized,
    {
        let tree = self.build(clusterings)?;
        tree.render_plan(&self.style).replay(surface);
        surface.present(&self.display)?;
        Ok(tree)
    }

    fn validate(&self, clusterings: &[Clustering], n_points: usize) -> Result<()> {
        for (layer, clustering) in clusterings.iter().enumerate() {
            if clustering.len() != n_points {
                return Err(ClustreeError::LengthMismatch {
                    layer,
                    expected: n_points,
                    actual: clustering.len(),
                });
            }
            let checked = layer == 0 || self.validation == LayerValidation::AllLayers;
            match clustering.validate_contiguous() {
                Ok(()) => {}
                Err(reason) if checked => {
                    return Err(ClustreeError::NonContiguousLayer { layer, reason });
                }
                Err(reason) => {
                    warn!(layer, %reason, "accepting non-contiguous cluster ids");
                }
            }
        }
        Ok(())
    }
}
