//! The drawing surface a cluster tree is rendered onto.

use crate::{
    display::DisplayMode,
    error::DisplayError,
    render::plan::{EdgeLabel, EdgeStroke, NodeMark},
};

/// Destination for the drawing calls issued by [`crate::RenderPlan::replay`].
///
/// Coordinates arrive in layout space, `[-1, 1)` on both axes; surfaces
/// choose their own mapping onto the canvas. Calls arrive edges first, then
/// nodes, then labels.
///
/// # Examples
/// ```
/// use clustree_core::{
///     ClusterTreeBuilder, Clustering, DrawingSurface, EdgeLabel, EdgeStroke, NodeMark,
/// };
///
/// #[derive(Default)]
/// struct Counter { edges: usize, nodes: usize, labels: usize }
///
/// impl DrawingSurface for Counter {
///     fn draw_edge(&mut self, _edge: &EdgeStroke) { self.edges += 1; }
///     fn draw_node(&mut self, _node: &NodeMark) { self.nodes += 1; }
///     fn draw_edge_label(&mut self, _label: &EdgeLabel) { self.labels += 1; }
/// }
///
/// let clusterings = [
///     Clustering::from_labels([0, 0, 1, 1]),
///     Clustering::from_labels([0, 1, 1, 1]),
/// ];
/// let mut counter = Counter::default();
/// ClusterTreeBuilder::new().draw(&clusterings, &mut counter)?;
/// assert_eq!((counter.edges, counter.nodes, counter.labels), (3, 4, 3));
/// # Ok::<(), clustree_core::DrawError>(())
/// ```
pub trait DrawingSurface {
    /// Draws the line joining two clusters.
    fn draw_edge(&mut self, edge: &EdgeStroke);

    /// Draws a cluster marker.
    fn draw_node(&mut self, node: &NodeMark);

    /// Draws the weight of an edge.
    fn draw_edge_label(&mut self, label: &EdgeLabel);

    /// Presents the finished figure according to `mode`.
    ///
    /// Surfaces with nothing to present keep the default, which does nothing.
    ///
    /// # Errors
    /// Returns [`DisplayError`] when the figure cannot be written or shown.
    fn present(&mut self, mode: &DisplayMode) -> Result<(), DisplayError> {
        let _ = mode;
        Ok(())
    }
}
