//! Visual parameters shared by render plans and surfaces.

/// Categorical palette used to colour layers, cycling when exhausted.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Fractions along an edge at which the three label groups are anchored.
pub const DEFAULT_LABEL_POSITIONS: [f64; 3] = [0.2, 0.5, 0.8];

/// Visual parameters for drawing a cluster tree.
///
/// `node_scale` is the area, in square pixels, of the square bounding the
/// circular marker of a node holding every point; `edge_scale` is the stroke width, in pixels, of an edge carrying
/// every point.
///
/// # Examples
/// ```
/// use clustree_core::RenderStyle;
///
/// let style = RenderStyle::default().with_canvas(800, 600).with_node_scale(1500.0);
/// assert_eq!(style.width(), 800);
/// assert_eq!(style.node_scale(), 1500.0);
/// assert_eq!(style.colour_for_layer(11), "#ff7f0e");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    width: u32,
    height: u32,
    margin: u32,
    node_scale: f64,
    edge_scale: f64,
    label_positions: [f64; 3],
    font_size: f64,
    palette: Vec<String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 960,
            height: 720,
            margin: 60,
            node_scale: 2000.0,
            edge_scale: 50.0,
            label_positions: DEFAULT_LABEL_POSITIONS,
            font_size: 12.0,
            palette: DEFAULT_PALETTE.iter().map(|&colour| colour.to_owned()).collect(),
        }
    }
}

impl RenderStyle {
    /// Overrides the canvas size in pixels.
    #[must_use]
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Overrides the blank border kept around the plot area.
    #[must_use]
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Overrides the node area scale.
    #[must_use]
    pub fn with_node_scale(mut self, scale: f64) -> Self {
        self.node_scale = scale;
        self
    }

    /// Overrides the edge width scale.
    #[must_use]
    pub fn with_edge_scale(mut self, scale: f64) -> Self {
        self.edge_scale = scale;
        self
    }

    /// Overrides where each label group sits along its edge.
    #[must_use]
    pub fn with_label_positions(mut self, positions: [f64; 3]) -> Self {
        self.label_positions = positions;
        self
    }

    /// Overrides the label font size in pixels.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Replaces the layer palette. An empty palette keeps the current one.
    #[must_use]
    pub fn with_palette<I, C>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let colours: Vec<String> = palette.into_iter().map(Into::into).collect();
        if !colours.is_empty() {
            self.palette = colours;
        }
        self
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Border around the plot area in pixels.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Node area scale.
    #[must_use]
    pub const fn node_scale(&self) -> f64 {
        self.node_scale
    }

    /// Edge width scale.
    #[must_use]
    pub const fn edge_scale(&self) -> f64 {
        self.edge_scale
    }

    /// Anchor fractions of the three label groups.
    #[must_use]
    pub const fn label_positions(&self) -> [f64; 3] {
        self.label_positions
    }

    /// Label font size in pixels.
    #[must_use]
    pub const fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Colour assigned to `layer`.
    #[must_use]
    pub fn colour_for_layer(&self, layer: usize) -> &str {
        self.palette
            .get(layer % self.palette.len().max(1))
            .map_or("#000000", String::as_str)
    }
}
