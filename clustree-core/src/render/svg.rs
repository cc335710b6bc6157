//! SVG implementation of [`DrawingSurface`], drawn with `plotters`.

use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use plotters_svg::SVGBackend;

use crate::{
    display::{self, DisplayMode},
    error::DisplayError,
    render::{
        plan::{EdgeLabel, EdgeStroke, NodeMark},
        style::RenderStyle,
        surface::DrawingSurface,
    },
};

const EDGE_COLOUR: RGBColor = RGBColor(0x4a, 0x4a, 0x4a);
const LABEL_COLOUR: RGBColor = RGBColor(0x1a, 0x1a, 0x1a);
const FONT_FAMILY: &str = "sans-serif";

/// A drawing call already projected onto the canvas.
#[derive(Debug, Clone)]
enum Mark {
    Edge {
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
    },
    Node {
        centre: (i32, i32),
        radius: f64,
        fill: RGBColor,
    },
    Label {
        anchor: (i32, i32),
        text: String,
    },
}

/// Collects drawing calls and renders them as a standalone SVG document.
///
/// Layout `y` grows upwards, so the surface flips it onto the canvas.
///
/// # Examples
/// ```
/// use clustree_core::{ClusterTreeBuilder, Clustering, SvgSurface};
///
/// let builder = ClusterTreeBuilder::new();
/// let mut surface = SvgSurface::from_style(builder.style());
/// builder.draw(&[Clustering::from_labels([0, 1, 1])], &mut surface)?;
/// let svg = surface.to_svg_string()?;
/// assert!(svg.starts_with("<svg"));
/// assert_eq!(svg.matches("<circle").count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    margin: u32,
    font_size: f64,
    marks: Vec<Mark>,
}

impl SvgSurface {
    /// Creates an empty surface with the default margin and font size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_style(&RenderStyle::default().with_canvas(width, height))
    }

    /// Creates an empty surface sized and styled by `style`.
    #[must_use]
    pub fn from_style(style: &RenderStyle) -> Self {
        Self {
            width: style.width(),
            height: style.height(),
            margin: style.margin(),
            font_size: style.font_size(),
            marks: Vec::new(),
        }
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

    /// Renders the document drawn so far.
    ///
    /// # Errors
    /// Returns [`DisplayError::Render`] when the SVG backend rejects a mark.
    pub fn to_svg_string(&self) -> Result<String, DisplayError> {
        let mut document = String::new();
        {
            let root = SVGBackend::with_string(&mut document, (self.width, self.height))
                .into_drawing_area();
            self.paint(&root).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }
        Ok(document)
    }

    fn paint(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
        root.fill(&WHITE)?;
        let label_style = (FONT_FAMILY, self.font_size)
            .into_font()
            .color(&LABEL_COLOUR)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for mark in &self.marks {
            match mark {
                Mark::Edge { from, to, width } => root.draw(&PathElement::new(
                    vec![*from, *to],
                    ShapeStyle::from(&EDGE_COLOUR).stroke_width(*width),
                ))?,
                Mark::Node {
                    centre,
                    radius,
                    fill,
                } => root.draw(&Circle::new(
                    *centre,
                    *radius,
                    ShapeStyle::from(fill).filled(),
                ))?,
                Mark::Label { anchor, text } => {
                    root.draw(&Text::new(text.as_str(), *anchor, label_style.clone()))?;
                }
            }
        }
        Ok(())
    }

    /// Maps layout coordinates onto the canvas.
    #[expect(
        clippy::float_arithmetic,
        reason = "canvas projection is floating-point."
    )]
    fn project(&self, [x, y]: [f64; 2]) -> (f64, f64) {
        let margin = f64::from(self.margin);
        let plot_width = (f64::from(self.width) - 2.0 * margin).max(0.0);
        let plot_height = (f64::from(self.height) - 2.0 * margin).max(0.0);
        let px = margin + (x + 1.0) / 2.0 * plot_width;
        let py = f64::from(self.height) - margin - (y + 1.0) / 2.0 * plot_height;
        (px, py)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "projected points lie on a canvas sized in u32 pixels."
    )]
    fn pixel(&self, position: [f64; 2]) -> (i32, i32) {
        let (px, py) = self.project(position);
        (px.round() as i32, py.round() as i32)
    }
}

impl DrawingSurface for SvgSurface {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "stroke widths are clamped to at least one pixel before rounding."
    )]
    fn draw_edge(&mut self, edge: &EdgeStroke) {
        let mark = Mark::Edge {
            from: self.pixel(edge.from),
            to: self.pixel(edge.to),
            width: edge.width.round().max(1.0) as u32,
        };
        self.marks.push(mark);
    }

    /// The marker fills a circle inscribed in a square of area `node.area`.
    #[expect(
        clippy::float_arithmetic,
        reason = "marker radius is derived from its area."
    )]
    fn draw_node(&mut self, node: &NodeMark) {
        let mark = Mark::Node {
            centre: self.pixel(node.position),
            radius: node.area.max(0.0).sqrt() / 2.0,
            fill: parse_colour(&node.colour),
        };
        self.marks.push(mark);
    }

    fn draw_edge_label(&mut self, label: &EdgeLabel) {
        let mark = Mark::Label {
            anchor: self.pixel(label.position),
            text: label.text.clone(),
        };
        self.marks.push(mark);
    }

    fn present(&mut self, mode: &DisplayMode) -> Result<(), DisplayError> {
        display::present(&self.to_svg_string()?, "svg", mode)
    }
}

fn render_error<E>(err: DrawingAreaErrorKind<E>) -> DisplayError
where
    E: std::error::Error + Send + Sync,
{
    DisplayError::Render {
        message: err.to_string(),
    }
}

/// Parses `#rrggbb`, falling back to black.
fn parse_colour(hex: &str) -> RGBColor {
    let channel = |range: std::ops::Range<usize>| {
        hex.strip_prefix('#')
            .and_then(|digits| digits.get(range))
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(red), Some(green), Some(blue)) => RGBColor(red, green, blue),
        _ => BLACK,
    }
}
