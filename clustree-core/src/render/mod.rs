//! Rendering of cluster trees: styles, plans, and drawing surfaces.

pub(crate) mod plan;
pub(crate) mod style;
pub(crate) mod surface;
pub(crate) mod svg;
