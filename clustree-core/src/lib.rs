//! Cluster tree construction and rendering.
//!
//! Given several clusterings of the same points, [`ClusterTreeBuilder`]
//! produces a layered graph whose nodes are clusters, sized by population,
//! and whose edges count the points shared by clusters of adjacent layers.
//! The tree can be drawn onto any [`DrawingSurface`]; [`SvgSurface`] ships
//! with the crate.
//!
//! ```
//! use clustree_core::{ClusterTreeBuilder, Clustering, SvgSurface};
//!
//! let clusterings = [
//!     Clustering::from_labels([0, 0, 1, 1]),
//!     Clustering::from_labels([0, 1, 1, 1]),
//! ];
//! let builder = ClusterTreeBuilder::new();
//! let mut surface = SvgSurface::from_style(builder.style());
//! let tree = builder.draw(&clusterings, &mut surface)?;
//! let weights: Vec<usize> = tree.graph().edges().iter().map(|e| e.weight()).collect();
//! assert_eq!(weights, vec![1, 1, 2]);
//! # Ok::<(), clustree_core::DrawError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod agreement;
mod builder;
mod clustering;
mod display;
mod error;
mod graph;
mod layout;
mod render;
mod transition;
mod tree;

pub use crate::{
    agreement::LayerAgreement,
    builder::{ClusterTreeBuilder, LayerValidation},
    clustering::{ClusterId, Clustering, NonContiguousClusterIds},
    display::{DisplayMode, VIEWER_ENV, present},
    error::{
        ClustreeError, ClustreeErrorCode, DisplayError, DisplayErrorCode, DrawError, Result,
    },
    graph::{ClusterEdge, ClusterGraph, ClusterNode, NodeKey},
    layout::Positions,
    render::{
        plan::{EdgeLabel, EdgeStroke, LABEL_GROUPS, NodeMark, RenderPlan},
        style::{DEFAULT_LABEL_POSITIONS, DEFAULT_PALETTE, RenderStyle},
        surface::DrawingSurface,
        svg::SvgSurface,
    },
    transition::{ClusterSize, LayerTally, TransitionMatrix},
    tree::ClusterTree,
};
