//! Error types for the clustree core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

use crate::clustering::NonContiguousClusterIds;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while tallying clusterings into a [`crate::ClusterTree`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ClustreeError {
    /// No clusterings were supplied.
    #[error("at least one clustering is required")]
    NoClusterings,
    /// The clusterings cover zero points.
    #[error("clusterings must assign at least one point")]
    EmptyClustering,
    /// A layer assigns a different number of points than layer 0.
    #[error("layer {layer} has {actual} points but layer 0 has {expected}")]
    LengthMismatch {
        /// Index of the offending layer.
        layer: usize,
        /// Number of points in layer 0.
        expected: usize,
        /// Number of points in the offending layer.
        actual: usize,
    },
    /// A validated layer does not use zero-based contiguous cluster ids.
    #[error("layer {layer} has invalid cluster ids: {reason}")]
    NonContiguousLayer {
        /// Index of the offending layer.
        layer: usize,
        #[source]
        /// Which contiguity rule the layer broke.
        reason: NonContiguousClusterIds,
    },
}

define_error_codes! {
    /// Stable codes describing [`ClustreeError`] variants.
    enum ClustreeErrorCode for ClustreeError {
        /// No clusterings were supplied.
        NoClusterings => NoClusterings => "CLUSTREE_NO_CLUSTERINGS",
        /// The clusterings cover zero points.
        EmptyClustering => EmptyClustering => "CLUSTREE_EMPTY_CLUSTERING",
        /// A layer assigns a different number of points than layer 0.
        LengthMismatch => LengthMismatch { .. } => "CLUSTREE_LENGTH_MISMATCH",
        /// A validated layer does not use zero-based contiguous cluster ids.
        NonContiguousLayer => NonContiguousLayer { .. } => "CLUSTREE_NON_CONTIGUOUS_LAYER",
    }
}

impl ClustreeError {
    /// Retrieve the layer index the error refers to, when there is one.
    #[must_use]
    pub const fn layer(&self) -> Option<usize> {
        match self {
            Self::LengthMismatch { layer, .. } | Self::NonContiguousLayer { layer, .. } => {
                Some(*layer)
            }
            _ => None,
        }
    }
}

/// Error produced while presenting a rendered figure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing the figure to disk failed.
    #[error("failed to write figure to `{path}`: {source}")]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A temporary file for the interactive viewer could not be created.
    #[error("failed to create temporary figure file: {source}")]
    TempFile {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The viewer process could not be started.
    #[error("failed to launch viewer `{command}`: {source}")]
    ViewerLaunch {
        /// Program that failed to start.
        command: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The viewer process exited unsuccessfully.
    #[error("viewer `{command}` exited with {status}")]
    ViewerFailed {
        /// Program that reported failure.
        command: String,
        /// Exit status reported by the viewer.
        status: ExitStatus,
    },
    /// The viewer command override was blank.
    #[error("viewer command override is empty")]
    EmptyViewerCommand,
    /// The drawing backend rejected the figure.
    #[error("failed to render figure: {message}")]
    Render {
        /// Backend error message.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisplayError`] variants.
    enum DisplayErrorCode for DisplayError {
        /// Writing the figure to disk failed.
        Write => Write { .. } => "DISPLAY_WRITE_FAILED",
        /// A temporary file for the interactive viewer could not be created.
        TempFile => TempFile { .. } => "DISPLAY_TEMP_FILE_FAILED",
        /// The viewer process could not be started.
        ViewerLaunch => ViewerLaunch { .. } => "DISPLAY_VIEWER_LAUNCH_FAILED",
        /// The viewer process exited unsuccessfully.
        ViewerFailed => ViewerFailed { .. } => "DISPLAY_VIEWER_FAILED",
        /// The viewer command override was blank.
        EmptyViewerCommand => EmptyViewerCommand => "DISPLAY_EMPTY_VIEWER_COMMAND",
        /// The drawing backend rejected the figure.
        Render => Render { .. } => "DISPLAY_RENDER_FAILED",
    }
}

/// Error returned by [`crate::ClusterTreeBuilder::draw`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DrawError {
    /// The clusterings could not be tallied.
    #[error(transparent)]
    Build(#[from] ClustreeError),
    /// The rendered figure could not be presented.
    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl DrawError {
    /// Return the stable code of the wrapped error.
    #[must_use]
    pub const fn code_str(&self) -> &'static str {
        match self {
            Self::Build(err) => err.code().as_str(),
            Self::Display(err) => err.code().as_str(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClustreeError>;
