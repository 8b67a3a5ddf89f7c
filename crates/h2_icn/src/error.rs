//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// unable to decode {path}
    #[error("unable to decode {}", .path.display())]
    #[diagnostic(help("only images with the configured extension are decoded"))]
    DecodeError {
        /// The image that failed to decode
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// {0} frames do not fit in a sprite container
    #[error("{0} frames do not fit in a sprite container")]
    TooManyFrames(usize),

    /// frame of {width}x{height} exceeds the maximum dimensions
    #[error("frame of {width}x{height} exceeds the maximum dimensions")]
    FrameTooLarge {
        /// Width of the source image
        width: u32,
        /// Height of the source image
        height: u32,
    },

    /// pixel buffer does not match the frame dimensions
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    InvalidPixelData {
        /// Bytes required by the frame dimensions
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// frame data region of {0} bytes exceeds the container limit
    #[error("frame data region of {0} bytes exceeds the container limit")]
    SpriteTooLarge(usize),

    /// file is an invalid sprite container
    #[error("invalid sprite container: {0}")]
    InvalidSprite(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
