//! This library handles building and reading **ICN** sprite containers used by *Heroes of Might and Magic II*.
//!
//! # ICN Sprite Container Documentation
//!
//! An ICN container bundles several image frames (the animation frames of a unit, the icons of a
//! button bar, ...) into a single blob which is stored as one entry of an AGG archive. This crate
//! rebuilds such a blob from a directory of decoded images so that it can be served as an override
//! in place of the archive's original entry.
//!
//! ## File Structure
//!
//! A container consists of a 6 byte header followed by the frame data region.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Frame Count            | 2 bytes: Number of frames in the container                 |
//! | 0x0002         | Total Size             | 4 bytes: Size of the frame data region (excludes header)   |
//!
//! ### Frames
//!
//! Frames are stored back to back in the frame data region, in the order of their source images.
//! Each frame is a 13 byte header, a 3 byte marker and the frame's pixels.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Offset X               | 2 bytes: Horizontal draw offset (always 0)              |
//! | 0x0002         | Offset Y               | 2 bytes: Vertical draw offset (always 0)                |
//! | 0x0004         | Width                  | 2 bytes: Width of the frame in pixels                   |
//! | 0x0006         | Height                 | 2 bytes: Height of the frame in pixels                  |
//! | 0x0008         | Animation Frames       | 1 byte: Animation frame count (always 0)                |
//! | 0x0009         | Pixel Data Offset      | 4 bytes: See below                                      |
//! | 0x000D         | Marker                 | 3 bytes: `AB CD EF`                                     |
//! | 0x0010         | Pixels                 | (Width * Height * 4) bytes: RGBA, row-major             |
//!
//! - **Pixel Data Offset**: The position of the end of this frame's header, measured from the start
//!   of the frame data region (**not** from the start of the blob). For the first frame it is always
//!   `13`, for the next one it is the length of the first frame plus `13`, and so on.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Frame order**: Source images sorted by file name
//!

pub mod encode;
pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use encode::{IcnEncoder, IcnEncoderOptions};
pub use read::IcnSprite;
pub use types::IcnFrame;
pub use write::IcnWriter;
