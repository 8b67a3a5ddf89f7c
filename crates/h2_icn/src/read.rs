//! Types for reading ICN sprite containers
//!

use binrw::BinRead;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::types::{IcnFrame, IcnFrameHeader, IcnHeader, FRAME_MARKER};

/// ICN sprite container reader
///
/// Parses a container produced by [`crate::IcnWriter`] and checks that every frame's pixel data
/// offset matches its position in the frame data region.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_frames(reader: impl Read + Seek) -> h2_icn::error::Result<()> {
///     let icn = h2_icn::IcnSprite::new(reader)?;
///
///     for frame in icn.frames() {
///         println!("{}x{}", frame.width(), frame.height());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IcnSprite {
    header: IcnHeader,
    frames: Vec<IcnFrame>,
}

impl IcnSprite {
    /// Read a sprite container and all of its frames
    pub fn new<R: Read + Seek>(mut reader: R) -> Result<IcnSprite> {
        let header = IcnHeader::read(&mut reader)?;

        let mut position = 0usize;
        let mut frames = Vec::with_capacity(header.frames as usize);
        for index in 0..header.frames {
            let frame_header = IcnFrameHeader::read(&mut reader)?;

            let expected = position + IcnFrameHeader::SIZE;
            if frame_header.pixel_data_offset as usize != expected {
                return Err(Error::InvalidSprite(format!(
                    "frame {index} has pixel data offset {}, expected {expected}",
                    frame_header.pixel_data_offset
                )));
            }

            let mut marker = [0u8; FRAME_MARKER.len()];
            reader.read_exact(&mut marker)?;
            if marker != FRAME_MARKER {
                return Err(Error::InvalidSprite(format!(
                    "frame {index} is missing its marker"
                )));
            }

            let len = frame_header.pixel_len();
            let mut pixels = Vec::new();
            (&mut reader).take(len as u64).read_to_end(&mut pixels)?;
            if pixels.len() != len {
                return Err(Error::InvalidSprite(format!(
                    "frame {index} holds {} of {len} bytes of pixel data",
                    pixels.len()
                )));
            }

            position += frame_header.frame_len();
            frames.push(IcnFrame {
                header: frame_header,
                pixels,
            });
        }

        if position != header.total_size as usize {
            return Err(Error::InvalidSprite(format!(
                "frame data region is {position} bytes, header claims {}",
                header.total_size
            )));
        }

        Ok(IcnSprite { header, frames })
    }

    /// Number of frames contained in this sprite
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether this sprite contains no frames
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The container header
    pub fn header(&self) -> &IcnHeader {
        &self.header
    }

    /// All frames in container order
    pub fn frames(&self) -> &[IcnFrame] {
        &self.frames
    }

    /// Get a frame by index
    pub fn by_index(&self, index: usize) -> Option<&IcnFrame> {
        self.frames.get(index)
    }
}
