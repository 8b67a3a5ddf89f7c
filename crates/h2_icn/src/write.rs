//! Types for writing ICN sprite containers
//!

use binrw::BinWrite;
use std::io::{Cursor, Write};
use tracing::{instrument, trace};

use crate::error::{Error, Result};
use crate::types::{IcnFrame, IcnFrameHeader, IcnHeader, FRAME_MARKER};

/// ICN sprite container generator
///
/// Frames are appended to an in-memory frame data region; the container header is prepended once
/// all frames are known.
///
/// ```
/// # fn doit() -> h2_icn::error::Result<()>
/// # {
/// use h2_icn::{IcnFrame, IcnWriter};
///
/// let mut icn = IcnWriter::new();
/// icn.add_frame(&IcnFrame::new(1, 1, vec![0xFF, 0x00, 0x00, 0xFF])?)?;
///
/// let blob = icn.finish()?;
/// assert_eq!(blob.len(), 6 + 13 + 3 + 4);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct IcnWriter {
    frames: usize,
    data: Cursor<Vec<u8>>,
}

impl IcnWriter {
    /// Creates an empty container
    pub fn new() -> IcnWriter {
        IcnWriter::default()
    }

    /// Number of frames added so far
    pub fn len(&self) -> usize {
        self.frames
    }

    /// Whether no frame has been added yet
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Size of the frame data region written so far
    pub fn region_len(&self) -> usize {
        self.data.get_ref().len()
    }

    /// Append a frame to the frame data region.
    ///
    /// The frame's pixel data offset is assigned from the current region length.
    #[instrument(skip_all, err, fields(width = frame.width(), height = frame.height()))]
    pub fn add_frame(&mut self, frame: &IcnFrame) -> Result<()> {
        if self.frames >= u16::MAX as usize {
            return Err(Error::TooManyFrames(self.frames + 1));
        }

        let running_offset = self.region_len();
        let pixel_data_offset = u32::try_from(running_offset + IcnFrameHeader::SIZE)
            .map_err(|_| Error::SpriteTooLarge(running_offset))?;

        let header = IcnFrameHeader {
            pixel_data_offset,
            ..frame.header
        };

        header.write(&mut self.data)?;
        self.data.write_all(&FRAME_MARKER)?;
        self.data.write_all(&frame.pixels)?;
        self.frames += 1;

        trace!(pixel_data_offset, region = self.region_len(), "frame added");

        Ok(())
    }

    /// Prepend the container header and return the finished blob
    #[instrument(skip(self), err, fields(frames = self.frames))]
    pub fn finish(self) -> Result<Vec<u8>> {
        let region = self.data.into_inner();

        let header = IcnHeader {
            frames: u16::try_from(self.frames).map_err(|_| Error::TooManyFrames(self.frames))?,
            total_size: u32::try_from(region.len())
                .map_err(|_| Error::SpriteTooLarge(region.len()))?,
        };

        let mut blob = Cursor::new(Vec::with_capacity(IcnHeader::SIZE + region.len()));
        header.write(&mut blob)?;
        blob.write_all(&region)?;

        Ok(blob.into_inner())
    }
}
