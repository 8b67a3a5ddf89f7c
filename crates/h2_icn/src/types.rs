//! Base types for structure of an ICN sprite container.

use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};

/// Sentinel written between every frame header and its pixels
pub const FRAME_MARKER: [u8; 3] = [0xAB, 0xCD, 0xEF];

/// Pixel data is stored as RGBA
pub const BYTES_PER_PIXEL: usize = 4;

/// ICN container header
///
/// Precedes the frame data region. All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct IcnHeader {
    /// The number of frames stored in the container
    pub frames: u16,

    /// The size of the frame data region following this header
    pub total_size: u32,
}

impl IcnHeader {
    /// Encoded size of the header
    pub const SIZE: usize = 6;
}

/// ICN frame header
///
/// Describes the geometry of one frame and where its data starts
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct IcnFrameHeader {
    /// Horizontal draw offset of the frame
    pub offset_x: u16,

    /// Vertical draw offset of the frame
    pub offset_y: u16,

    /// Width of the frame in pixels
    pub width: u16,

    /// Height of the frame in pixels
    pub height: u16,

    /// Number of animation frames following this one
    pub animation_frames: u8,

    /// Offset from the start of the frame data region to the end of this header
    pub pixel_data_offset: u32,
}

impl IcnFrameHeader {
    /// Encoded size of a frame header
    pub const SIZE: usize = 13;

    /// Number of bytes of RGBA data the frame carries
    pub fn pixel_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Number of bytes the whole frame occupies in the frame data region
    pub fn frame_len(&self) -> usize {
        Self::SIZE + FRAME_MARKER.len() + self.pixel_len()
    }
}

/// A single frame of a sprite container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcnFrame {
    /// Geometry of the frame
    pub header: IcnFrameHeader,

    /// Row-major RGBA pixels, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl IcnFrame {
    /// Create a frame from raw RGBA pixels.
    ///
    /// The pixel data offset is left at zero, it is assigned when the frame is written.
    pub fn new(width: u16, height: u16, pixels: Vec<u8>) -> Result<Self> {
        let header = IcnFrameHeader {
            width,
            height,
            ..Default::default()
        };

        if pixels.len() != header.pixel_len() {
            return Err(Error::InvalidPixelData {
                expected: header.pixel_len(),
                actual: pixels.len(),
            });
        }

        Ok(Self { header, pixels })
    }

    /// Create a frame from a decoded image
    pub fn from_rgba(image: image::RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(Error::FrameTooLarge { width, height });
        };
        Self::new(w, h, image.into_raw())
    }

    /// Width of the frame in pixels
    pub fn width(&self) -> u16 {
        self.header.width
    }

    /// Height of the frame in pixels
    pub fn height(&self) -> u16 {
        self.header.height
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{IcnFrame, IcnFrameHeader, IcnHeader};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x02, 0x00,
            0x30, 0x00, 0x00, 0x00,
        ]);

        let expected = IcnHeader {
            frames: 2,
            total_size: 48,
        };

        assert_eq!(IcnHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_frame_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x00, 0x00,
            0x00, 0x00,
            0x02, 0x00,
            0x03, 0x00,
            0x00,
            0x2D, 0x00, 0x00, 0x00,
        ];

        let header = IcnFrameHeader {
            width: 2,
            height: 3,
            pixel_data_offset: 45,
            ..Default::default()
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual.len(), IcnFrameHeader::SIZE);
        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_frame_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00,
            0x02, 0x00,
            0x10, 0x00,
            0x20, 0x00,
            0x05,
            0x0D, 0x00, 0x00, 0x00,
        ]);

        let expected = IcnFrameHeader {
            offset_x: 1,
            offset_y: 2,
            width: 16,
            height: 32,
            animation_frames: 5,
            pixel_data_offset: 13,
        };

        let header = IcnFrameHeader::read(&mut input)?;
        assert_eq!(header, expected);
        assert_eq!(header.pixel_len(), 16 * 32 * 4);
        assert_eq!(header.frame_len(), 13 + 3 + 16 * 32 * 4);

        Ok(())
    }

    #[test]
    fn frame_rejects_short_pixels() {
        let frame = IcnFrame::new(2, 2, vec![0; 15]);
        assert!(matches!(
            frame,
            Err(Error::InvalidPixelData {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn frame_rejects_oversized_image() {
        let image = image::RgbaImage::new(70_000, 1);
        assert!(matches!(
            IcnFrame::from_rgba(image),
            Err(Error::FrameTooLarge {
                width: 70_000,
                height: 1
            })
        ));
    }
}
