//! Base types for structure of AGG file.

use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};

/// Width of a name slot in the archives shipped with the game
pub const DEFAULT_NAME_WIDTH: usize = 15;

/// AGG directory record
///
/// Defines where an entry's data lives in the file. All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct AggRecord {
    /// Legacy field, historically a checksum of the name. Ignored when reading
    pub checksum: u32,

    /// The offset to the data for this record from the start of the file
    pub offset: u32,

    /// The size of this record's data
    pub size: u32,
}

impl AggRecord {
    /// Encoded size of a directory record
    pub const SIZE: usize = 12;
}

/// Decode a name slot; the name ends at the first NUL or at the end of the slot
pub fn decode_name(slot: &[u8]) -> Box<str> {
    let end = slot.iter().position(|&c| c == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..end]).into()
}

/// Encode a name into a NUL padded slot of `width` bytes
pub fn encode_name(name: &str, width: usize) -> Result<Vec<u8>> {
    let bytes = name.as_bytes();
    if bytes.len() > width {
        return Err(Error::NameTooLong {
            name: name.to_owned(),
            width,
        });
    }

    let mut slot = vec![0u8; width];
    slot[..bytes.len()].copy_from_slice(bytes);
    Ok(slot)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{decode_name, encode_name, AggRecord};

    #[test]
    fn read_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0xEF, 0xBE, 0xAD, 0xDE,
            0x14, 0x00, 0x00, 0x00,
            0x64, 0x00, 0x00, 0x00,
        ]);

        let expected = AggRecord {
            checksum: 0xDEADBEEF,
            offset: 20,
            size: 100,
        };

        assert_eq!(AggRecord::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_record() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x00, 0x00,
            0x78, 0x00, 0x00, 0x00,
            0x32, 0x00, 0x00, 0x00,
        ];

        let record = AggRecord {
            offset: 120,
            size: 50,
            ..Default::default()
        };

        let mut actual = Vec::new();
        record.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual.len(), AggRecord::SIZE);
        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn name_slots() -> Result<()> {
        assert_eq!(&*decode_name(b"ICNHERO\0"), "ICNHERO");
        assert_eq!(&*decode_name(b"AUDIOBKG"), "AUDIOBKG");
        assert_eq!(&*decode_name(b"KB.PAL\0\0GARBAGE"), "KB.PAL");
        assert_eq!(&*decode_name(b"\0\0\0\0"), "");

        assert_eq!(encode_name("KB.PAL", 8)?, b"KB.PAL\0\0".to_vec());
        assert_eq!(encode_name("AUDIOBKG", 8)?, b"AUDIOBKG".to_vec());
        assert!(matches!(
            encode_name("HEROES.ICN", 8),
            Err(Error::NameTooLong { width: 8, .. })
        ));

        Ok(())
    }
}
