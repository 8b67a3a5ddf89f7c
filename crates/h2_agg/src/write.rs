//! Types for writing AGG archives
//!

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexSet;
use std::io::{self, Cursor, Seek, Write};
use tracing::{instrument, Level};

use crate::error::{Error, Result};
use crate::types::{encode_name, AggRecord, DEFAULT_NAME_WIDTH};

/// AGG archive generator
///
/// ```
/// # fn doit() -> h2_agg::error::Result<()>
/// # {
/// # use h2_agg::AggWriter;
/// use std::io::Write;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let mut agg = AggWriter::new(std::io::Cursor::new(Vec::new()));
///
/// agg.start_file("KB.PAL")?;
/// agg.write_all(&[0x00; 768])?;
///
/// // Apply the changes you've made.
/// agg.finish()?;
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct AggWriter<W: Write + Seek> {
    inner: W,
    name_width: usize,
    writing_to_file: bool,
    names: IndexSet<String>,
    records: Vec<AggRecord>,
    data_block: Cursor<Vec<u8>>,
    name_block: Cursor<Vec<u8>>,
    record: AggRecord,
}

impl<W: Write + Seek> AggWriter<W> {
    /// Initializes the archive with the name width of the original game files.
    ///
    /// Before writing to this object, the [`AggWriter::start_file`] function should be called.
    pub fn new(inner: W) -> AggWriter<W> {
        Self::with_name_width(inner, DEFAULT_NAME_WIDTH)
    }

    /// Initializes the archive with name slots of `name_width` bytes.
    pub fn with_name_width(inner: W, name_width: usize) -> AggWriter<W> {
        AggWriter {
            inner,
            name_width,
            writing_to_file: false,
            names: IndexSet::new(),
            records: Vec::new(),
            data_block: Cursor::new(Vec::new()),
            name_block: Cursor::new(Vec::new()),
            record: AggRecord::default(),
        }
    }

    /// Returns true if a file is currently open for writing.
    pub const fn is_writing_file(&self) -> bool {
        self.writing_to_file
    }

    /// Start a new file.
    ///
    /// Names must be unique and fit in a name slot.
    #[instrument(skip(self, name), err)]
    pub fn start_file(&mut self, name: impl ToString) -> Result<()> {
        if self.writing_to_file {
            self.finish_file()?;
        }

        let name = name.to_string();
        if self.names.len() >= u16::MAX as usize {
            return Err(Error::TooManyFiles(self.names.len() + 1));
        }
        if self.names.contains(&name) {
            return Err(Error::DuplicateName(name));
        }

        self.name_block
            .write_all(&encode_name(&name, self.name_width)?)?;
        self.names.insert(name);

        // Offsets are relative to the data block until the directory size is known
        self.record = AggRecord {
            offset: self.data_offset()?,
            ..Default::default()
        };

        self.writing_to_file = true;

        Ok(())
    }

    #[instrument(skip(self), err)]
    fn finish_file(&mut self) -> Result<()> {
        self.record.size = self.data_offset()? - self.record.offset;
        self.records.push(self.record);
        self.writing_to_file = false;

        Ok(())
    }

    fn data_offset(&self) -> Result<u32> {
        u32::try_from(self.data_block.get_ref().len()).map_err(|_| Error::ArchiveTooLarge)
    }

    /// Finish the last file and write all other AGG file structures
    ///
    /// This will return the writer, but one should normally not append any data to the end of the file.
    #[instrument(skip(self), err)]
    pub fn finish(mut self) -> Result<W> {
        if self.writing_to_file {
            self.finish_file()?;
        }

        let count = self.records.len();
        let data_start = u32::try_from(2 + count * AggRecord::SIZE)
            .map_err(|_| Error::ArchiveTooLarge)?;

        self.inner.write_u16::<LittleEndian>(count as u16)?;
        for record in &self.records {
            AggRecord {
                offset: record
                    .offset
                    .checked_add(data_start)
                    .ok_or(Error::ArchiveTooLarge)?,
                ..*record
            }
            .write(&mut self.inner)?;
        }

        self.inner.write_all(self.data_block.get_ref())?;
        self.inner.write_all(self.name_block.get_ref())?;

        Ok(self.inner)
    }
}

impl<W: Write + Seek> Write for AggWriter<W> {
    #[instrument(skip_all, err, ret(level = Level::TRACE), fields(size=buf.len()) )]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writing_to_file {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No file has been started",
            ));
        }
        self.data_block.write(buf)
    }

    #[instrument(skip(self), err)]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
