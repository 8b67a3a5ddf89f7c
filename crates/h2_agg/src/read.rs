//! Types for reading AGG archives
//!

use binrw::BinRead;
use bon::Builder;
use byteorder::{LittleEndian, ReadBytesExt};
use h2_icn::IcnEncoderOptions;
use indexmap::IndexMap;
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{Error, FormatViolation, Result},
    external::ExternalStore,
    types::{decode_name, AggRecord, DEFAULT_NAME_WIDTH},
};

/// Options for how an AGG file should be read
#[derive(Debug, Clone, Builder)]
pub struct AggOptions {
    /// Width of a slot in the name table
    #[builder(default = DEFAULT_NAME_WIDTH)]
    pub name_width: usize,

    /// Extension removed from the archive path to find its override directory
    #[builder(into, default = String::from("agg"))]
    pub archive_extension: String,

    /// How override directories are encoded
    #[builder(default)]
    pub encoder: IcnEncoderOptions,
}

impl Default for AggOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Location of an entry's data in the archive
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AggEntry {
    /// Offset of the data from the start of the file
    pub offset: u32,

    /// Size of the data
    pub size: u32,
}

/// AGG archive reader
///
/// Entries are looked up by name. When an override exists for an entry, its bytes are returned
/// instead of the archive's.
///
/// ```no_run
/// fn dump_palette() -> h2_agg::error::Result<()> {
///     let mut agg = h2_agg::AggArchive::open("HEROES2.AGG")?;
///
///     let palette = agg.read_asset("KB.PAL");
///     println!("palette is {} bytes", palette.len());
///
///     Ok(())
/// }
/// ```
pub struct AggArchive<R> {
    reader: R,
    options: AggOptions,
    files: IndexMap<Box<str>, AggEntry>,
    externals: ExternalStore,
}

impl AggArchive<BufReader<File>> {
    /// Open an archive from disk and collect the overrides next to it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, AggOptions::default())
    }

    /// Open an archive from disk with the given options and collect the overrides next to it
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn open_with_options(path: impl AsRef<Path>, options: AggOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut agg = AggArchive::with_options(BufReader::new(file), options)?;
        if agg.collect_externals(path) {
            info!("{} overrides found", agg.externals.len());
        }

        Ok(agg)
    }
}

impl<R: Read + Seek> AggArchive<R> {
    /// Read an AGG archive with the default options collecting the entries it contains.
    pub fn new(reader: R) -> Result<AggArchive<R>> {
        Self::with_options(reader, AggOptions::default())
    }

    /// Read an AGG archive collecting the entries it contains.
    ///
    /// No overrides are collected, see [`AggArchive::collect_externals`].
    pub fn with_options(mut reader: R, options: AggOptions) -> Result<AggArchive<R>> {
        let files = Self::get_entries(&mut reader, options.name_width)?;

        Ok(AggArchive {
            reader,
            options,
            files,
            externals: ExternalStore::default(),
        })
    }

    /// Replace the overrides with the ones found next to `archive_path`.
    ///
    /// Returns whether any override was found.
    pub fn collect_externals(&mut self, archive_path: impl AsRef<Path>) -> bool {
        self.externals = ExternalStore::collect(
            archive_path,
            &self.options.archive_extension,
            &self.options.encoder,
        );
        !self.externals.is_empty()
    }

    /// Use `externals` as the overrides of this archive
    pub fn with_externals(mut self, externals: ExternalStore) -> Self {
        self.externals = externals;
        self
    }

    /// Number of entries contained in this AGG.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this AGG archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the entry names in directory order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_ref())
    }

    /// Returns an iterator over all entries in directory order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AggEntry)> {
        self.files.iter().map(|(name, entry)| (name.as_ref(), entry))
    }

    /// Get the location of an entry by name, if it's present.
    pub fn by_name(&self, name: &str) -> Option<&AggEntry> {
        self.files.get(name)
    }

    /// The overrides of this archive
    pub fn externals(&self) -> &ExternalStore {
        &self.externals
    }

    /// The options this archive was read with
    pub fn options(&self) -> &AggOptions {
        &self.options
    }

    /// Read an asset, preferring its override.
    ///
    /// Names that are missing or have a size of zero yield an empty buffer, as does a failure to
    /// read from the underlying file.
    pub fn read_asset(&mut self, name: &str) -> Vec<u8> {
        self.try_read(name).unwrap_or_else(|err| {
            warn!("unable to read {name}: {err}");
            Vec::new()
        })
    }

    /// Read an asset, preferring its override.
    ///
    /// Like [`AggArchive::read_asset`] but reports I/O failures.
    #[instrument(skip(self))]
    pub fn try_read(&mut self, name: &str) -> Result<Vec<u8>> {
        let Some(entry) = self.files.get(name).copied() else {
            return Ok(Vec::new());
        };

        if entry.size == 0 {
            return Ok(Vec::new());
        }

        if let Some(external) = self.externals.get(name) {
            info!("using external version of {name}");
            return Ok(external.data().to_vec());
        }

        self.read_entry(entry)
    }

    /// Read the archive's bytes for an entry, ignoring any override
    pub fn read_raw(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .files
            .get(name)
            .copied()
            .ok_or_else(|| Error::FileNotFound(name.to_owned()))?;

        self.read_entry(entry)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_entry(&mut self, entry: AggEntry) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(entry.offset as u64))?;

        let mut data = Vec::new();
        (&mut self.reader)
            .take(entry.size as u64)
            .read_to_end(&mut data)?;

        if data.len() != entry.size as usize {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("entry holds {} of {} bytes", data.len(), entry.size),
            )
            .into());
        }

        Ok(data)
    }

    fn get_records(reader: &mut R, count: usize) -> Result<Vec<AggRecord>> {
        (0..count)
            .map(|_| AggRecord::read(reader).map_err(Error::from))
            .collect()
    }

    fn get_names(reader: &mut R, count: usize, name_width: usize) -> Result<Vec<Box<str>>> {
        let mut slot = vec![0u8; name_width];
        (0..count)
            .map(|_| -> Result<Box<str>> {
                reader.read_exact(&mut slot)?;
                Ok(decode_name(&slot))
            })
            .collect()
    }

    fn get_entries(reader: &mut R, name_width: usize) -> Result<IndexMap<Box<str>, AggEntry>> {
        let size = reader.seek(SeekFrom::End(0))?;
        reader.rewind()?;

        let count = reader.read_u16::<LittleEndian>()? as usize;
        debug!(count, size, "read archive header");

        if (count * (AggRecord::SIZE + name_width)) as u64 >= size {
            return Err(FormatViolation::TooManyEntries { count, size }.into());
        }

        let records = Self::get_records(reader, count)?;

        reader.seek(SeekFrom::Start(size - (count * name_width) as u64))?;
        let names = Self::get_names(reader, count, name_width)?;

        let mut files = IndexMap::with_capacity(count);
        for (record, name) in records.into_iter().zip(names) {
            if record.offset as u64 + record.size as u64 > size {
                return Err(FormatViolation::EntryOutOfBounds {
                    name: name.into(),
                    offset: record.offset,
                    size: record.size,
                    file_size: size,
                }
                .into());
            }

            files.entry(name).or_insert(AggEntry {
                offset: record.offset,
                size: record.size,
            });
        }

        if files.len() != count {
            return Err(FormatViolation::DuplicateNames {
                count,
                unique: files.len(),
            }
            .into());
        }

        Ok(files)
    }
}
