//! Error types that can be emitted from this library

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

    /// Transparent wrapper for [`h2_icn::error::Error`]
    #[error(transparent)]
    IcnError(#[from] h2_icn::error::Error),

    /// file is an invalid agg archive
    #[error("file is an invalid agg archive")]
    InvalidArchive(#[from] FormatViolation),

    /// unable to find requested file {0}
    #[error("unable to find requested file {0}")]
    FileNotFound(String),

    /// name {name} does not fit in {width} bytes
    #[error("name {name} does not fit in {width} bytes")]
    NameTooLong {
        /// The offending name
        name: String,
        /// Width of a name slot
        width: usize,
    },

    /// name {0} was already added to the archive
    #[error("name {0} was already added to the archive")]
    DuplicateName(String),

    /// archive cannot hold {0} entries
    #[error("archive cannot hold {0} entries")]
    TooManyFiles(usize),

    /// archive exceeds the 4 GiB addressable by its records
    #[error("archive exceeds the 4 GiB addressable by its records")]
    ArchiveTooLarge,
}

/// Details on why a file was rejected as an archive
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum FormatViolation {
    /// header claims more entries than the file can hold
    #[error("header claims {count} entries but the file is only {size} bytes")]
    TooManyEntries {
        /// Entry count from the header
        count: usize,
        /// Length of the file
        size: u64,
    },

    /// an entry's data lies past the end of the file
    #[error("entry {name} spans {offset}+{size} bytes but the file is only {file_size} bytes")]
    EntryOutOfBounds {
        /// Name of the entry
        name: String,
        /// Offset of the entry data
        offset: u32,
        /// Size of the entry data
        size: u32,
        /// Length of the file
        file_size: u64,
    },

    /// name table holds duplicate names
    #[error("{count} entries share {unique} distinct names")]
    DuplicateNames {
        /// Entry count from the header
        count: usize,
        /// Distinct names in the name table
        unique: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
