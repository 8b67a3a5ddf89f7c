//! This library handles reading from and creating **AGG** archives used by *Heroes of Might and Magic II*.
//!
//! # AGG Archive Format Documentation
//!
//! An AGG file bundles every asset of the game (sprites, sounds, palettes, data tables) into a
//! single container. Two of them ship with the game, `HEROES2.AGG` for the data files and
//! `HEROES2X.AGG` for the expansion, and each is opened on its own.
//!
//! ## File Structure
//!
//! An AGG file consists of an entry count, a directory of records, the data blocks and a name
//! table that occupies the very end of the file.
//!
//! | Offset (bytes)             | Field          | Description                                       |
//! |----------------------------|----------------|---------------------------------------------------|
//! | 0x0000                     | Entry Count    | 2 bytes: Number of entries in the archive         |
//! | 0x0002                     | Directory      | (Count * 12) bytes: One record per entry          |
//! | ...                        | Data           | Entry payloads, addressed by the records          |
//! | File Size - Count * Width  | Name Table     | (Count * Width) bytes: One name slot per entry    |
//!
//! ### Directory
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Legacy                 | 4 bytes: Historically a checksum, ignored when reading  |
//! | 0x0004         | Data Offset            | 4 bytes: Offset to the entry data from the file start   |
//! | 0x0008         | Data Size              | 4 bytes: Size of the entry data                         |
//!
//! ### Name Table
//!
//! Name slots are `Width` bytes wide (15 for the original game files) and NUL padded. The i-th
//! slot names the i-th directory record. A header whose entries could not possibly fit in the
//! file (`Count * (12 + Width) >= File Size`) marks the file as invalid, as does a name table with
//! duplicate names.
//!
//! ## Overrides
//!
//! Next to `HEROES2.AGG` a user may place a `HEROES2` directory. Each subdirectory named after an
//! archive entry (`HEROES.ICN`, case-insensitive) is turned into a replacement for that entry and
//! served instead of the archive's bytes. Only ICN sprite containers can be rebuilt this way, see
//! [`h2_icn`].
//!
//! ## Additional Information
//!
//! - **File Extension**: `.agg`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod external;
pub mod read;
pub mod types;
pub mod write;

pub use external::ExternalStore;
pub use read::{AggArchive, AggOptions};
pub use write::AggWriter;
