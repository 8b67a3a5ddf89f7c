//! Rebuilding sprite containers from a directory of images
//!

use bon::Builder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::IcnFrame;
use crate::write::IcnWriter;

/// Options for how a directory should be turned into a sprite container
#[derive(Debug, Clone, Builder)]
pub struct IcnEncoderOptions {
    /// Extension of the source images, compared case-insensitively
    #[builder(into, default = String::from("png"))]
    pub image_extension: String,

    /// Directory that receives a copy of every encoded container for inspection
    #[builder(into)]
    pub dump_path: Option<PathBuf>,
}

impl Default for IcnEncoderOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Encodes every image of a directory into one sprite container
///
/// ```no_run
/// # fn doit() -> h2_icn::error::Result<()>
/// # {
/// use h2_icn::{IcnEncoder, IcnEncoderOptions};
///
/// let encoder = IcnEncoder::new(IcnEncoderOptions::builder().dump_path("/tmp/icn").build());
/// let blob = encoder.encode("HEROES2/HEROES.ICN")?;
/// println!("{} bytes", blob.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IcnEncoder {
    options: IcnEncoderOptions,
}

impl IcnEncoder {
    /// Create an encoder with the given options
    pub fn new(options: IcnEncoderOptions) -> IcnEncoder {
        IcnEncoder { options }
    }

    /// The options this encoder was created with
    pub fn options(&self) -> &IcnEncoderOptions {
        &self.options
    }

    /// List the source images of `dir` in frame order.
    ///
    /// Only regular files directly inside `dir` whose extension matches are returned, sorted by
    /// file name.
    pub fn source_images(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let entries = WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .collect::<core::result::Result<Vec<_>, walkdir::Error>>()
            .map_err(io::Error::from)?;

        Ok(entries
            .into_iter()
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.options.image_extension))
            })
            .map(|e| e.into_path())
            .collect())
    }

    /// Build a sprite container from the images in `dir`.
    ///
    /// Returns an empty buffer when the directory holds no matching image. Any image that fails
    /// to decode fails the whole container.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()), err)]
    pub fn encode(&self, dir: impl AsRef<Path>) -> Result<Vec<u8>> {
        let dir = dir.as_ref();
        let images = self.source_images(dir)?;

        if images.is_empty() {
            debug!("no images found");
            return Ok(Vec::new());
        }

        if images.len() > u16::MAX as usize {
            return Err(Error::TooManyFrames(images.len()));
        }

        let mut icn = IcnWriter::new();
        for path in &images {
            debug!("adding frame {}", path.display());
            icn.add_frame(&Self::load_frame(path)?)?;
        }

        let blob = icn.finish()?;

        if let Some(dump_path) = &self.options.dump_path {
            if let Err(err) = Self::dump(dump_path, dir, &blob) {
                warn!("unable to dump to {}: {err}", dump_path.display());
            }
        }

        Ok(blob)
    }

    fn load_frame(path: &Path) -> Result<IcnFrame> {
        let image = image::open(path).map_err(|source| Error::DecodeError {
            path: path.to_path_buf(),
            source,
        })?;

        IcnFrame::from_rgba(image.into_rgba8())
    }

    fn dump(dump_path: &Path, source: &Path, blob: &[u8]) -> Result<()> {
        let name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "sprite.icn".into());

        fs::create_dir_all(dump_path)?;
        let target = dump_path.join(name);
        fs::write(&target, blob)?;

        info!("dumped {} bytes to {}", blob.len(), target.display());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::encode::{IcnEncoder, IcnEncoderOptions};
    use crate::error::Result;

    fn touch(dir: &Path, name: &str) -> Result<()> {
        std::fs::write(dir.join(name), [])?;
        Ok(())
    }

    #[traced_test]
    #[test]
    fn source_images_sorted_and_filtered() -> Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "b.png")?;
        touch(dir.path(), "a.PNG")?;
        touch(dir.path(), "c.bmp")?;
        touch(dir.path(), "readme.txt")?;
        std::fs::create_dir(dir.path().join("d.png"))?;

        let images = IcnEncoder::default().source_images(dir.path())?;
        let names = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a.PNG", "b.png"]);

        Ok(())
    }

    #[traced_test]
    #[test]
    fn source_images_custom_extension() -> Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "a.png")?;
        touch(dir.path(), "b.bmp")?;

        let encoder = IcnEncoder::new(IcnEncoderOptions::builder().image_extension("bmp").build());
        let images = encoder.source_images(dir.path())?;

        assert_eq!(images, vec![dir.path().join("b.bmp")]);

        Ok(())
    }

    #[traced_test]
    #[test]
    fn encode_empty_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "notes.txt")?;

        assert!(IcnEncoder::default().encode(dir.path())?.is_empty());

        Ok(())
    }

    #[traced_test]
    #[test]
    fn encode_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(IcnEncoder::default()
            .encode(dir.path().join("missing"))
            .is_err());
    }

    #[traced_test]
    #[test]
    fn encode_undecodable_image_fails() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("broken.png"), b"not a png")?;

        let result = IcnEncoder::default().encode(dir.path());
        assert!(matches!(
            result,
            Err(crate::error::Error::DecodeError { .. })
        ));

        Ok(())
    }
}
