use std::io::Cursor;
use std::path::Path;

use h2_icn::{error::Error, types::IcnHeader, IcnEncoder, IcnEncoderOptions, IcnSprite};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn write_rgba(path: &Path, width: u32, height: u32, seed: u8) -> Result<(), Error> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([seed, x as u8, y as u8, 0x80 + seed])
    });
    image.save(path).map_err(|source| Error::DecodeError {
        path: path.to_path_buf(),
        source,
    })
}

fn hero_directory() -> Result<tempfile::TempDir, Error> {
    let dir = tempfile::tempdir()?;
    write_rgba(&dir.path().join("000.png"), 2, 2, 1)?;
    write_rgba(&dir.path().join("001.png"), 1, 1, 2)?;
    Ok(dir)
}

#[traced_test]
#[test]
fn encode_two_frames() -> Result<(), Error> {
    let dir = hero_directory()?;

    let blob = IcnEncoder::default().encode(dir.path())?;

    // Header, frame 0 (13 + 3 + 16), frame 1 (13 + 3 + 4)
    assert_eq!(blob.len(), IcnHeader::SIZE + 32 + 20);
    assert_eq!(&blob[0..2], &[0x02, 0x00]);
    assert_eq!(&blob[2..6], &[0x34, 0x00, 0x00, 0x00]);

    // First frame header: width 2, height 2, data offset 13
    assert_eq!(&blob[10..12], &[0x02, 0x00]);
    assert_eq!(&blob[12..14], &[0x02, 0x00]);
    assert_eq!(&blob[15..19], &[0x0D, 0x00, 0x00, 0x00]);
    assert_eq!(&blob[19..22], &[0xAB, 0xCD, 0xEF]);

    // Second frame starts right after the 32 bytes of the first one
    let second = IcnHeader::SIZE + 32;
    assert_eq!(&blob[second + 4..second + 6], &[0x01, 0x00]);
    assert_eq!(&blob[second + 9..second + 13], &[0x2D, 0x00, 0x00, 0x00]);

    Ok(())
}

#[traced_test]
#[test]
fn encode_pixels_are_rgba_row_major() -> Result<(), Error> {
    let dir = hero_directory()?;

    let blob = IcnEncoder::default().encode(dir.path())?;
    let icn = IcnSprite::new(Cursor::new(blob))?;

    let first = icn.by_index(0).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        0x01, 0x00, 0x00, 0x81, 0x01, 0x01, 0x00, 0x81,
        0x01, 0x00, 0x01, 0x81, 0x01, 0x01, 0x01, 0x81,
    ];
    assert_eq!(first.pixels, expected);
    assert_eq!(icn.by_index(1).unwrap().pixels, vec![0x02, 0x00, 0x00, 0x82]);

    Ok(())
}

#[traced_test]
#[test]
fn encode_converts_rgb_sources() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("frame.png");
    RgbImage::from_pixel(1, 2, Rgb([10, 20, 30]))
        .save(&path)
        .map_err(|source| Error::DecodeError {
            path: path.clone(),
            source,
        })?;

    let blob = IcnEncoder::default().encode(dir.path())?;
    let icn = IcnSprite::new(Cursor::new(blob))?;

    assert_eq!(icn.len(), 1);
    assert_eq!(icn.frames()[0].pixels, vec![10, 20, 30, 255, 10, 20, 30, 255]);

    Ok(())
}

#[traced_test]
#[test]
fn encode_is_deterministic() -> Result<(), Error> {
    let dir = hero_directory()?;
    let encoder = IcnEncoder::default();

    assert_eq!(encoder.encode(dir.path())?, encoder.encode(dir.path())?);

    Ok(())
}

#[traced_test]
#[test]
fn encode_header_matches_frames() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    for (i, size) in [3u32, 1, 4, 2].iter().enumerate() {
        write_rgba(&dir.path().join(format!("{i:03}.png")), *size, *size, i as u8)?;
    }

    let blob = IcnEncoder::default().encode(dir.path())?;
    let icn = IcnSprite::new(Cursor::new(&blob))?;

    assert_eq!(icn.header().frames, 4);
    assert_eq!(icn.header().total_size as usize, blob.len() - IcnHeader::SIZE);
    assert_eq!(
        icn.frames().iter().map(|f| f.width()).collect::<Vec<_>>(),
        vec![3, 1, 4, 2]
    );

    Ok(())
}

#[traced_test]
#[test]
fn encode_writes_dump() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("HEROES.ICN");
    std::fs::create_dir(&source)?;
    write_rgba(&source.join("0.png"), 1, 1, 0)?;

    let dump = dir.path().join("dump");
    let encoder = IcnEncoder::new(IcnEncoderOptions::builder().dump_path(&dump).build());
    let blob = encoder.encode(&source)?;

    assert_eq!(std::fs::read(dump.join("HEROES.ICN"))?, blob);
    assert!(logs_contain("dumped"));

    Ok(())
}

#[traced_test]
#[test]
fn encode_fails_on_broken_frame() -> Result<(), Error> {
    let dir = hero_directory()?;
    std::fs::write(dir.path().join("002.png"), b"garbage")?;

    let result = IcnEncoder::default().encode(dir.path());
    assert!(matches!(result, Err(Error::DecodeError { .. })));

    Ok(())
}

#[traced_test]
#[test]
fn encode_survives_unwritable_dump() -> Result<(), Error> {
    let dir = hero_directory()?;

    // A regular file cannot receive dumps
    let dump = dir.path().join("dump");
    std::fs::write(&dump, b"in the way")?;

    let encoder = IcnEncoder::new(IcnEncoderOptions::builder().dump_path(&dump).build());
    let blob = encoder.encode(dir.path())?;

    assert_eq!(blob, IcnEncoder::default().encode(dir.path())?);
    assert!(logs_contain("unable to dump"));

    Ok(())
}
