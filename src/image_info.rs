use crate::Error;
use std::path::{Path, PathBuf};

/// Pixel size of a referenced emoticon image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Joins `filename` onto `image_dir` and reads the image's dimensions.
///
/// Leading separators are stripped from `filename`, so the lookup always stays
/// under `image_dir`.
///
/// Only the header is decoded. The format is guessed from the file content,
/// so a mislabelled extension still resolves.
pub fn resolve(image_dir: &Path, filename: &str) -> Result<(PathBuf, ImageInfo), Error> {
    let path = image_dir.join(filename.trim_start_matches(std::path::is_separator));
    if !path.is_file() {
        return Err(Error::ImageNotFound(path));
    }
    let (width, height) = image::io::Reader::open(&path)?
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?;
    log::debug!("resolved '{}' as {width}x{height}", path.display());
    Ok((path, ImageInfo { width, height }))
}

#[test]
fn reads_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::new(20, 12)
        .save(dir.path().join("smile.png"))
        .unwrap();
    let (path, info) = resolve(dir.path(), "smile.png").unwrap();
    assert_eq!(path, dir.path().join("smile.png"));
    assert_eq!(
        info,
        ImageInfo {
            width: 20,
            height: 12
        }
    );
}

#[test]
fn sniffs_format_from_content() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("wink.png");
    image::RgbaImage::new(7, 9).save(&png).unwrap();
    std::fs::rename(&png, dir.path().join("wink.gif")).unwrap();
    let (_, info) = resolve(dir.path(), "wink.gif").unwrap();
    assert_eq!((info.width, info.height), (7, 9));
}

#[test]
fn missing_image() {
    let dir = tempfile::tempdir().unwrap();
    match resolve(dir.path(), "frown.png") {
        Err(Error::ImageNotFound(path)) => assert_eq!(path, dir.path().join("frown.png")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn absolute_filename_stays_in_image_dir() {
    let dir = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    image::RgbaImage::new(3, 3)
        .save(elsewhere.path().join("outside.png"))
        .unwrap();
    let outside = elsewhere.path().join("outside.png");
    assert!(matches!(
        resolve(dir.path(), outside.to_str().unwrap()),
        Err(Error::ImageNotFound(path)) if path.starts_with(dir.path())
    ));

    image::RgbaImage::new(5, 6)
        .save(dir.path().join("smile.png"))
        .unwrap();
    let (path, info) = resolve(dir.path(), "/smile.png").unwrap();
    assert_eq!(path, dir.path().join("smile.png"));
    assert_eq!((info.width, info.height), (5, 6));
}

#[test]
fn undecodable_image() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
    assert!(matches!(
        resolve(dir.path(), "broken.png"),
        Err(Error::Image { .. })
    ));
}
