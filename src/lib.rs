#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), deny(warnings))]
#![warn(clippy::all, rust_2018_idioms)]

//! Converts instant-messenger emoticon themes into `.pak` emoticon packs.
//!
//! A theme lists one image per line followed by the codes that trigger it:
//!
//! ```text
//! # comment
//! [default]
//! smile.png :) :-)
//! smile.png :D
//! ```
//!
//! Each code becomes one quoted `.pak` record carrying the image's size and a
//! label derived from its filename.

pub mod config;
pub mod image_info;
pub mod label;
pub mod output;
pub mod pak;
pub mod theme;

pub use config::ConvertConfig;
pub use image_info::ImageInfo;
pub use output::write_result;
pub use pak::PakRecord;
pub use theme::{RawLine, Theme, ThemeEntry};

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No {0} value supplied!")]
    MissingArgument(&'static str),
    #[error("The source file '{}' does not exist!", .0.display())]
    SourceNotFound(PathBuf),
    #[error("The image folder '{}' does not exist or is not a directory!", .0.display())]
    ImagePathInvalid(PathBuf),
    #[error("The image '{}' does not exist!", .0.display())]
    ImageNotFound(PathBuf),
    #[error("The image '{}' could not be read: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Reads a theme file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_source(path: &Path) -> Result<String, Error> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Counters describing one conversion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// bytes of normalized source text
    pub source_chars: usize,
    /// tokenized lines before merging
    pub individual_lines: usize,
    /// distinct images after merging
    pub entries: usize,
    /// generated `.pak` records
    pub records: usize,
    /// bytes of generated text
    pub output_chars: usize,
}

impl ConversionStats {
    /// Records gained (positive) or lost (negative) relative to the tokenized lines.
    #[inline]
    pub fn line_difference(&self) -> i64 {
        self.records as i64 - self.individual_lines as i64
    }
    /// Output size relative to the normalized source.
    #[inline]
    pub fn char_difference(&self) -> i64 {
        self.output_chars as i64 - self.source_chars as i64
    }
    pub fn average_record_length(&self) -> Option<f64> {
        match self.records {
            0 => None,
            n => Some(self.output_chars as f64 / n as f64),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub stats: ConversionStats,
}

/// Runs the tokenize, merge, resolve and format pipeline against one image directory.
#[derive(Clone, Debug)]
pub struct Converter {
    image_dir: PathBuf,
    config: ConvertConfig,
}

impl Converter {
    pub fn new(image_dir: impl Into<PathBuf>, config: ConvertConfig) -> Result<Converter, Error> {
        let image_dir = image_dir.into();
        if !image_dir.is_dir() {
            return Err(Error::ImagePathInvalid(image_dir));
        }
        Ok(Converter { image_dir, config })
    }

    #[inline]
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
    #[inline]
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Converts theme text into `.pak` text.
    ///
    /// Fails on the first image that is missing or unreadable, in which case
    /// nothing is returned for any entry.
    pub fn convert(&self, source: &str) -> Result<Conversion, Error> {
        let source = theme::normalize_blanks(source);
        log::info!("Finished reading {} character(s).", source.len());
        log::info!("Beginning parse...");
        let lines = theme::tokenize(&source, &self.config.ignore_markers);
        log::info!("Found {} individual line(s).", lines.len());
        log::info!("Condensing duplicates...");
        let theme = Theme::merge(&lines);
        log::info!("Found {} individual emoticon(s).", theme.len());
        log::info!("Converting format...");

        let mut text = String::new();
        let mut records = 0;
        for (filename, entry) in theme.iter() {
            let (path, image) = image_info::resolve(&self.image_dir, filename)?;
            let label = label::derive_label(&path);
            let entry_records = pak::entry_records(filename, entry, image, &label);
            records += entry_records.len();
            text.push_str(&pak::assemble(&entry_records));
        }

        let stats = ConversionStats {
            source_chars: source.len(),
            individual_lines: lines.len(),
            entries: theme.len(),
            records,
            output_chars: text.len(),
        };
        Ok(Conversion { text, stats })
    }
}

#[cfg(test)]
fn image_dir(images: &[(&str, u32, u32)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, width, height) in images {
        image::RgbaImage::new(*width, *height)
            .save(dir.path().join(name))
            .unwrap();
    }
    dir
}

#[test]
fn converts_merged_entries() {
    let dir = image_dir(&[("smile.png", 20, 20), ("wink.png", 16, 18)]);
    let converter = Converter::new(dir.path(), ConvertConfig::default()).unwrap();
    let source = "# theme\n[default]\nsmile.png\t:)  :-)\nwink.png ;)\nsmile.png :D :)\n";
    let conversion = converter.convert(source).unwrap();
    assert_eq!(
        conversion.text,
        "'smile.png', '20', '20', '1', 'Smile', ':)', \n\
         'smile.png', '20', '20', '0', 'Smile', ':-)', \n\
         'smile.png', '20', '20', '0', 'Smile', ':D', \n\
         'wink.png', '16', '18', '1', 'Wink', ';)', \n"
    );
    let stats = conversion.stats;
    assert_eq!(stats.individual_lines, 3);
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.line_difference(), 1);
    assert_eq!(stats.output_chars, conversion.text.len());
    assert_eq!(stats.source_chars, theme::normalize_blanks(source).len());
}

#[test]
fn entry_without_codes_still_needs_its_image() {
    let dir = image_dir(&[("smile.png", 20, 20)]);
    let converter = Converter::new(dir.path(), ConvertConfig::default()).unwrap();
    let conversion = converter.convert("smile.png\n").unwrap();
    assert_eq!(conversion.text, "");
    assert_eq!(conversion.stats.average_record_length(), None);
    assert!(matches!(
        converter.convert("frown.png\n"),
        Err(Error::ImageNotFound(_))
    ));
}

#[test]
fn invalid_image_dir() {
    let dir = image_dir(&[("smile.png", 1, 1)]);
    assert!(matches!(
        Converter::new(dir.path().join("smile.png"), ConvertConfig::default()),
        Err(Error::ImagePathInvalid(_))
    ));
    assert!(matches!(
        Converter::new(dir.path().join("nowhere"), ConvertConfig::default()),
        Err(Error::ImagePathInvalid(_))
    ));
}

#[test]
fn missing_source() {
    let dir = image_dir(&[]);
    assert!(matches!(
        read_source(&dir.path().join("theme")),
        Err(Error::SourceNotFound(_))
    ));
}

#[test]
fn stats_differences() {
    let stats = ConversionStats {
        source_chars: 100,
        individual_lines: 5,
        entries: 3,
        records: 4,
        output_chars: 90,
    };
    assert_eq!(stats.line_difference(), -1);
    assert_eq!(stats.char_difference(), -10);
    assert_eq!(stats.average_record_length(), Some(22.5));
}
