use crate::image_info::ImageInfo;
use crate::theme::ThemeEntry;
use std::fmt::Formatter;

/// Separator written after every record, including the last one.
pub const RECORD_SEPARATOR: &str = ", \n";

/// One `.pak` line binding a single code to its image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PakRecord<'a> {
    pub filename: &'a str,
    pub image: ImageInfo,
    /// Set on the first code of an image, which consumers use as its default trigger.
    pub primary: bool,
    pub label: &'a str,
    pub code: &'a str,
}

/// Single-quoted field with inner quotes backslash-escaped.
#[derive(Clone, Copy, Debug)]
struct QuotedField<'a>(&'a str);

impl std::fmt::Display for QuotedField<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("'")?;
        self.0
            .split('\'')
            .enumerate()
            .try_for_each(|(i, part)| match i {
                0 => f.write_str(part),
                _ => f.write_fmt(format_args!("\\'{part}")),
            })?;
        f.write_str("'")
    }
}

impl std::fmt::Display for PakRecord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.image.width.to_string();
        let height = self.image.height.to_string();
        let primary = match self.primary {
            true => "1",
            false => "0",
        };
        f.write_fmt(format_args!(
            "{}, {}, {}, {}, {}, {}",
            QuotedField(self.filename),
            QuotedField(&width),
            QuotedField(&height),
            QuotedField(primary),
            QuotedField(self.label),
            QuotedField(self.code),
        ))
    }
}

/// Expands an entry into one record per non-empty code. Only the first record is primary.
pub fn entry_records<'a>(
    filename: &'a str,
    entry: &'a ThemeEntry,
    image: ImageInfo,
    label: &'a str,
) -> Vec<PakRecord<'a>> {
    entry
        .codes
        .iter()
        .filter(|code| !code.trim().is_empty())
        .enumerate()
        .map(|(i, code)| PakRecord {
            filename,
            image,
            primary: i == 0,
            label,
            code: code.as_str(),
        })
        .collect()
}

/// Joins records into the final text, each followed by [`RECORD_SEPARATOR`].
pub fn assemble(records: &[PakRecord<'_>]) -> String {
    records
        .iter()
        .map(|record| format!("{record}{RECORD_SEPARATOR}"))
        .collect()
}

#[cfg(test)]
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\'' {
            continue;
        }
        let mut field = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\\' => field.extend(chars.next()),
                '\'' => break,
                _ => field.push(c),
            }
        }
        fields.push(field);
    }
    fields
}

#[cfg(test)]
const SMILE: ImageInfo = ImageInfo {
    width: 20,
    height: 20,
};

#[test]
fn record_format() {
    let record = PakRecord {
        filename: "smile.png",
        image: SMILE,
        primary: true,
        label: "Smile",
        code: ":)",
    };
    assert_eq!(
        "'smile.png', '20', '20', '1', 'Smile', ':)'",
        &record.to_string()
    );
}

#[test]
fn quotes_are_escaped() {
    let record = PakRecord {
        filename: "cry.png",
        image: SMILE,
        primary: false,
        label: "Cry",
        code: ":'(",
    };
    let line = record.to_string();
    assert_eq!("'cry.png', '20', '20', '0', 'Cry', ':\\'('", &line);
    assert_eq!(split_fields(&line), vec!["cry.png", "20", "20", "0", "Cry", ":'("]);
}

#[test]
fn only_first_code_is_primary() {
    let entry = ThemeEntry {
        codes: vec![" ".to_string(), ":)".to_string(), ":-)".to_string(), ":D".to_string()],
    };
    let records = entry_records("smile.png", &entry, SMILE, "Smile");
    let flags: Vec<_> = records.iter().map(|r| (r.code, r.primary)).collect();
    assert_eq!(flags, vec![(":)", true), (":-)", false), (":D", false)]);
}

#[test]
fn assembled_text_ends_with_separator() {
    let entry = ThemeEntry {
        codes: vec![":)".to_string(), ":D".to_string()],
    };
    let records = entry_records("smile.png", &entry, SMILE, "Smile");
    assert_eq!(
        assemble(&records),
        "'smile.png', '20', '20', '1', 'Smile', ':)', \n'smile.png', '20', '20', '0', 'Smile', ':D', \n"
    );
    assert_eq!(assemble(&[]), "");
}
