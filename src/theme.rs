use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid blank pattern"));

/// Collapses every run of spaces and tabs into a single space.
pub fn normalize_blanks(source: &str) -> String {
    BLANKS.replace_all(source, " ").into_owned()
}

/// One surviving line of a theme file: an image filename followed by its codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine {
    pub filename: String,
    pub codes: Vec<String>,
}

/// Splits theme text into [`RawLine`]s.
///
/// Empty lines and lines starting with one of `ignore_markers` are skipped.
/// Only the first character is checked, so markers appearing later in a line
/// are kept as ordinary tokens.
pub fn tokenize(source: &str, ignore_markers: &[char]) -> Vec<RawLine> {
    source
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(ignore_markers))
        .map(|line| {
            let mut tokens = line.split(' ');
            let filename = tokens.next().unwrap_or_default().trim().to_string();
            let codes = tokens
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect();
            RawLine { filename, codes }
        })
        .collect()
}

/// All codes bound to one image after merging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeEntry {
    pub codes: Vec<String>,
}

impl ThemeEntry {
    fn push_unique(&mut self, code: &str) {
        if !self.codes.iter().any(|c| c == code) {
            self.codes.push(code.to_string());
        }
    }
}

/// Merged theme entries keyed by filename, in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    entries: IndexMap<String, ThemeEntry>,
}

impl Theme {
    /// Merges lines sharing a filename. The first line fixes the entry's
    /// position, later lines only append codes not seen before.
    pub fn merge(lines: &[RawLine]) -> Theme {
        let mut entries: IndexMap<String, ThemeEntry> = IndexMap::new();
        for line in lines {
            let entry = entries.entry(line.filename.clone()).or_default();
            line.codes.iter().for_each(|code| entry.push_unique(code));
        }
        Theme { entries }
    }

    #[inline]
    pub fn parse(source: &str, ignore_markers: &[char]) -> Theme {
        Theme::merge(&tokenize(source, ignore_markers))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, filename: &str) -> Option<&ThemeEntry> {
        self.entries.get(filename)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
fn codes(entry: Option<&ThemeEntry>) -> Vec<&str> {
    entry.unwrap().codes.iter().map(String::as_str).collect()
}

#[test]
fn blanks_collapse() {
    assert_eq!(normalize_blanks("a  \t b\t\tc\n  d"), "a b c\n d");
    assert_eq!(normalize_blanks("no-blanks"), "no-blanks");
}

#[test]
fn ignored_and_empty_lines() {
    let source = "# comment\n[default]\n\n   \nsmile.png :) :-)\nwink.png ;)\n";
    let lines = tokenize(source, &['#', '[']);
    assert_eq!(
        lines,
        vec![
            RawLine {
                filename: "smile.png".to_string(),
                codes: vec![":)".to_string(), ":-)".to_string()],
            },
            RawLine {
                filename: "wink.png".to_string(),
                codes: vec![";)".to_string()],
            },
        ]
    );
}

#[test]
fn marker_only_checked_at_line_start() {
    let lines = tokenize("hash.png #1 [x]\n  # indented comment", &['#', '[']);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].codes, vec!["#1", "[x]"]);
}

#[test]
fn custom_markers() {
    let lines = tokenize("; note\n# kept.png :)", &[';']);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].filename, "#");
}

#[test]
fn carriage_returns_and_empty_codes() {
    let lines = tokenize("smile.png :)  :D \r\nlonely.png\r\n", &['#']);
    assert_eq!(lines[0].codes, vec![":)", ":D"]);
    assert_eq!(lines[1].filename, "lonely.png");
    assert!(lines[1].codes.is_empty());
}

#[test]
fn merge_keeps_first_seen_order() {
    let source = "a.png :) :-)\nb.png :(\na.png :) :D\nc.png\nb.png :( :-(";
    let theme = Theme::parse(source, &['#', '[']);
    let names: Vec<_> = theme.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(codes(theme.get("a.png")), vec![":)", ":-)", ":D"]);
    assert_eq!(codes(theme.get("b.png")), vec![":(", ":-("]);
    assert!(theme.get("c.png").unwrap().codes.is_empty());
}

#[test]
fn repeated_code_on_one_line_is_kept_once() {
    let theme = Theme::parse("a.png :) :) :D :)", &['#']);
    assert_eq!(codes(theme.get("a.png")), vec![":)", ":D"]);
}

#[test]
fn merge_is_case_sensitive() {
    let theme = Theme::parse("Smile.png :)\nsmile.png :)", &[]);
    assert_eq!(theme.len(), 2);
}
