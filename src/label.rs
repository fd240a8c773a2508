use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::path::Path;

/// Matches single bytes, so each byte of a multi-byte character becomes its own space.
static NOT_WORD_BYTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)[^A-Za-z0-9\s]").expect("valid label pattern"));

/// Derives a display label from an image path.
///
/// The directory and last extension are dropped, every byte that isn't an
/// ASCII letter, digit or whitespace becomes a space, and each word gets an upper
/// case first letter. Different images may end up with the same label.
pub fn derive_label(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let base = match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => &*file_name,
    };
    let cleaned = NOT_WORD_BYTE.replace_all(base.as_bytes(), &b" "[..]);
    let cleaned = String::from_utf8_lossy(&cleaned);
    title_case(&cleaned)
}

/// Uppercases the first character of every whitespace-delimited word and
/// leaves every other character untouched.
pub fn title_case(text: &str) -> String {
    let mut word_start = true;
    text.chars()
        .map(|c| {
            let out = match word_start {
                true => c.to_ascii_uppercase(),
                false => c,
            };
            word_start = c.is_whitespace();
            out
        })
        .collect()
}

#[test]
fn label_from_punctuated_name() {
    assert_eq!(derive_label(Path::new("my-emote_01.png")), "My Emote 01");
}

#[test]
fn label_drops_directory_and_last_extension() {
    assert_eq!(derive_label(Path::new("themes/default/smile.png")), "Smile");
    assert_eq!(derive_label(Path::new("big.grin.gif")), "Big Grin");
    assert_eq!(derive_label(Path::new("noext")), "Noext");
}

#[test]
fn label_keeps_existing_case_and_spacing() {
    assert_eq!(derive_label(Path::new("LOL--cat.png")), "LOL  Cat");
    assert_eq!(title_case("mIxed case"), "MIxed Case");
}

#[test]
fn label_replaces_non_ascii_per_byte() {
    assert_eq!(derive_label(Path::new("caf\u{e9}.png")), "Caf  ");
    assert_eq!(derive_label(Path::new("\u{263a}-face.png")), "    Face");
}
