use crate::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Writes the converted text to `path`.
///
/// When appending, the file is created if needed and the text is preceded by a newline.
pub fn write_result(path: &Path, text: &str, append: bool) -> Result<(), Error> {
    match append {
        true => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(b"\n")?;
            file.write_all(text.as_bytes())?;
        }
        false => std::fs::write(path, text)?,
    }
    Ok(())
}

#[test]
fn overwrite_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smilies.pak");
    std::fs::write(&path, "old").unwrap();
    write_result(&path, "first, \n", false).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first, \n");
    write_result(&path, "second, \n", true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first, \n\nsecond, \n");
}

#[test]
fn append_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.pak");
    write_result(&path, "a, \n", true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "\na, \n");
}
