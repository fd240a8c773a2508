use pakconvert::*;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbaImage::new(width, height)
        .save(dir.join(name))
        .unwrap();
}

fn theme_dir(theme: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("theme"), theme).unwrap();
    dir
}

fn pakconvert(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pakconvert"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pakconvert")
}

#[test]
fn smile_scenario() {
    let dir = theme_dir("smile.png :) :-)\nsmile.png :D\n");
    write_image(dir.path(), "smile.png", 20, 20);
    let converter = Converter::new(dir.path(), ConvertConfig::default()).unwrap();
    let source = read_source(&dir.path().join("theme")).unwrap();
    let conversion = converter.convert(&source).unwrap();

    let lines: Vec<_> = conversion.text.split(", \n").collect();
    assert_eq!(
        lines,
        vec![
            "'smile.png', '20', '20', '1', 'Smile', ':)'",
            "'smile.png', '20', '20', '0', 'Smile', ':-)'",
            "'smile.png', '20', '20', '0', 'Smile', ':D'",
            "",
        ]
    );
    assert_eq!(conversion.stats.records, 3);
    assert_eq!(conversion.stats.entries, 1);
    assert_eq!(conversion.stats.individual_lines, 2);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = theme_dir("b.png :P\na.png :) :'(\n# note\nb.png :p :P\n");
    write_image(dir.path(), "a.png", 8, 8);
    write_image(dir.path(), "b.png", 10, 4);
    let converter = Converter::new(dir.path(), ConvertConfig::default()).unwrap();
    let source = read_source(&dir.path().join("theme")).unwrap();
    let first = converter.convert(&source).unwrap();
    let second = converter.convert(&source).unwrap();
    assert_eq!(first, second);
    assert!(first.text.starts_with("'b.png', '10', '4', '1', 'B', ':P', \n"));
    assert!(first.text.contains("'a.png', '8', '8', '0', 'A', ':\\'(', \n"));
}

#[test]
fn cli_writes_result() {
    let dir = theme_dir("[default]\nmy-emote_01.png :) ;)\n");
    std::fs::create_dir(dir.path().join("images")).unwrap();
    write_image(&dir.path().join("images"), "my-emote_01.png", 19, 21);

    let output = pakconvert(
        dir.path(),
        &["--source", "theme", "--result", "smilies.pak", "--path", "images"],
    );
    assert!(
        output.status.success(),
        "pakconvert failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[INFO] Found 1 individual line(s)."));
    assert!(stdout.contains("[INFO] Found 1 individual emoticon(s)."));
    assert!(stdout.contains("[INFO] Generated 2 pak line(s) - Inflation of 1 line(s)."));
    for step in ["Beginning parse...", "Condensing duplicates...", "Converting format..."] {
        assert!(stdout.contains(&format!("[INFO] {step}")), "{stdout}");
    }
    assert!(!stdout.contains("[WARN]"), "{stdout}");

    let result = std::fs::read_to_string(dir.path().join("smilies.pak")).unwrap();
    assert_eq!(
        result,
        "'my-emote_01.png', '19', '21', '1', 'My Emote 01', ':)', \n\
         'my-emote_01.png', '19', '21', '0', 'My Emote 01', ';)', \n"
    );
}

#[test]
fn cli_appends_result() {
    let dir = theme_dir("smile.png :)\n");
    write_image(dir.path(), "smile.png", 20, 20);
    std::fs::write(dir.path().join("smilies.pak"), "'old.png', '1', '1', '1', 'Old', ':o', \n").unwrap();

    let output = pakconvert(dir.path(), &["--source", "theme", "--result", "smilies.pak", "-a"]);
    assert!(output.status.success());
    let result = std::fs::read_to_string(dir.path().join("smilies.pak")).unwrap();
    assert_eq!(
        result,
        "'old.png', '1', '1', '1', 'Old', ':o', \n\n'smile.png', '20', '20', '1', 'Smile', ':)', \n"
    );
}

#[test]
fn cli_missing_image_leaves_result_untouched() {
    let dir = theme_dir("smile.png :)\nfrown.png :(\n");
    write_image(dir.path(), "smile.png", 20, 20);

    let output = pakconvert(dir.path(), &["--source", "theme", "--result", "smilies.pak"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ERROR] The image"), "{stdout}");
    assert!(stdout.contains("frown.png"), "{stdout}");
    assert!(!dir.path().join("smilies.pak").exists());
}

#[test]
fn cli_validation_errors() {
    let dir = theme_dir("smile.png :)\n");

    let output = pakconvert(dir.path(), &["--result", "smilies.pak"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("[ERROR] No source value supplied!"));

    let output = pakconvert(dir.path(), &["--source", "theme"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("[ERROR] No result value supplied!"));

    let output = pakconvert(dir.path(), &["--source", "missing", "--result", "smilies.pak"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("does not exist"));

    let output = pakconvert(
        dir.path(),
        &["--source", "theme", "--result", "smilies.pak", "--path", "theme"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("is not a directory"));
    assert!(!dir.path().join("smilies.pak").exists());
}

#[test]
fn cli_reads_config_file() {
    let dir = theme_dir("; skipped.png :(\nsmile.png :)\n");
    write_image(dir.path(), "smile.png", 20, 20);
    std::fs::write(dir.path().join("markers.json"), r#"{"ignore_markers":[";"]}"#).unwrap();

    let output = pakconvert(
        dir.path(),
        &["--source", "theme", "--result", "smilies.pak", "--config", "markers.json"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let result = std::fs::read_to_string(dir.path().join("smilies.pak")).unwrap();
    assert_eq!(result, "'smile.png', '20', '20', '1', 'Smile', ':)', \n");
}

#[test]
fn cli_warns_about_unusable_config() {
    let dir = theme_dir("smile.png :)\n");
    write_image(dir.path(), "smile.png", 20, 20);
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    for config in ["typo.json", "broken.json"] {
        let output = pakconvert(
            dir.path(),
            &["--source", "theme", "--result", "smilies.pak", "--config", config],
        );
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains(&format!("[WARN] Ignoring config '{config}'")),
            "{stdout}"
        );
    }
}
