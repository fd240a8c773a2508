use clap::Parser;
use log::{error, info, warn};
use pakconvert::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Converts a Pidgin emoticon `theme` file into a phpBB `.pak` emoticon pack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// theme file to convert
    #[arg(long)]
    source: Option<PathBuf>,
    /// `.pak` file to write
    #[arg(long)]
    result: Option<PathBuf>,
    /// folder containing the emoticon images
    #[arg(long, default_value = ".")]
    path: PathBuf,
    /// append to the result file instead of overwriting it
    #[arg(short, long)]
    append: bool,
    /// converter settings (json), falls back to `pakconvert.json`
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Reads a config layer. A missing file is only reported when it was asked for explicitly.
fn load_config(path: &Path, explicit: bool) -> Option<ConvertConfig> {
    let string = std::fs::read_to_string(path)
        .map_err(|e| {
            if explicit {
                warn!("Ignoring config '{}': {e}", path.display())
            }
        })
        .ok()?;
    serde_json::from_str::<ConvertConfig>(&string)
        .map_err(|e| warn!("Ignoring config '{}': {e}", path.display()))
        .ok()
}

fn run(args: Args) -> Result<(), Error> {
    let start = Instant::now();
    let source_file = args.source.ok_or(Error::MissingArgument("source"))?;
    let result_file = args.result.ok_or(Error::MissingArgument("result"))?;
    if !source_file.exists() {
        return Err(Error::SourceNotFound(source_file));
    }

    let arg_file = args
        .config
        .as_deref()
        .and_then(|path| load_config(path, true));
    let default_json = load_config(Path::new("pakconvert.json"), false);
    let config = match (arg_file, default_json) {
        (Some(got), _) => got,
        (None, Some(got)) => got,
        (None, None) => Default::default(),
    };
    let converter = Converter::new(args.path, config)?;

    info!("Loading theme file from '{}'...", source_file.display());
    let source = read_source(&source_file)?;
    let Conversion { text, stats } = converter.convert(&source)?;

    let line_diff = match stats.line_difference() {
        0 => String::new(),
        d if d > 0 => format!(" - Inflation of {d} line(s)"),
        d => format!(" - Deflation of {} line(s)", -d),
    };
    info!("Generated {} pak line(s){line_diff}.", stats.records);
    let char_diff = match stats.char_difference() {
        0 => String::new(),
        d if d > 0 => format!(" Inflation of {d} character(s)."),
        d => format!(" Deflation of {} character(s).", -d),
    };
    info!(
        "Saving {} character(s) to file...{char_diff}",
        stats.output_chars
    );
    if let Some(average) = stats.average_record_length() {
        info!("Average of {average:.2} character(s) per line.");
    }

    write_result(&result_file, &text, args.append)?;
    info!(
        "Done! Conversion took {:.4} second(s).",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
