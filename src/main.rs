//! markup-view - print a markup file with highlighting

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use crossterm::terminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use markup_highlight::render::render;
use markup_highlight::{Config, Markup, MarkupError, MarkupMode, MarkupStyle, MemoryBuffer, Result};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Command line options
#[derive(Debug, Default)]
struct Options {
    mode: Option<MarkupMode>,
    theme: Option<MarkupStyle>,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("markup-view {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--mode" | "-m" => {
                let name = next_value(&mut iter, arg)?;
                let mode = MarkupMode::from_name(name).ok_or_else(|| MarkupError::UnknownMode(name.to_string()))?;
                options.mode = Some(mode);
            }
            "--theme" | "-t" => {
                let name = next_value(&mut iter, arg)?;
                let theme = MarkupStyle::from_name(name)
                    .ok_or_else(|| MarkupError::Configuration(format!("unknown theme '{}'", name)))?;
                options.theme = Some(theme);
            }
            "--config" | "-c" => {
                options.config = Some(PathBuf::from(next_value(&mut iter, arg)?));
            }
            _ if arg.starts_with('-') => {
                return Err(MarkupError::Configuration(format!("unknown option '{}'", arg)));
            }
            _ => options.file = Some(PathBuf::from(arg)),
        }
    }

    Ok(Some(options))
}

fn next_value<'a>(iter: &mut impl Iterator<Item = &'a String>, option: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| MarkupError::Configuration(format!("{} needs a value", option)))
}

/// Guess the mode from a file extension
fn mode_for(path: &Path) -> Option<MarkupMode> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "md" | "markdown" => Some(MarkupMode::Markdown),
        "adoc" | "asciidoc" | "asc" => Some(MarkupMode::Asciidoc),
        "rst" | "rest" => Some(MarkupMode::RestructuredText),
        "txt" | "text" => Some(MarkupMode::Text),
        _ => None,
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };
    let Some(path) = options.file else {
        print_usage();
        return Err(MarkupError::Configuration("no input file".to_string()));
    };

    let mut config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(mode) = options.mode.or_else(|| mode_for(&path)) {
        config.mode = mode;
    }
    if let Some(theme) = options.theme {
        config.theme = theme;
    }
    debug!(mode = %config.mode, theme = config.theme.name(), file = %path.display(), "highlighting");

    let markup = Markup::builder()
        .buffer(MemoryBuffer::from_file(&path)?)
        .config(config)
        .build()?;

    let max_cols = terminal::size().ok().map(|(cols, _)| cols as usize);
    let base = markup.style_sheet().base_format();
    render(&mut io::stdout(), markup.buffer(), &base, max_cols)?;
    println!();
    Ok(())
}

fn print_usage() {
    println!("markup-view {} - print a markup file with highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: markup-view [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -m, --mode MODE      asciidoc, markdown, restructuredtext or text");
    println!("  -t, --theme THEME    plain, monokai or custom");
    println!("  -c, --config PATH    Read settings from PATH instead of ~/.markup-highlight.toml");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
}
