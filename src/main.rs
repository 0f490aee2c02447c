//! cellstyle - render captured terminal frames as styled HTML
//!
//! Each captured cell is decomposed into CSS class tokens, an inline style and
//! its text, then applied to a `<span>`.
//!
//! # Quick Start
//!
//! ```text
//! cellstyle frame.toml                 # HTML fragment on stdout
//! cellstyle --standalone frame.toml    # full document with stylesheet
//! cellstyle --stylesheet               # CSS for the class tokens
//! cellstyle --preview frame.toml       # replay in this terminal
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cellstyle::config::{data_dir, Config};
use cellstyle::frame::Frame;
use cellstyle::ui;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Captured frame to render
    frame: Option<PathBuf>,
    /// Write output here instead of stdout
    output: Option<PathBuf>,
    /// Explicit config file
    config: Option<PathBuf>,
    /// Force a full HTML document
    standalone: bool,
    /// Print the stylesheet only
    stylesheet: bool,
    /// Replay the frame in the terminal
    preview: bool,
    /// Put the HTML on the clipboard
    copy: bool,
    /// Save the effective configuration
    write_config: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("cellstyle {}", VERSION);
}

fn print_help() {
    eprintln!("cellstyle {} - Render captured terminal frames as styled HTML", VERSION);
    eprintln!();
    eprintln!("Usage: cellstyle [OPTIONS] <FRAME>   (FRAME '-' reads stdin)");
    eprintln!();
    eprintln!("Output options:");
    eprintln!("  (default)             HTML fragment on stdout");
    eprintln!("  -o, --output <FILE>   Write to FILE");
    eprintln!("  --standalone          Full HTML document with embedded stylesheet");
    eprintln!("  --stylesheet          Print the CSS for the cell classes and exit");
    eprintln!("  --preview             Replay the frame in this terminal (not with -o/--copy)");
    eprintln!("  --copy                Copy the HTML to the clipboard");
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  --config <FILE>       Use FILE instead of ~/.cellstyle/config.toml");
    eprintln!("  --write-config        Save the effective config (to --config FILE if given)");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Log file: ~/.cellstyle/cellstyle.log (level from RUST_LOG or config)");
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Args, String> {
    let args: Vec<String> = argv.into_iter().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                let path = args.get(i).ok_or("Missing output file")?;
                parsed.output = Some(PathBuf::from(path));
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config file")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--standalone" => parsed.standalone = true,
            "--stylesheet" => parsed.stylesheet = true,
            "--preview" => parsed.preview = true,
            "--copy" => parsed.copy = true,
            "--write-config" => parsed.write_config = true,
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if parsed.frame.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                parsed.frame = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    if parsed.preview && (parsed.output.is_some() || parsed.copy) {
        return Err("--preview cannot be combined with --output or --copy".to_string());
    }
    if parsed.preview && parsed.stylesheet {
        return Err("--preview cannot be combined with --stylesheet".to_string());
    }
    if parsed.frame.is_none() && !parsed.stylesheet && !parsed.write_config {
        return Err("Missing frame file".to_string());
    }
    Ok(parsed)
}

/// Log to ~/.cellstyle/cellstyle.log
fn init_logging(config: &Config) {
    let log_path = data_dir()
        .map(|dir| dir.join("cellstyle.log"))
        .unwrap_or_else(|| PathBuf::from("cellstyle.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args(env::args()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) if args.write_config && !path.exists() => Config::default(),
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if args.standalone {
        config.html.standalone = true;
    }

    init_logging(&config);
    info!("cellstyle starting...");

    if args.write_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("Configuration saved");
        if args.frame.is_none() && !args.stylesheet {
            return Ok(());
        }
    }

    if args.stylesheet {
        let css = ui::stylesheet(&config.stylesheet);
        return write_output(&args, &css);
    }

    let Some(frame_path) = args.frame.as_ref() else {
        anyhow::bail!("Missing frame file");
    };
    let frame = load_frame(frame_path, io::stdin().lock())
        .with_context(|| format!("Failed to load frame {}", frame_path.display()))?;
    info!("Frame: {} columns, {} rows", frame.cols, frame.rows.len());

    if args.preview {
        let mut stdout = io::stdout().lock();
        ui::preview(&mut stdout, &frame)?;
        return Ok(());
    }

    let html = ui::render(&frame, &config);

    if args.copy {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
        clipboard
            .set_text(html.clone())
            .context("Failed to copy to clipboard")?;
        info!("Copied {} bytes to clipboard", html.len());
    }

    write_output(&args, &html)
}

/// Load a frame from a file, or from `stdin` when the path is `-`
fn load_frame<R: Read>(path: &Path, stdin: R) -> anyhow::Result<Frame> {
    if path == Path::new("-") {
        let content = io::read_to_string(stdin)?;
        Ok(Frame::parse(&content)?)
    } else {
        Ok(Frame::load(path)?)
    }
}

fn write_output(args: &Args, content: &str) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
