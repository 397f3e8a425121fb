//! markarea - a terminal markdown text area.
//!
//! # Usage
//!
//! ```bash
//! markarea notes.md
//! markarea --rows 10 --placeholder "Write something" notes.md
//! markarea --line-marker ":: " --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use markarea::app::App;
use markarea::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};

/// A terminal text area with markdown authoring shortcuts
#[derive(Parser, Debug)]
#[command(name = "markarea", version, about, long_about = None)]
struct Cli {
    /// File to edit; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Minimum number of text rows
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Extra line marker for list toggling and continuation (repeatable)
    #[arg(long, value_name = "MARKER")]
    line_marker: Vec<String>,

    /// Text shown while the buffer is empty
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Do not include the built-in markdown list and quote markers
    #[arg(long)]
    no_default_markers: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            rows: self.rows,
            line_markers: self.line_marker.clone(),
            placeholder: self.placeholder.clone(),
            no_default_markers: self.no_default_markers,
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    if (cli.save || cli.clear) && cli.file.is_none() {
        return Ok(());
    }

    let mut app = App::new(cli.file).with_flags(effective);
    app.run().context("Application error")
}
