//! Markpad - a terminal Markdown editor with a sanitized live preview.
//!
//! # Usage
//!
//! ```bash
//! markpad
//! markpad --theme dark --export-dir ~/notes
//! markpad render README.md -o README.html
//! markpad import draft.md
//! markpad export -o ~/notes
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use markpad::app::App;
use markpad::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use markpad::files;
use markpad::persist::{self, DOCUMENT_KEY, FileStorage, Storage, default_storage_path};

/// A terminal Markdown editor with a sanitized live preview
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Keep the document in memory only (no autosave file)
    #[arg(long)]
    no_autosave: bool,

    /// Autosave file (defaults to the per-user data directory)
    #[arg(long, value_name = "PATH")]
    storage: Option<PathBuf>,

    /// Directory that document.md is exported into
    #[arg(long, value_name = "PATH")]
    export_dir: Option<PathBuf>,

    /// Write logs to this file (the editor UI owns the terminal)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render Markdown to sanitized HTML
    Render {
        /// Markdown file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Write the HTML here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Replace the autosaved document with a file's contents
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Write the autosaved document to document.md
    Export {
        /// Target directory (defaults to the export directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if let Some(path) = log_file {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    // Interactive without a log file: stderr belongs to the UI, drop logs.
    Ok(())
}

fn render_command(file: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let source = match file {
        Some(path) => files::import(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read Markdown from stdin")?;
            buf
        }
    };
    let html = markpad::render::render(&source);
    match output {
        Some(path) => fs::write(path, html.as_str())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(html.as_str().as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

fn import_command(file: &Path, storage_path: &Path) -> Result<()> {
    let text = files::import(file)?;
    let mut storage = FileStorage::new(storage_path);
    storage
        .save(DOCUMENT_KEY, &text)
        .with_context(|| format!("Failed to store document in {}", storage_path.display()))?;
    println!(
        "Imported {} ({} bytes) into {}",
        file.display(),
        text.len(),
        storage_path.display()
    );
    Ok(())
}

fn export_command(storage_path: &Path, target: &Path) -> Result<()> {
    let storage = FileStorage::new(storage_path);
    let (text, error) = persist::restore(&storage);
    if let Some(err) = error {
        return Err(err).with_context(|| format!("Failed to read {}", storage_path.display()));
    }
    let path = files::export(&text, target)?;
    println!("Exported {} bytes to {}", text.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    init_logging(effective.log_file.as_deref(), cli.command.is_none())?;
    tracing::debug!(?effective, "effective configuration");

    let storage_path = effective
        .storage
        .clone()
        .unwrap_or_else(default_storage_path);
    let export_dir = effective
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Command::Render { file, output }) => {
            render_command(file.as_deref(), output.as_deref())
        }
        Some(Command::Import { file }) => import_command(&file, &storage_path),
        Some(Command::Export { output }) => {
            export_command(&storage_path, output.as_deref().unwrap_or(&export_dir))
        }
        None => {
            let mut app = App::new(storage_path)
                .with_theme(effective.theme.unwrap_or_default())
                .with_autosave(!effective.no_autosave)
                .with_export_dir(export_dir)
                .with_config_paths(
                    Some(global_path.clone()),
                    if local_path.exists() {
                        Some(local_path.clone())
                    } else {
                        None
                    },
                );
            app.run().context("Application error")
        }
    }
}
