//! `sheetkeeper`: extract a deterministic style sheet from a rule manifest.
//!
//! ```text
//! sheetkeeper [--hydrate <sheet.css>] <manifest>
//! ```
//!
//! Rules are filed into an ordered sheet and its text is printed. With
//! `--hydrate`, a previously extracted sheet seeds the live container first,
//! so rules it already holds are not emitted twice.

mod manifest;

use clap::Parser;
use manifest::{ManifestError, parse_manifest};
use ordered_sheet::{HydrateError, Insertion, OrderedSheet, RuleList};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, PartialEq, Eq, Parser)]
#[command(name = "sheetkeeper")]
#[command(version, about = "Extract an ordered, deduplicated style sheet from a rule manifest", long_about = None)]
struct Args {
    /// Previously extracted sheet to hydrate before inserting
    #[arg(long, value_name = "PATH")]
    hydrate: Option<PathBuf>,

    /// Manifest of `<group> <rule>` lines
    manifest: PathBuf,
}

#[derive(Debug)]
enum CliError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Manifest {
        path: PathBuf,
        source: ManifestError,
    },
    Hydrate {
        path: PathBuf,
        source: HydrateError,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            CliError::Manifest { path, source } => write!(f, "{}: {source}", path.display()),
            CliError::Hydrate { path, source } => {
                write!(f, "{}: cannot hydrate: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn extract(args: &Args) -> Result<String, CliError> {
    let mut sheet = match &args.hydrate {
        Some(path) => {
            let existing = RuleList::from_text(&read(path)?);
            OrderedSheet::with_container(existing).map_err(|source| CliError::Hydrate {
                path: path.clone(),
                source,
            })?
        }
        None => OrderedSheet::new(),
    };

    let entries = parse_manifest(&read(&args.manifest)?).map_err(|source| CliError::Manifest {
        path: args.manifest.clone(),
        source,
    })?;

    let mut inserted = 0usize;
    for entry in &entries {
        match sheet.insert(&entry.rule, entry.group) {
            Insertion::Inserted => inserted += 1,
            Insertion::Duplicate => {
                log::debug!("skipping duplicate selector: {}", entry.rule);
            }
            Insertion::Rejected => log::warn!("rule rejected: {}", entry.rule),
        }
    }
    log::info!(
        "{inserted} of {} rules inserted into {} groups",
        entries.len(),
        sheet.groups().count()
    );
    Ok(sheet.text_content())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match extract(&args) {
        Ok(text) => {
            if !text.is_empty() {
                println!("{text}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("sheetkeeper: {err}");
            ExitCode::FAILURE
        }
    }
}
