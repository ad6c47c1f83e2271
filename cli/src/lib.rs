#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Command-line host for the `ToString` generator.
//!
//! Reads C# inputs from disk, runs one generator pass over them and writes
//! every registered source into an output directory.

pub mod args;
pub mod config;
mod error;
pub mod error_adapter;

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};

use reprgen::{Diagnostic, Host};

pub use args::Args;
pub use config::FailOn;
pub use error::CliError;

const SOURCE_EXTENSION: &str = "cs";

/// Result of a completed run.
#[derive(Debug)]
pub struct Outcome {
    /// Input text keyed by source id.
    pub inputs: BTreeMap<String, String>,
    /// Files written, in registration order. Empty under `--check`.
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub fail_on: FailOn,
}

impl Outcome {
    /// Number of diagnostics at or above the failure threshold.
    pub fn failing(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| self.fail_on.fails(d.severity()))
            .count()
    }

    pub fn is_failure(&self) -> bool {
        self.failing() > 0
    }
}

/// [`Host`] writing registered sources into a directory.
struct DirectoryHost<'a> {
    out_dir: &'a Path,
    check: bool,
    written: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
    error: Option<CliError>,
}

impl<'a> DirectoryHost<'a> {
    fn new(out_dir: &'a Path, check: bool) -> Self {
        Self {
            out_dir,
            check,
            written: Vec::new(),
            diagnostics: Vec::new(),
            error: None,
        }
    }
}

impl Host for DirectoryHost<'_> {
    fn register(&mut self, source_id: &str, source_text: &str) {
        let path = self.out_dir.join(output_file_name(source_id));
        if self.check {
            debug!(path:% = path.display(); "check mode, not writing");
            return;
        }
        if self.error.is_some() {
            return;
        }

        match fs::write(&path, source_text) {
            Ok(()) => {
                info!(path:% = path.display(); "Wrote generated source");
                self.written.push(path);
            }
            Err(source) => self.error = Some(CliError::Write { path, source }),
        }
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

/// File name for a registered source id.
fn output_file_name(source_id: &str) -> String {
    if Path::new(source_id)
        .extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
    {
        source_id.to_owned()
    } else {
        format!("{source_id}.{SOURCE_EXTENSION}")
    }
}

/// Expand `inputs` into a list of source files. Directories are searched
/// recursively for `.cs` files in sorted order; files are taken as given.
fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut found = Vec::new();
    for input in inputs {
        let metadata = fs::metadata(input).map_err(|source| CliError::Read {
            path: input.clone(),
            source,
        })?;
        if metadata.is_dir() {
            collect_dir(input, &mut found)?;
        } else {
            found.push(input.clone());
        }
    }

    let mut seen = HashSet::new();
    found.retain(|path| seen.insert(path.clone()));
    Ok(found)
}

fn collect_dir(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let read_err = |source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_dir(&path, found)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext == SOURCE_EXTENSION)
        {
            trace!(path:% = path.display(); "found source");
            found.push(path);
        }
    }
    Ok(())
}

fn read_sources(paths: &[PathBuf]) -> Result<BTreeMap<String, String>, CliError> {
    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

/// Run one generator pass as described by `args`.
///
/// Returns `Err` when the run could not complete. Diagnostics never make this
/// fail; check [`Outcome::is_failure`].
pub fn run(args: &Args) -> Result<Outcome, CliError> {
    let config = config::load_config(args.config.as_ref())?;
    debug!(config:? = config; "configuration loaded");

    let paths = collect_sources(&args.inputs)?;
    if paths.is_empty() {
        return Err(CliError::NoSources);
    }
    info!(count = paths.len(); "Reading sources");
    let inputs = read_sources(&paths)?;

    let parse = config.parse.to_parse_config();
    let compilation = reprgen::compile(
        inputs.iter().map(|(id, text)| (id.as_str(), text.as_str())),
        &parse,
    )
    .map_err(|err| CliError::Parse {
        src: inputs.get(&err.source_id).cloned().unwrap_or_default(),
        source_id: err.source_id,
        error: err.error,
    })?;

    if !args.check {
        fs::create_dir_all(&args.out_dir).map_err(|source| CliError::Write {
            path: args.out_dir.clone(),
            source,
        })?;
    }

    let mut host = DirectoryHost::new(&args.out_dir, args.check);
    reprgen::generator(parse, config.output).run(&compilation, &mut host)?;
    if let Some(err) = host.error {
        return Err(err);
    }

    let outcome = Outcome {
        inputs,
        written: host.written,
        diagnostics: host.diagnostics,
        fail_on: config.diagnostics.fail_on,
    };
    if outcome.is_failure() {
        warn!(failing = outcome.failing(); "Diagnostics reached the failure threshold");
    }
    Ok(outcome)
}
