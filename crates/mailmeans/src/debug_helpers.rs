use crate::Document;
use clap::Parser;
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
pub struct InputArgs {
    /// Path to a JSON array of documents (`id`, `subject`, `snippet`, `from`, ...)
    pub input: PathBuf,
}

#[derive(Debug, Snafu)]
pub enum LoadDocumentsError {
    #[snafu(display("could not read {}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("{} is not a JSON array of documents", path.display()))]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_documents(path: &Path) -> Result<Vec<Document>, LoadDocumentsError> {
    let raw = std::fs::read_to_string(path).context(ReadSnafu { path })?;
    parse_documents(&raw).context(ParseSnafu { path })
}

pub fn parse_documents(raw: &str) -> Result<Vec<Document>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
