use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ocindex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble an index by fetching per-platform manifests from a registry
    ///
    /// For each configured (os, architecture, kind) combination the manifest
    /// at `<BASE>-{os}-{arch}-{kind}` is fetched and added to the index.
    Remote {
        /// Base image reference the platform/kind suffixes are appended to
        #[arg(value_name = "BASE")]
        base: String,

        /// Platforms to enumerate (e.g. linux/amd64, linux/arm64)
        /// Can be specified multiple times or as a comma-separated list
        #[arg(long, value_delimiter = ',')]
        platform: Option<Vec<String>>,

        /// Artifact kinds to enumerate (e.g. docker, oras)
        #[arg(long, value_delimiter = ',')]
        kind: Option<Vec<String>>,

        /// Serialize with sorted keys for byte-reproducible output
        #[arg(long)]
        sort: bool,

        /// Write the index to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble an index from local manifest files
    ///
    /// Each file may carry a platform annotation, e.g. `a.json:linux/amd64`.
    Local {
        /// Manifest files, each optionally suffixed with :<os>/<arch>
        #[arg(value_name = "MANIFEST", required = true)]
        manifests: Vec<String>,

        /// Keep source order and natural key order instead of the default
        /// sorted, byte-reproducible serialization
        #[arg(long)]
        no_sort: bool,

        /// Write the index to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}
