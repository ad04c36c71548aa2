/*!
 * Configuration handling for llmcontext
 */

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::report::ReportFormat;

/// Command-line arguments for llmcontext
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "llmcontext",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aggregate directory contents into a single text document for LLM context",
    long_about = "Recursively scans one or more directories, reads file contents, and formats them for LLM analysis. Obeys .gitignore and .llmignore rules; each file's path appears as a header above its content."
)]
pub struct Args {
    /// Target directories to process
    #[clap(default_value = ".")]
    pub directories: Vec<String>,

    /// Output file name
    #[clap(short, long, default_value = "llmcontext.txt")]
    pub output_file: String,

    /// Show ignored files/directories and other diagnostics on stderr
    #[clap(short, long)]
    pub verbose: bool,

    /// Number of threads to use for reading files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Format of the post-scan report
    #[clap(long, value_enum, default_value_t = ReportFormat::ConsoleTable)]
    pub report: ReportFormat,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directories to scan; each gets its own pattern resolution pass
    pub scan_roots: Vec<PathBuf>,

    /// Output document path
    pub output_file: PathBuf,

    /// Whether to render diagnostic events
    pub verbose: bool,

    /// Number of threads to use for processing
    pub num_threads: usize,

    /// Format of the post-scan report
    pub report_format: ReportFormat,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            scan_roots: args.directories.iter().map(PathBuf::from).collect(),
            output_file: PathBuf::from(args.output_file),
            verbose: args.verbose,
            num_threads: args.threads,
            report_format: args.report,
        }
    }

    /// Validate the configuration and resolve all paths to absolute form
    ///
    /// Fails before any output is produced when a requested root does not
    /// exist or is not a directory, or the output directory is missing.
    pub fn validate(&mut self) -> Result<()> {
        let mut resolved = Vec::with_capacity(self.scan_roots.len());
        for dir in &self.scan_roots {
            ensure!(
                dir.is_dir(),
                InvalidRoot,
                "'{}' does not exist or is not a directory",
                dir.display()
            );
            resolved.push(fs::canonicalize(dir)?);
        }
        self.scan_roots = resolved;

        // Absolute output path; the scanner compares against it to skip
        // the document itself
        let output = if self.output_file.is_absolute() {
            self.output_file.clone()
        } else {
            env::current_dir()?.join(&self.output_file)
        };
        self.output_file = match (output.parent(), output.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                ensure!(
                    parent.exists(),
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
                fs::canonicalize(parent)?.join(name)
            }
            _ => output,
        };

        Ok(())
    }
}
