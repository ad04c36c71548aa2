/*!
 * Structured diagnostic events emitted by the resolver and the scanner
 *
 * The pattern resolver and the tree walker report discovery, skip and
 * match events into an injected sink; the CLI decides whether to render
 * them.
 */

use std::path::PathBuf;

/// A diagnostic event emitted during pattern resolution or tree walking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// An ignore file was discovered under the scan root
    IgnoreFileDiscovered { path: PathBuf },
    /// An ignore file exists but could not be read; its rules are omitted
    IgnoreFileUnreadable { path: PathBuf, reason: String },
    /// A rule was rewritten into its root-relative effective pattern
    PatternLoaded {
        raw: String,
        effective: String,
        source_dir: PathBuf,
    },
    /// An effective pattern was rejected by the matcher and skipped
    PatternDiscarded { effective: String, reason: String },
    /// A directory matched the spec and its subtree will not be descended
    DirectoryPruned { path: String },
    /// A file matched the spec and was skipped
    FileIgnored { path: String },
    /// A file contained non-UTF-8 bytes and was emitted as a placeholder
    BinarySkipped { path: String },
    /// A file could not be read and was emitted as an error placeholder
    FileReadError { path: String, reason: String },
    /// A directory could not be listed and its subtree was skipped
    DirectoryUnreadable { path: String, reason: String },
}

/// Sink for diagnostic events
///
/// Implementations must be thread-safe: the scanner emits events from
/// worker threads while reading files in parallel.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScanEvent);
}

/// Sink that renders events to stderr when verbose output is enabled
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: ScanEvent) {
        if !self.verbose {
            return;
        }
        match event {
            ScanEvent::IgnoreFileDiscovered { path } => {
                eprintln!("Reading ignore file: {}", path.display());
            }
            ScanEvent::IgnoreFileUnreadable { path, reason } => {
                eprintln!("Warning: could not read {}: {}", path.display(), reason);
            }
            ScanEvent::PatternLoaded {
                raw,
                effective,
                source_dir,
            } => {
                eprintln!(
                    "Loaded pattern: '{}' from {} -> effective as: '{}'",
                    raw,
                    source_dir.display(),
                    effective
                );
            }
            ScanEvent::PatternDiscarded { effective, reason } => {
                eprintln!("Discarded pattern '{}': {}", effective, reason);
            }
            ScanEvent::DirectoryPruned { path } => {
                eprintln!("Ignoring directory during walk: {}", path);
            }
            ScanEvent::FileIgnored { path } => {
                eprintln!("Ignoring file: {}", path);
            }
            ScanEvent::BinarySkipped { path } => {
                eprintln!("Skipping binary/non-UTF-8 file: {}", path);
            }
            ScanEvent::FileReadError { path, reason } => {
                eprintln!("Error reading file {}: {}", path, reason);
            }
            ScanEvent::DirectoryUnreadable { path, reason } => {
                eprintln!("Error listing directory {}: {}", path, reason);
            }
        }
    }
}

/// Sink that discards every event
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ScanEvent) {}
}
