/*!
 * llmcontext - Aggregate directory contents into a single document for LLM context
 *
 * This library recursively scans directory trees, applies layered
 * .gitignore/.llmignore rules with gitignore-dialect semantics, and
 * formats the surviving files into one text document suitable for a
 * large-language-model context window.
 */

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use diagnostics::{ConsoleSink, EventSink, NullSink, ScanEvent};
pub use error::{LlmContextError, Result};
pub use patterns::{effective_pattern, CompiledSpec, PatternResolver, IGNORE_FILE_NAMES};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::{ScanStatistics, Scanner};
pub use types::{IgnoreRule, OutputRecord, Payload, RootScan};
pub use utils::{count_files, to_posix};
pub use writer::ContextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
