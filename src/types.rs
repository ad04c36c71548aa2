/*!
 * Core types and data structures for the llmcontext application
 */

use std::path::PathBuf;

/// One raw pattern line from an ignore file, tagged with the absolute
/// directory of the file that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    /// The pattern text as it appeared in the ignore file (trimmed)
    pub pattern: String,
    /// Absolute path of the directory containing the declaring ignore file
    pub source_dir: PathBuf,
}

/// Payload of one output record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Decoded UTF-8 file content
    Text(String),
    /// The file contained bytes that are not valid UTF-8
    Binary,
    /// The file could not be read at all
    ReadError(String),
}

impl Payload {
    /// Render the payload as it appears in the output document
    pub fn render(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Payload::Text(content) => content.as_str().into(),
            Payload::Binary => "[Skipped: Binary or non-UTF-8 file]".into(),
            Payload::ReadError(description) => {
                format!("[Error reading file: {}]", description).into()
            }
        }
    }
}

/// One included file: its root-relative path and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Path relative to the content root, forward-slash separated
    pub path: String,
    /// Decoded content or placeholder
    pub payload: Payload,
}

/// The result of walking one scan root
#[derive(Debug, Clone)]
pub struct RootScan {
    /// Absolute path of the scanned root
    pub root: PathBuf,
    /// Records in walk order
    pub records: Vec<OutputRecord>,
}
