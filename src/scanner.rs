/*!
 * Tree walking: produce one record per included file
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::diagnostics::{EventSink, ScanEvent};
use crate::error::Result;
use crate::patterns::CompiledSpec;
use crate::report::FileReportInfo;
use crate::types::{OutputRecord, Payload, RootScan};
use crate::utils::to_posix;

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScanStatistics {
    /// Number of files that produced a record
    pub files_processed: usize,
    /// Total number of lines across text payloads
    pub total_lines: usize,
    /// Total number of characters across text payloads
    pub total_chars: usize,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

impl ScanStatistics {
    /// Fold another root's statistics into this one
    pub fn merge(&mut self, other: ScanStatistics) {
        self.files_processed += other.files_processed;
        self.total_lines += other.total_lines;
        self.total_chars += other.total_chars;
        self.file_details.extend(other.file_details);
    }
}

/// Walks one content root against a compiled pattern spec
///
/// Directories matching the spec are pruned before descent; files are
/// matched individually and read as strict UTF-8. No single file failure
/// aborts the walk: unreadable or non-text files become placeholder
/// payloads.
pub struct Scanner<'a> {
    /// Content root whose files are enumerated
    root: PathBuf,
    /// Root the spec's patterns were anchored against
    spec_root: PathBuf,
    spec: CompiledSpec,
    /// The output document itself, never emitted as a record
    output_file: Option<PathBuf>,
    sink: &'a dyn EventSink,
    progress: Arc<ProgressBar>,
    statistics: Arc<Mutex<ScanStatistics>>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner whose spec was built at the content root itself
    pub fn new(
        root: PathBuf,
        spec: CompiledSpec,
        sink: &'a dyn EventSink,
        progress: Arc<ProgressBar>,
    ) -> Self {
        Self {
            spec_root: root.clone(),
            root,
            spec,
            output_file: None,
            sink,
            progress,
            statistics: Arc::new(Mutex::new(ScanStatistics::default())),
        }
    }

    /// Match paths against a spec anchored at a different root than the
    /// content root (ignore rules inherited from an ancestor directory)
    pub fn with_spec_root(mut self, spec_root: PathBuf) -> Self {
        self.spec_root = spec_root;
        self
    }

    /// Never emit a record for the given output document path
    pub fn exclude_output(mut self, path: PathBuf) -> Self {
        self.output_file = Some(path);
        self
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScanStatistics {
        self.statistics.lock().unwrap().clone()
    }

    /// Walk the content root and return its records in visitation order
    ///
    /// Only an inaccessible content root is an error; every per-file
    /// failure is converted into a placeholder payload.
    pub fn scan(&self) -> Result<RootScan> {
        let abs_root = fs::canonicalize(&self.root)?;
        // The content root must at least be listable; anything deeper is
        // recovered locally.
        fs::read_dir(&abs_root)?;

        let mut records = Vec::new();
        self.scan_directory(&abs_root, Path::new(""), &mut records);
        Ok(RootScan {
            root: abs_root,
            records,
        })
    }

    /// Process one directory level: prune ignored child directories,
    /// recurse into the rest, then read the included files in parallel
    fn scan_directory(&self, abs_path: &Path, rel_path: &Path, records: &mut Vec<OutputRecord>) {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => dirs.push(entry),
                Ok(entry) if entry.file_type().is_file() => files.push(entry),
                // Symlinks and other non-regular entries produce no records
                Ok(_) => {}
                Err(err) => self.sink.emit(ScanEvent::DirectoryUnreadable {
                    path: to_posix(rel_path),
                    reason: err.to_string(),
                }),
            }
        }

        for entry in dirs {
            let child_rel = rel_path.join(entry.file_name());
            if self.is_ignored(entry.path(), true) {
                self.sink.emit(ScanEvent::DirectoryPruned {
                    path: to_posix(&child_rel),
                });
                continue;
            }
            self.scan_directory(entry.path(), &child_rel, records);
        }

        let mut included = Vec::new();
        for entry in files {
            if self.is_output_file(entry.path()) {
                continue;
            }
            let child_rel = rel_path.join(entry.file_name());
            if self.is_ignored(entry.path(), false) {
                self.sink.emit(ScanEvent::FileIgnored {
                    path: to_posix(&child_rel),
                });
                continue;
            }
            included.push((entry, child_rel));
        }

        // Order-preserving parallel read of this level's files
        let file_records: Vec<OutputRecord> = included
            .par_iter()
            .map(|(entry, child_rel)| self.process_file(entry.path(), child_rel))
            .collect();

        records.extend(file_records);
    }

    /// Match an absolute path against the spec, relative to the spec root
    fn is_ignored(&self, abs_path: &Path, is_dir: bool) -> bool {
        match abs_path.strip_prefix(&self.spec_root) {
            Ok(rel) => self.spec.is_ignored(rel, is_dir),
            // Outside the spec root: no patterns apply
            Err(_) => false,
        }
    }

    fn is_output_file(&self, abs_path: &Path) -> bool {
        self.output_file
            .as_deref()
            .map_or(false, |out| abs_path == out)
    }

    /// Read one included file and build its record
    fn process_file(&self, abs_path: &Path, rel_path: &Path) -> OutputRecord {
        self.progress.inc(1);

        let path = to_posix(rel_path);
        let payload = self.read_payload(abs_path, &path);
        self.record_statistics(&path, &payload);

        OutputRecord { path, payload }
    }

    /// Strict UTF-8 decode; failures become placeholder payloads
    fn read_payload(&self, abs_path: &Path, display_path: &str) -> Payload {
        match fs::read(abs_path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => Payload::Text(content),
                Err(_) => {
                    self.sink.emit(ScanEvent::BinarySkipped {
                        path: display_path.to_string(),
                    });
                    Payload::Binary
                }
            },
            Err(err) => {
                self.sink.emit(ScanEvent::FileReadError {
                    path: display_path.to_string(),
                    reason: err.to_string(),
                });
                Payload::ReadError(err.to_string())
            }
        }
    }

    fn record_statistics(&self, path: &str, payload: &Payload) {
        let mut stats = self.statistics.lock().unwrap();
        stats.files_processed += 1;
        let info = match payload {
            Payload::Text(content) => {
                let lines = content.lines().count();
                let chars = content.chars().count();
                stats.total_lines += lines;
                stats.total_chars += chars;
                FileReportInfo { lines, chars }
            }
            _ => FileReportInfo::default(),
        };
        stats.file_details.insert(path.to_string(), info);
    }
}
