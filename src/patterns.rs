/*!
 * Ignore-pattern resolution
 *
 * Discovers `.gitignore`/`.llmignore` files anywhere under a scan root,
 * rewrites every rule into a pattern anchored against that root, and
 * compiles the ordered list into a single gitignore-dialect matcher.
 *
 * Precedence model: rules from deeper ignore files are appended after
 * rules from shallower ones, and the matcher resolves a path against the
 * last pattern that matches it. A later `!pattern` therefore un-ignores
 * what an earlier pattern excluded.
 */

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use walkdir::WalkDir;

use crate::diagnostics::{EventSink, ScanEvent};
use crate::error::Result;
use crate::types::IgnoreRule;
use crate::utils::to_posix;

/// File names recognized as ignore files
pub const IGNORE_FILE_NAMES: [&str; 2] = [".gitignore", ".llmignore"];

/// Discovers and compiles the ignore rules of one scan root
pub struct PatternResolver<'a> {
    root: PathBuf,
    sink: &'a dyn EventSink,
}

impl<'a> PatternResolver<'a> {
    /// Create a resolver for the given scan root
    pub fn new(root: impl Into<PathBuf>, sink: &'a dyn EventSink) -> Self {
        Self {
            root: root.into(),
            sink,
        }
    }

    /// Run the full pipeline: discover, order, rewrite, compile
    pub fn resolve(&self) -> Result<CompiledSpec> {
        let rules = self.discover_rules();
        let patterns = self.effective_patterns(&rules);
        CompiledSpec::compile(&self.root, &patterns, self.sink)
    }

    /// Discover every ignore rule under the root, ordered for precedence
    ///
    /// Rules are sorted by the depth of their declaring directory relative
    /// to the root, ascending, with a stable sort: rules from the same
    /// file, and rules from files at equal depth, keep discovery order.
    /// Within one directory `.gitignore` is read before `.llmignore`.
    pub fn discover_rules(&self) -> Vec<IgnoreRule> {
        let mut rules = Vec::new();

        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !IGNORE_FILE_NAMES.iter().any(|&n| n == name) {
                continue;
            }
            self.sink.emit(ScanEvent::IgnoreFileDiscovered {
                path: entry.path().to_path_buf(),
            });
            let text = match fs::read_to_string(entry.path()) {
                Ok(text) => text,
                Err(err) => {
                    self.sink.emit(ScanEvent::IgnoreFileUnreadable {
                        path: entry.path().to_path_buf(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let source_dir = match entry.path().parent() {
                Some(parent) => parent.to_path_buf(),
                None => continue,
            };
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                rules.push(IgnoreRule {
                    pattern: trimmed.to_string(),
                    source_dir: source_dir.clone(),
                });
            }
        }

        rules.sort_by_key(|rule| self.rule_depth(rule));
        rules
    }

    /// Depth of a rule's declaring directory, in path segments below root
    fn rule_depth(&self, rule: &IgnoreRule) -> usize {
        rule.source_dir
            .strip_prefix(&self.root)
            .map(|rel| rel.components().count())
            .unwrap_or(usize::MAX)
    }

    /// Rewrite the ordered rules into root-relative effective patterns
    pub fn effective_patterns(&self, rules: &[IgnoreRule]) -> Vec<String> {
        let mut patterns = Vec::with_capacity(rules.len());
        for rule in rules {
            let prefix = rule
                .source_dir
                .strip_prefix(&self.root)
                .map(to_posix)
                .unwrap_or_default();
            if let Some(effective) = effective_pattern(&rule.pattern, &prefix) {
                self.sink.emit(ScanEvent::PatternLoaded {
                    raw: rule.pattern.clone(),
                    effective: effective.clone(),
                    source_dir: rule.source_dir.clone(),
                });
                patterns.push(effective);
            }
        }
        patterns
    }
}

/// Rewrite one ignore-file pattern into its root-relative form
///
/// `prefix` is the declaring directory's path relative to the scan root,
/// forward-slash separated, empty when the ignore file sits at the root.
///
/// A leading `!` is peeled off before anchoring and re-applied afterwards,
/// so negations declared in nested ignore files stay negations instead of
/// becoming literal `!` path segments.
///
/// Returns `None` for patterns that normalize to nothing.
pub fn effective_pattern(pattern: &str, prefix: &str) -> Option<String> {
    let (negated, body) = match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };

    let joined = if let Some(anchored) = body.strip_prefix('/') {
        // Leading slash: anchored to the declaring directory
        join_prefix(prefix, anchored)
    } else if body.contains('/') {
        // Slash in the body: relative to the declaring directory
        join_prefix(prefix, body)
    } else if prefix.is_empty() {
        // Bare name at the root: matches at any depth unmodified
        body.to_string()
    } else {
        // Bare name below the root: match at the declaring directory and
        // at any depth below it
        format!("{}/**/{}", prefix, body)
    };

    // Forward slashes only, single-dot segments dropped
    let mut effective = joined
        .replace('\\', "/")
        .split('/')
        .filter(|segment| *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    // The directory-only marker must survive normalization
    if body.ends_with('/') && !effective.ends_with('/') && !effective.is_empty() {
        effective.push('/');
    }

    if effective.is_empty() {
        return None;
    }
    Some(if negated {
        format!("!{}", effective)
    } else {
        effective
    })
}

fn join_prefix(prefix: &str, pattern: &str) -> String {
    if prefix.is_empty() {
        pattern.to_string()
    } else if pattern.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, pattern)
    }
}

/// An ordered pattern matcher built from effective patterns
///
/// Supports one operation: given a root-relative path, report whether the
/// pattern set ignores it. Matching implements last-match-wins with
/// negation and directory-only semantics.
pub struct CompiledSpec {
    matcher: Gitignore,
    len: usize,
}

impl CompiledSpec {
    /// Compile an ordered effective-pattern list
    ///
    /// Patterns the matcher rejects are skipped with a diagnostic event;
    /// only a failure to build the final matcher is an error.
    pub fn compile(root: &Path, patterns: &[String], sink: &dyn EventSink) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut len = 0;
        for pattern in patterns {
            match builder.add_line(None, pattern) {
                Ok(_) => len += 1,
                Err(err) => sink.emit(ScanEvent::PatternDiscarded {
                    effective: pattern.clone(),
                    reason: err.to_string(),
                }),
            }
        }
        let matcher = builder.build()?;
        Ok(Self { matcher, len })
    }

    /// Whether the given root-relative path is ignored
    pub fn is_ignored(&self, rel_path: impl AsRef<Path>, is_dir: bool) -> bool {
        matches!(self.matcher.matched(rel_path, is_dir), Match::Ignore(_))
    }

    /// Number of patterns that compiled
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
