//! `\input{...}` expansion.
//!
//! Copies a document to a caller-supplied sink, replacing every line that
//! contains `\input{name}` with the expanded content of `name`. The rest of
//! such a line is dropped. Every file visited is recorded, in visiting order,
//! in an accumulator that each recursive call receives and returns.
//!
//! Input names resolve against the root document's directory. A name without
//! an extension that does not exist as given is retried with `.tex`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::document::split_lines;
use crate::error::{IoResultExt, TexrefError, TexrefResult};

/// A file reached during expansion and how deeply it was nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFile {
    pub path: PathBuf,
    /// 0 for the root document
    pub depth: usize,
}

/// Returns the name inside `\input{...}` on `line`, if any.
pub fn input_target(line: &str) -> Option<&str> {
    const COMMAND: &str = "\\input{";
    let start = line.find(COMMAND)? + COMMAND.len();
    let rest = &line[start..];
    let end = rest.find('}')?;
    let name = rest[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Expands inputs relative to a fixed base directory.
#[derive(Debug, Clone)]
pub struct InputExpander {
    base_dir: PathBuf,
}

impl InputExpander {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Expander for `root`, resolving against the directory containing it.
    pub fn for_root(root: &Path) -> Self {
        let base = root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(base)
    }

    /// Locates the file an `\input` name refers to.
    pub fn resolve(&self, name: &str, included_from: &Path) -> TexrefResult<PathBuf> {
        let candidate = self.base_dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if candidate.extension().is_none() {
            let with_ext = candidate.with_extension("tex");
            if with_ext.is_file() {
                return Ok(with_ext);
            }
        }
        Err(TexrefError::missing_input(candidate, included_from))
    }

    /// Expands `path` at `depth` into `sink`, returning the grown accumulator.
    ///
    /// `chain` holds the files currently being expanded, outermost first.
    pub fn expand<W: Write>(
        &self,
        path: &Path,
        depth: usize,
        sink: &mut W,
        mut visited: Vec<InputFile>,
        chain: &[PathBuf],
    ) -> TexrefResult<Vec<InputFile>> {
        let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if chain.contains(&identity) {
            return Err(TexrefError::InputCycle {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).with_path(path)?;
        debug!(file = %path.display(), depth, "expanding inputs");
        visited.push(InputFile {
            path: path.to_path_buf(),
            depth,
        });

        let mut inner_chain = chain.to_vec();
        inner_chain.push(identity);

        for line in split_lines(&content) {
            match input_target(&line) {
                Some(name) => {
                    let target = self.resolve(name, path)?;
                    visited = self.expand(&target, depth + 1, sink, visited, &inner_chain)?;
                }
                None => writeln!(sink, "{}", line).with_path(path)?,
            }
        }

        Ok(visited)
    }
}

/// Expands `root` and everything it inputs into `sink`.
pub fn expand_inputs<W: Write>(root: &Path, sink: &mut W) -> TexrefResult<Vec<InputFile>> {
    InputExpander::for_root(root).expand(root, 0, sink, Vec::new(), &[])
}

/// Collects the input tree of `root` without keeping the expanded text.
pub fn input_tree(root: &Path) -> TexrefResult<Vec<InputFile>> {
    expand_inputs(root, &mut std::io::sink())
}

/// One line per visited file, indented by nesting depth.
pub fn render_input_tree(files: &[InputFile]) -> String {
    files
        .iter()
        .map(|f| format!("{}{}\n", "    ".repeat(f.depth), f.path.display()))
        .collect()
}
