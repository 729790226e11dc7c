//! Snapshot tree model.
//!
//! A tree is a [`Directory`] whose entries map a single path segment to a
//! [`TreeNode`]. Serialized, a directory is a JSON object and a file is a
//! JSON string, so `{}` (empty directory) and `""` (empty file) never collide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A directory or a text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Directory(Directory),
    File(FileNode),
}

impl TreeNode {
    pub fn file(content: impl Into<String>) -> Self {
        Self::File(FileNode::new(content))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

impl From<Directory> for TreeNode {
    fn from(dir: Directory) -> Self {
        Self::Directory(dir)
    }
}

impl From<FileNode> for TreeNode {
    fn from(file: FileNode) -> Self {
        Self::File(file)
    }
}

/// Text content of a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileNode {
    pub content: String,
}

impl FileNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// A directory: entry names are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    pub entries: BTreeMap<String, TreeNode>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<TreeNode>) {
        self.entries.insert(name.into(), node.into());
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, FileNode::new(content));
        self
    }

    pub fn with_directory(mut self, name: impl Into<String>, dir: Directory) -> Self {
        self.insert(name, dir);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.entries.get(name)
    }

    /// Look up a slash-separated relative path.
    pub fn lookup(&self, path: &str) -> Option<&TreeNode> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;
        for segment in segments {
            match node {
                TreeNode::Directory(dir) => node = dir.entries.get(segment)?,
                TreeNode::File(_) => return None,
            }
        }
        Some(node)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TreeNode)> {
        self.entries.iter()
    }

    /// Every file in the tree as `(relative_path, content)`, depth first.
    pub fn files(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_files("", &mut out);
        out
    }

    fn collect_files<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (name, node) in &self.entries {
            let path = join_relative(prefix, name);
            match node {
                TreeNode::Directory(dir) => dir.collect_files(&path, out),
                TreeNode::File(file) => out.push((path, file.content.as_str())),
            }
        }
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.accumulate(&mut stats);
        stats
    }

    fn accumulate(&self, stats: &mut TreeStats) {
        for node in self.entries.values() {
            match node {
                TreeNode::Directory(dir) => {
                    stats.directories += 1;
                    dir.accumulate(stats);
                }
                TreeNode::File(file) => {
                    stats.files += 1;
                    stats.bytes += file.size();
                }
            }
        }
    }

    /// Check that every entry name is a single, safe path segment.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, node) in &self.entries {
            validate_entry_name(name)?;
            if let TreeNode::Directory(dir) = node {
                dir.validate()?;
            }
        }
        Ok(())
    }
}

/// Totals over a tree (the root itself is not counted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub bytes: usize,
}

pub fn validate_entry_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name == "." || name == ".." {
        Some("name cannot be a relative path component")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else if name.contains('\0') {
        Some("name cannot contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidEntryName {
            name: name.to_string(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

/// Join a relative parent path and a child name with `/`.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
