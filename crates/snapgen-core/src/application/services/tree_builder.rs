//! Tree Builder - walks a directory into a [`Directory`] snapshot.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    domain::{Directory, FileNode, PathMatcher, normalize_separators},
    error::SnapgenResult,
};

/// A file that was left out because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What a build left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Unreadable files, in walk order.
    pub skipped: Vec<SkippedFile>,
    /// Entries dropped by the matcher (excluded directories count once).
    pub excluded: usize,
}

/// Result of [`TreeBuilder::build_root`].
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub root: Directory,
    pub report: BuildReport,
}

/// Builds snapshot trees through the [`Filesystem`] port.
pub struct TreeBuilder<'a> {
    filesystem: &'a dyn Filesystem,
    matcher: &'a PathMatcher,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, matcher: &'a PathMatcher) -> Self {
        Self {
            filesystem,
            matcher,
        }
    }

    /// Snapshot `root`, collecting skipped files into a report.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn build_root(&self, root: &Path) -> SnapgenResult<BuildOutcome> {
        let mut report = BuildReport::default();
        let tree = self.walk(root, root, &mut report)?;
        debug!(
            skipped = report.skipped.len(),
            excluded = report.excluded,
            "Snapshot tree built"
        );
        Ok(BuildOutcome { root: tree, report })
    }

    /// Snapshot `directory`, computing exclusion paths relative to `base`.
    ///
    /// On the initial call both are the scan root.
    pub fn build(&self, directory: &Path, base: &Path) -> SnapgenResult<Directory> {
        let mut report = BuildReport::default();
        self.walk(directory, base, &mut report)
    }

    fn walk(&self, directory: &Path, base: &Path, report: &mut BuildReport) -> SnapgenResult<Directory> {
        let mut tree = Directory::new();

        for entry in self.filesystem.read_dir(directory)? {
            let full_path = directory.join(&entry.name);

            let Ok(name) = entry.name.into_string() else {
                warn!(path = %full_path.display(), "Skipping entry with a non UTF-8 name");
                report.skipped.push(SkippedFile {
                    path: full_path,
                    reason: "name is not valid UTF-8".into(),
                });
                continue;
            };

            let relative = relative_path(base, &full_path)?;
            if let Some(pattern) = self.matcher.matching_pattern(&relative) {
                debug!(path = %relative, pattern = %pattern, "Excluded");
                report.excluded += 1;
                continue;
            }

            match entry.kind {
                EntryKind::Directory => {
                    let child = self.walk(&full_path, base, report)?;
                    tree.insert(name, child);
                }
                EntryKind::File => match self.filesystem.read_to_string(&full_path) {
                    Ok(content) => tree.insert(name, FileNode::new(content)),
                    Err(e) => {
                        warn!(
                            path = %full_path.display(),
                            error = %e,
                            "Could not read file, it will be left out"
                        );
                        report.skipped.push(SkippedFile {
                            path: full_path,
                            reason: e.to_string(),
                        });
                    }
                },
                EntryKind::Other => {
                    debug!(path = %relative, "Skipping non-regular entry");
                }
            }
        }

        Ok(tree)
    }
}

/// `full` relative to `base`, joined with `/`.
fn relative_path(base: &Path, full: &Path) -> SnapgenResult<String> {
    let relative = full
        .strip_prefix(base)
        .map_err(|_| ApplicationError::FilesystemError {
            path: full.to_path_buf(),
            reason: format!("path is not inside scan root {}", base.display()),
        })?;

    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    Ok(normalize_separators(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DirEntry, MockFilesystem};
    use crate::domain::{PrefixMode, TreeNode};

    #[test]
    fn excluded_directories_are_never_listed() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .withf(|p| p == Path::new("/project"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    DirEntry::new("node_modules", EntryKind::Directory),
                    DirEntry::new("index.js", EntryKind::File),
                ])
            });
        fs.expect_read_to_string()
            .withf(|p| p == Path::new("/project/index.js"))
            .times(1)
            .returning(|_| Ok("main()".into()));

        let matcher = PathMatcher::from_patterns(["node_modules"], PrefixMode::Literal).unwrap();
        let outcome = TreeBuilder::new(&fs, &matcher)
            .build_root(Path::new("/project"))
            .unwrap();

        assert_eq!(outcome.root.get("index.js"), Some(&TreeNode::file("main()")));
        assert_eq!(outcome.report.excluded, 1);
    }

    #[test]
    fn build_of_a_subdirectory_matches_against_the_scan_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .withf(|p| p == Path::new("/p/backend"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    DirEntry::new("database", EntryKind::Directory),
                    DirEntry::new("server.js", EntryKind::File),
                ])
            });
        fs.expect_read_to_string()
            .withf(|p| p == Path::new("/p/backend/server.js"))
            .times(1)
            .returning(|_| Ok("listen()".into()));

        // `database` alone would not match; `backend/database` must.
        let matcher =
            PathMatcher::from_patterns(["backend/database"], PrefixMode::Literal).unwrap();
        let tree = TreeBuilder::new(&fs, &matcher)
            .build(Path::new("/p/backend"), Path::new("/p"))
            .unwrap();

        assert!(tree.get("database").is_none());
        assert_eq!(tree.get("server.js"), Some(&TreeNode::file("listen()")));
    }

    #[test]
    fn build_with_equal_paths_matches_build_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::new("a.txt", EntryKind::File)]));
        fs.expect_read_to_string().returning(|_| Ok("a".into()));

        let matcher = PathMatcher::default();
        let builder = TreeBuilder::new(&fs, &matcher);
        let root = Path::new("/p");
        assert_eq!(
            builder.build(root, root).unwrap(),
            builder.build_root(root).unwrap().root
        );
    }

    #[test]
    fn listing_failure_is_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let matcher = PathMatcher::default();
        assert!(TreeBuilder::new(&fs, &matcher).build_root(Path::new("/p")).is_err());
    }

    #[test]
    fn other_entries_are_ignored() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::new("link", EntryKind::Other)]));

        let matcher = PathMatcher::default();
        let outcome = TreeBuilder::new(&fs, &matcher).build_root(Path::new("/p")).unwrap();
        assert!(outcome.root.is_empty());
        assert!(outcome.report.skipped.is_empty());
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let base = Path::new("/project");
        let full = base.join("backend").join("database").join("schema.sql");
        assert_eq!(
            relative_path(base, &full).unwrap(),
            "backend/database/schema.sql"
        );
    }

    #[test]
    fn relative_path_outside_base_is_an_error() {
        assert!(relative_path(Path::new("/project"), Path::new("/other/file")).is_err());
    }
}
