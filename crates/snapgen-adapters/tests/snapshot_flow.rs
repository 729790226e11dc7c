//! Integration tests for capturing project trees.

use std::fs;
use std::path::Path;

use snapgen_adapters::{
    JsonSnapshotEmitter, LocalFilesystem, MemoryFilesystem, NodeScriptEmitter, load_snapshot,
};
use snapgen_core::{
    application::{Filesystem, SnapshotService, TreeBuilder},
    domain::{Directory, PathMatcher, PrefixMode, SetupPlan, SetupProfile, TreeNode},
};
use tempfile::TempDir;

fn matcher(patterns: &[&str]) -> PathMatcher {
    PathMatcher::from_patterns(patterns.iter().copied(), PrefixMode::Literal).unwrap()
}

fn sample_project() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.add_file("/project/frontend/package.json", "{}").unwrap();
    fs.add_file("/project/backend/server.js", "console.log(1)").unwrap();
    fs.add_file("/project/node_modules/x/index.js", "module.exports = 1").unwrap();
    fs.add_file("/project/backend/database/db.sqlite", "binary").unwrap();
    fs
}

#[test]
fn excluded_subtrees_are_left_out() {
    let fs = sample_project();
    let matcher = matcher(&["node_modules", "backend/database"]);

    let outcome = TreeBuilder::new(&fs, &matcher)
        .build_root(Path::new("/project"))
        .unwrap();

    let expected = Directory::new()
        .with_directory("backend", Directory::new().with_file("server.js", "console.log(1)"))
        .with_directory("frontend", Directory::new().with_file("package.json", "{}"));
    assert_eq!(outcome.root, expected);
    assert_eq!(outcome.report.excluded, 2);
    assert!(outcome.report.skipped.is_empty());
}

#[test]
fn literal_prefix_also_drops_similarly_named_siblings() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/project/backend/dbdump/dump.sql", "d").unwrap();
    fs.add_file("/project/backend/db/init.sql", "i").unwrap();
    fs.add_file("/project/backend/database/data.db", "x").unwrap();
    fs.add_file("/project/backend/server.js", "s").unwrap();

    let outcome = TreeBuilder::new(&fs, &matcher(&["backend/db"]))
        .build_root(Path::new("/project"))
        .unwrap();

    assert!(outcome.root.lookup("backend/db").is_none());
    assert!(outcome.root.lookup("backend/dbdump").is_none());
    // `da` is not `db`: no prefix relation.
    assert!(outcome.root.lookup("backend/database/data.db").is_some());
    assert!(outcome.root.lookup("backend/server.js").is_some());
}

#[test]
fn segment_boundary_mode_keeps_similarly_named_siblings() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/project/backend/dbdump/dump.sql", "d").unwrap();
    fs.add_file("/project/backend/db/init.sql", "i").unwrap();

    let matcher = PathMatcher::from_patterns(["backend/db"], PrefixMode::SegmentBoundary).unwrap();
    let outcome = TreeBuilder::new(&fs, &matcher)
        .build_root(Path::new("/project"))
        .unwrap();

    assert!(outcome.root.lookup("backend/db").is_none());
    assert_eq!(
        outcome.root.lookup("backend/dbdump/dump.sql"),
        Some(&TreeNode::file("d"))
    );
}

#[test]
fn substring_of_a_segment_does_not_exclude() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/project/my_node_modules_backup/keep.txt", "k").unwrap();

    let outcome = TreeBuilder::new(&fs, &matcher(&["node_modules"]))
        .build_root(Path::new("/project"))
        .unwrap();

    assert_eq!(
        outcome.root.lookup("my_node_modules_backup/keep.txt"),
        Some(&TreeNode::file("k"))
    );
}

#[test]
fn unreadable_file_is_reported_and_skipped() {
    let fs = sample_project();
    fs.add_file("/project/backend/secret.key", "hidden").unwrap();
    fs.mark_unreadable("/project/backend/secret.key").unwrap();

    let outcome = TreeBuilder::new(&fs, &matcher(&["node_modules", "backend/database"]))
        .build_root(Path::new("/project"))
        .unwrap();

    assert!(outcome.root.lookup("backend/secret.key").is_none());
    assert!(outcome.root.lookup("backend/server.js").is_some());
    assert_eq!(outcome.report.skipped.len(), 1);
    assert!(outcome.report.skipped[0].path.ends_with("backend/secret.key"));
}

#[test]
fn empty_directories_are_captured() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/project/a.txt", "").unwrap();
    fs.create_dir_all(Path::new("/project/empty")).unwrap();

    let outcome = TreeBuilder::new(&fs, &matcher(&[]))
        .build_root(Path::new("/project"))
        .unwrap();

    assert_eq!(outcome.root.get("empty"), Some(&TreeNode::Directory(Directory::new())));
    assert_eq!(outcome.root.get("a.txt"), Some(&TreeNode::file("")));
}

#[test]
fn missing_root_is_an_error() {
    let fs = MemoryFilesystem::new();
    assert!(
        TreeBuilder::new(&fs, &matcher(&[]))
            .build_root(Path::new("/nowhere"))
            .is_err()
    );
}

#[test]
fn local_filesystem_capture_matches_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("frontend")).unwrap();
    fs::create_dir_all(root.join("backend/database")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("frontend/package.json"), "{}").unwrap();
    fs::write(root.join("backend/server.js"), "console.log(1)").unwrap();
    fs::write(root.join("backend/database/data.db"), "rows").unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();

    let filesystem = LocalFilesystem::new();
    let outcome = TreeBuilder::new(&filesystem, &matcher(&["node_modules", "backend/database"]))
        .build_root(root)
        .unwrap();

    assert_eq!(outcome.root.files().len(), 2);
    assert!(outcome.root.lookup("backend/database").is_none());
    assert_eq!(
        outcome.root.lookup("frontend/package.json"),
        Some(&TreeNode::file("{}"))
    );
}

#[test]
fn generate_writes_the_node_script() {
    let fs = sample_project();
    let service = SnapshotService::new(Box::new(fs.clone()), Box::new(NodeScriptEmitter::new()));
    let output = Path::new("/project/setup-project.js");

    let report = service
        .generate(
            Path::new("/project"),
            &matcher(&["node_modules", "backend/database", "setup-project.js"]),
            SetupPlan::from_profile(&SetupProfile::default()),
            output,
        )
        .unwrap();

    let script = fs.read_file(output).unwrap();
    assert_eq!(report.bytes_written, script.len());
    assert_eq!(report.stats.files, 2);
    assert!(script.starts_with("#!/usr/bin/env node"));
    assert!(script.contains(r#"\"server.js\":\"console.log(1)\""#));
    assert!(!script.contains("module.exports = 1"));
}

#[test]
fn regenerating_excludes_the_previous_artifact() {
    let fs = sample_project();
    let service = SnapshotService::new(Box::new(fs.clone()), Box::new(JsonSnapshotEmitter::new()));
    let output = Path::new("/project/setup-project.json");
    let matcher = matcher(&["node_modules", "backend/database", "setup-project.json"]);

    service
        .generate(Path::new("/project"), &matcher, SetupPlan::empty(), output)
        .unwrap();
    service
        .generate(Path::new("/project"), &matcher, SetupPlan::empty(), output)
        .unwrap();

    let snapshot = load_snapshot(&fs.read_file(output).unwrap()).unwrap();
    assert!(snapshot.root.get("setup-project.json").is_none());
    assert_eq!(snapshot.root.stats().files, 2);
}
