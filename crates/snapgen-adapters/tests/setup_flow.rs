//! Integration tests for recreating projects from snapshots.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use mockall::mock;
use snapgen_adapters::{JsonSnapshotEmitter, LocalFilesystem, MemoryFilesystem, load_snapshot};
use snapgen_core::{
    application::{
        ApplicationError, CommandRunner, Filesystem, ScriptEmitter, SetupService, StepEvent,
        TreeBuilder,
    },
    domain::{Directory, PathMatcher, PrefixMode, SetupPlan, SetupProfile, Snapshot},
    error::{SnapgenError, SnapgenResult},
};
use tempfile::TempDir;

mock! {
    pub Runner {}

    impl CommandRunner for Runner {
        fn run(&self, command: &str, cwd: &Path) -> SnapgenResult<()>;
    }
}

fn project_tree() -> Directory {
    Directory::new()
        .with_directory(
            "backend",
            Directory::new()
                .with_file("server.js", "console.log(1)")
                .with_file("seed-services.js", "// seed"),
        )
        .with_directory("frontend", Directory::new().with_file("package.json", "{}"))
        .with_directory("docs", Directory::new())
}

fn no_commands() -> Box<MockRunner> {
    Box::new(MockRunner::new())
}

#[test]
fn materialized_tree_captures_back_identically() {
    let fs = MemoryFilesystem::new();
    let service = SetupService::new(Box::new(fs.clone()), no_commands());
    let target = Path::new("/restored");
    fs.create_dir_all(target).unwrap();

    service.materialize(&project_tree(), target).unwrap();

    let matcher = PathMatcher::new(Vec::new(), PrefixMode::Literal);
    let captured = TreeBuilder::new(&fs, &matcher).build_root(target).unwrap();
    assert_eq!(captured.root, project_tree());
}

#[test]
fn materializing_twice_is_idempotent() {
    let fs = MemoryFilesystem::new();
    let service = SetupService::new(Box::new(fs.clone()), no_commands());
    let target = Path::new("/restored");

    let first = service.materialize(&project_tree(), target).unwrap();
    let files_after_first = fs.list_files();
    let second = service.materialize(&project_tree(), target).unwrap();

    assert_eq!(first.directories_created.len(), 3);
    assert!(second.directories_created.is_empty());
    assert_eq!(second.files_written.len(), first.files_written.len());
    assert_eq!(fs.list_files(), files_after_first);
}

#[test]
fn existing_files_are_overwritten() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/restored/backend/server.js", "stale").unwrap();
    let service = SetupService::new(Box::new(fs.clone()), no_commands());

    service.materialize(&project_tree(), Path::new("/restored")).unwrap();

    assert_eq!(
        fs.read_file("/restored/backend/server.js").as_deref(),
        Some("console.log(1)")
    );
}

#[test]
fn backend_failure_never_attempts_seed() {
    let fs = MemoryFilesystem::new();
    let target = Path::new("/restored");
    let calls = RefCell::new(Vec::<(String, PathBuf)>::new());

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|command, cwd| command == "npm install" && cwd.ends_with("backend"))
        .times(1)
        .returning(|command, cwd| {
            Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                reason: "exit status: 1".into(),
            }
            .into())
        });

    let service = SetupService::new(Box::new(fs), Box::new(runner));
    service.materialize(&project_tree(), target).unwrap();

    let plan = SetupPlan::from_profile(&SetupProfile::default());
    let err = service
        .run_setup(&plan, target, |event| {
            if let StepEvent::Started(step) = event {
                calls
                    .borrow_mut()
                    .push((step.command.clone(), PathBuf::from(&step.working_dir)));
            }
        })
        .unwrap_err();

    assert_eq!(calls.borrow().len(), 1);
    assert!(matches!(
        err,
        SnapgenError::Application(ApplicationError::SetupStepFailed { .. })
    ));
    assert_eq!(
        plan.fallback,
        vec![
            "1. Backend: cd backend && npm install".to_string(),
            "2. Frontend: cd frontend && npm install".to_string(),
        ]
    );
}

#[test]
fn json_snapshot_restores_onto_disk() {
    let snapshot = Snapshot::new(project_tree(), SetupPlan::empty());
    let text = JsonSnapshotEmitter::new().emit(&snapshot).unwrap();
    let loaded = load_snapshot(&text).unwrap();

    let temp = TempDir::new().unwrap();
    let service = SetupService::new(Box::new(LocalFilesystem::new()), no_commands());
    service.materialize(&loaded.root, temp.path()).unwrap();
    let outcome = service.run_setup(&loaded.setup, temp.path(), |_| {}).unwrap();

    assert!(outcome.completed.is_empty());
    assert!(temp.path().join("docs").is_dir());
    assert_eq!(
        std::fs::read_to_string(temp.path().join("frontend/package.json")).unwrap(),
        "{}"
    );
}
