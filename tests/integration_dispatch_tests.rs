//! # Dispatch Pipeline Integration Tests / 分发管道集成测试
//!
//! Runs the full pipeline (project on disk → detection → dispatch → process
//! runner) with a recording runner, and exercises the real tokio runner for
//! exit code propagation, output capture and missing executables.
//!
//! 使用记录型运行器运行完整管道（磁盘上的项目 → 检测 → 分发 → 进程运行器），
//! 并用真实的 tokio 运行器测试退出码传递、输出捕获和缺失的可执行文件。

mod common;

use common::{canonical, setup_project, touch};
use std::cell::RefCell;
use test_dispatch::core::error::DispatchError;
use test_dispatch::core::execution::{run_request, ProjectContext};
use test_dispatch::core::locator::find_project_root;
use test_dispatch::dispatch::Dispatcher;
use test_dispatch::infra::command::{ProcessRunner, TokioProcessRunner};
use test_dispatch::models::{
    ComposedCommand, InvocationRequest, PackageManager, ProcessOutput, TestCategory, TestRunner,
};

/// Records every command instead of spawning it and answers with a fixed exit code.
#[derive(Default)]
struct RecordingRunner {
    code: i32,
    seen: RefCell<Vec<ComposedCommand>>,
}

impl ProcessRunner for RecordingRunner {
    async fn run(&self, command: &ComposedCommand) -> Result<ProcessOutput, DispatchError> {
        self.seen.borrow_mut().push(command.clone());
        Ok(ProcessOutput {
            code: self.code,
            stdout: b"ran\n".to_vec(),
            stderr: Vec::new(),
        })
    }
}

#[tokio::test]
async fn test_pnpm_project_with_test_script() {
    let project = setup_project(r#"{"scripts": {"test": "vitest run"}}"#);
    touch(&project, "pnpm-lock.yaml");
    touch(&project, "yarn.lock");

    let root = find_project_root(project.path());
    let context = ProjectContext::from_disk(&root);
    let runner = RecordingRunner::default();

    let output = run_request(
        &runner,
        &context,
        &InvocationRequest::whole_suite().with_watch(true),
        &Dispatcher::default(),
    )
    .await
    .unwrap();

    assert!(output.success());
    let seen = runner.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].argv(), ["pnpm", "run", "test", "--", "--watch"]);
    assert_eq!(seen[0].cwd(), canonical(project.path()));
}

#[tokio::test]
async fn test_nested_start_resolves_to_project_root() {
    let project = setup_project(r#"{"devDependencies": {"mocha": "^10.0.0"}}"#);
    let nested = project.path().join("test").join("integration");
    std::fs::create_dir_all(&nested).unwrap();

    let context = ProjectContext::from_disk(&find_project_root(&nested));
    assert_eq!(context.detection.package_manager, PackageManager::Npm);
    assert_eq!(context.detection.test_runner, Some(TestRunner::Mocha));

    let runner = RecordingRunner::default();
    run_request(
        &runner,
        &context,
        &InvocationRequest::category(TestCategory::Integration).with_pattern("foo"),
        &Dispatcher::default(),
    )
    .await
    .unwrap();

    assert_eq!(runner.seen.borrow()[0].argv(), ["npx", "mocha", "--grep", "foo"]);
}

#[tokio::test]
async fn test_child_failure_is_propagated_not_an_error() {
    let project = setup_project(r#"{"scripts": {"test": "jest"}}"#);
    let context = ProjectContext::from_disk(project.path());
    let runner = RecordingRunner {
        code: 3,
        ..RecordingRunner::default()
    };

    let output = run_request(
        &runner,
        &context,
        &InvocationRequest::whole_suite(),
        &Dispatcher::default(),
    )
    .await
    .unwrap();

    assert_eq!(output.code, 3);
}

#[tokio::test]
async fn test_unresolved_request_never_reaches_the_runner() {
    let project = setup_project("{}");
    let context = ProjectContext::from_disk(project.path());
    let runner = RecordingRunner::default();

    for request in [
        InvocationRequest::whole_suite(),
        InvocationRequest::category(TestCategory::Unit),
    ] {
        let err = run_request(&runner, &context, &request, &Dispatcher::new(None))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 127);
    }
    assert!(runner.seen.borrow().is_empty());
}

#[tokio::test]
async fn test_resolution_is_recomputed_from_disk() {
    let project = setup_project(r#"{"scripts": {"test": "jest"}}"#);
    let first = ProjectContext::from_disk(project.path());
    let second = ProjectContext::from_disk(project.path());
    assert_eq!(first, second);

    touch(&project, "yarn.lock");
    let third = ProjectContext::from_disk(project.path());
    assert_eq!(third.detection.package_manager, PackageManager::Yarn);
}

#[tokio::test]
async fn test_missing_executable_maps_to_127() {
    let project = setup_project("{}");
    let command = ComposedCommand::new(
        vec!["this_command_definitely_does_not_exist_12345".to_string()],
        project.path(),
    );

    let err = TokioProcessRunner.run(&command).await.unwrap_err();

    assert!(matches!(err, DispatchError::ExecutableNotFound { .. }));
    assert_eq!(err.exit_code(), 127);
    assert!(err.to_string().contains("this_command_definitely_does_not_exist_12345"));
}

#[tokio::test]
async fn test_missing_working_directory_is_not_blamed_on_the_executable() {
    let project = setup_project("{}");
    let gone = project.path().join("does-not-exist");
    let command = ComposedCommand::new(vec!["npx".to_string(), "jest".to_string()], &gone);

    let err = TokioProcessRunner.run(&command).await.unwrap_err();

    assert!(matches!(err, DispatchError::MissingWorkingDirectory { ref path } if *path == gone));
    assert_eq!(err.exit_code(), 126);
    assert!(!err.to_string().contains("executable not found"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_runner_captures_streams_and_exit_code() {
    let project = setup_project("{}");
    let command = ComposedCommand::new(
        vec![
            "sh".to_string(),
            "-c".to_string(),
            "printf out; printf err >&2; exit 7".to_string(),
        ],
        project.path(),
    );

    let output = TokioProcessRunner.run(&command).await.unwrap();

    assert_eq!(output.code, 7);
    assert_eq!(output.stdout, b"out");
    assert_eq!(output.stderr, b"err");
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_runner_uses_working_directory() {
    let project = setup_project("{}");
    let command = ComposedCommand::new(vec!["pwd".to_string()], project.path());

    let output = TokioProcessRunner.run(&command).await.unwrap();

    let printed = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        canonical(std::path::Path::new(printed.trim())),
        canonical(project.path())
    );
}
