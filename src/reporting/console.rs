//! # Console Reporting Module / 控制台报告模块
//!
//! Everything the CLI prints: the detection report, dry-run previews,
//! localized failure messages, and the verbatim relay of a child's output.
//!
//! CLI 输出的所有内容：检测报告、试运行预览、本地化的失败信息，以及子进程输出的原样转发。

use colored::*;
use std::io::{self, Write};

use crate::core::error::DispatchError;
use crate::core::models::{ComposedCommand, Detection, ProcessOutput};
use crate::infra::t;

/// Placeholder printed when no test runner was detected.
pub const UNKNOWN_RUNNER: &str = "unknown";

/// The two lines printed by `--detect`. The format is machine-readable and is
/// never localized.
///
/// `--detect` 打印的两行内容。该格式供机器读取，不做本地化。
///
/// ```text
/// package_manager: pnpm
/// test_runner: vitest
/// ```
pub fn format_detection(detection: &Detection) -> String {
    let runner = detection
        .test_runner
        .map(|runner| runner.as_str())
        .unwrap_or(UNKNOWN_RUNNER);
    format!(
        "package_manager: {}\ntest_runner: {}\n",
        detection.package_manager, runner
    )
}

pub fn print_detection(detection: &Detection) {
    print!("{}", format_detection(detection));
}

/// Prints the command a real run would execute.
/// 打印实际运行时将执行的命令。
pub fn print_dry_run(command: &ComposedCommand) {
    println!("{} {}", t!("command_prefix").blue(), command.display_line());
    println!(
        "{}",
        t!("working_directory", path = command.cwd().display()).dimmed()
    );
}

/// Localized one-line description of a dispatch failure.
///
/// 分发失败的本地化单行描述。
pub fn describe_dispatch_error(error: &DispatchError) -> String {
    match error {
        DispatchError::RunnerUnresolved { category: None } => {
            t!("no_runner_whole_suite").to_string()
        }
        DispatchError::RunnerUnresolved {
            category: Some(category),
        } => t!("no_runner_category", category = category).to_string(),
        DispatchError::ExecutableNotFound { program, source } => {
            t!("executable_not_found", program = program, error = source).to_string()
        }
        DispatchError::MissingWorkingDirectory { path } => {
            t!("missing_working_directory", path = path.display()).to_string()
        }
        DispatchError::Launch { program, source } => {
            t!("launch_failed", program = program, error = source).to_string()
        }
    }
}

pub fn print_dispatch_error(error: &DispatchError) {
    eprintln!("{}", describe_dispatch_error(error).red());
}

/// Relays the child's stdout and then its stderr, byte for byte.
///
/// 依次原样转发子进程的 stdout 和 stderr。
pub fn relay_output(output: &ProcessOutput) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&output.stdout)?;
    stdout.flush()?;

    let mut stderr = io::stderr().lock();
    stderr.write_all(&output.stderr)?;
    stderr.flush()
}
