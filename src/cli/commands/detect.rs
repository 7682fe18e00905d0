//! # Detect Command Module / 检测命令模块
//!
//! Implements `--detect`: report the package manager and test runner of the
//! project without dispatching anything.
//!
//! 实现 `--detect`：报告项目的包管理器和测试运行器，而不分发任何命令。

use std::path::Path;

use crate::core::execution::ProjectContext;
use crate::reporting::print_detection;

/// Prints the detection report for `project_root`. Always succeeds.
///
/// No fallback runner is applied here; an undetected runner prints as `unknown`.
pub fn execute(project_root: &Path) -> u8 {
    let context = ProjectContext::from_disk(project_root);
    print_detection(&context.detection);
    0
}
