//! # Dispatch Errors / 分发错误
//!
//! Failures that end a single dispatch call. A child process exiting with a
//! non-zero status is not one of them: its code is propagated as-is.
//!
//! 终止单次分发调用的失败。子进程以非零状态退出不属于此类，其退出码按原样传递。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::models::TestCategory;

/// Exit code for "nothing to run" and "executable not on PATH".
pub const EXIT_NOT_FOUND: u8 = 127;
/// Exit code for a command that could not be started: the executable or its
/// working directory is unusable.
pub const EXIT_CANNOT_EXECUTE: u8 = 126;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// No explicit script and no runner, neither detected nor from the fallback policy.
    /// 既没有显式脚本，也没有检测到或回退的运行器。
    #[error("no test script or runner could be resolved for {}", scope_label(.category))]
    RunnerUnresolved { category: Option<TestCategory> },

    /// The composed command's program is not on the system path.
    /// 组合命令的程序不在系统路径中。
    #[error("executable not found: {program}")]
    ExecutableNotFound {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command's working directory does not exist, so nothing was spawned.
    /// 命令的工作目录不存在，因此没有派生任何进程。
    #[error("working directory does not exist: {}", .path.display())]
    MissingWorkingDirectory { path: PathBuf },

    /// The program exists but the OS refused to start it.
    /// 程序存在，但操作系统拒绝启动它。
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// Builds the right variant for a spawn failure of `program`.
    pub fn from_spawn(program: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DispatchError::ExecutableNotFound {
                program: program.to_string(),
                source,
            }
        } else {
            DispatchError::Launch {
                program: program.to_string(),
                source,
            }
        }
    }

    /// The process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::RunnerUnresolved { .. } | DispatchError::ExecutableNotFound { .. } => {
                EXIT_NOT_FOUND
            }
            DispatchError::MissingWorkingDirectory { .. } | DispatchError::Launch { .. } => {
                EXIT_CANNOT_EXECUTE
            }
        }
    }
}

fn scope_label(category: &Option<TestCategory>) -> String {
    match category {
        Some(category) => format!("category '{category}'"),
        None => "the whole suite".to_string(),
    }
}
