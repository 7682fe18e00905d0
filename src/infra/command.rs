//! # Command Execution Module / 命令执行模块
//!
//! Runs a [`ComposedCommand`] as a child process and captures its output.
//! The engine depends only on the [`ProcessRunner`] trait, so tests can swap
//! in a runner that records commands instead of spawning them.
//!
//! 将 [`ComposedCommand`] 作为子进程运行并捕获其输出。
//! 引擎只依赖 [`ProcessRunner`] trait，因此测试可以替换为只记录命令而不真正派生进程的实现。

use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::core::error::DispatchError;
use crate::core::models::{ComposedCommand, ProcessOutput};

/// Executes composed commands.
///
/// 执行组合后的命令。
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Runs `command` to completion. There is no timeout: a child that never
    /// exits blocks the caller indefinitely.
    ///
    /// 运行 `command` 直至结束。没有超时：永不退出的子进程会无限期阻塞调用方。
    async fn run(&self, command: &ComposedCommand) -> Result<ProcessOutput, DispatchError>;
}

/// The real [`ProcessRunner`], backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &ComposedCommand) -> Result<ProcessOutput, DispatchError> {
        // spawn reports a missing cwd as NotFound, indistinguishable from a missing program.
        if !command.cwd().is_dir() {
            return Err(DispatchError::MissingWorkingDirectory {
                path: command.cwd().to_path_buf(),
            });
        }

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .current_dir(command.cwd())
            .stdin(Stdio::inherit())
            .kill_on_drop(true);

        tracing::info!(command = %command.display_line(), cwd = %command.cwd().display(), "spawning");
        spawn_and_capture(cmd)
            .await
            .map_err(|e| DispatchError::from_spawn(command.program(), e))
    }
}

/// Spawns a command and captures stdout and stderr separately.
/// Both pipes are drained concurrently so a chatty child can never stall on
/// a full pipe while we wait for it to exit.
///
/// # Returns
/// The exit code and the raw bytes written to each stream, or the spawn error.
///
/// 派生一个命令，分别捕获 stdout 和 stderr。
/// 两个管道被并发读取，避免子进程因管道写满而阻塞。
///
/// # Returns
/// 退出码和写入各个流的原始字节，或派生错误。
pub async fn spawn_and_capture(mut cmd: Command) -> io::Result<ProcessOutput> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("failed to capture stderr"))?;

    let stdout_handle = tokio::spawn(read_all(stdout));
    let stderr_handle = tokio::spawn(read_all(stderr));

    let status = child.wait().await?;

    let stdout = stdout_handle.await.map_err(io::Error::other)??;
    let stderr = stderr_handle.await.map_err(io::Error::other)??;

    Ok(ProcessOutput {
        code: exit_code(status),
        stdout,
        stderr,
    })
}

async fn read_all<R: AsyncRead + Unpin>(mut stream: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// The child's exit code, or `128 + signal` when a signal killed it, as shells report it.
/// 子进程的退出码；被信号终止时按 shell 惯例返回 `128 + 信号值`。
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
