//! # Execution Pipeline Module / 执行管道模块
//!
//! Wires the pieces together: root → manifest → detection → dispatch →
//! process runner. Every call starts from the files on disk; nothing carries
//! over between calls.
//!
//! 将各部分连接起来：根目录 → 清单 → 检测 → 分发 → 进程运行器。
//! 每次调用都从磁盘上的文件重新开始，调用之间不保留任何状态。

use std::path::{Path, PathBuf};

use crate::core::detection::detect;
use crate::core::dispatch::Dispatcher;
use crate::core::error::DispatchError;
use crate::core::models::{ComposedCommand, Detection, InvocationRequest, Manifest, ProcessOutput};
use crate::infra::command::ProcessRunner;
use crate::infra::fs::{DiskProbe, FileProbe};

/// A snapshot of one project root: its manifest and what was detected from it.
///
/// 某个项目根目录的快照：其清单以及从中检测到的信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub manifest: Manifest,
    pub detection: Detection,
}

impl ProjectContext {
    /// Inspects the project behind `probe`, which is rooted at `root`.
    pub fn inspect(probe: &impl FileProbe, root: &Path) -> Self {
        let (detection, manifest) = detect(probe);
        Self {
            root: root.to_path_buf(),
            manifest,
            detection,
        }
    }

    /// Inspects the project directory `root` on disk.
    pub fn from_disk(root: &Path) -> Self {
        Self::inspect(&DiskProbe::new(root), root)
    }

    /// Composes the command for `request` without running anything.
    ///
    /// 为 `request` 组合命令，但不执行任何操作。
    pub fn plan(
        &self,
        request: &InvocationRequest,
        dispatcher: &Dispatcher,
    ) -> Result<ComposedCommand, DispatchError> {
        dispatcher.compose(request, &self.manifest, &self.detection, &self.root)
    }
}

/// Resolves `request` against `context` and runs the result exactly once.
/// A non-zero exit of the child is a normal [`ProcessOutput`], not an error.
///
/// 针对 `context` 解析 `request` 并只运行一次。子进程非零退出是正常的
/// [`ProcessOutput`]，不是错误。
pub async fn run_request<R: ProcessRunner>(
    runner: &R,
    context: &ProjectContext,
    request: &InvocationRequest,
    dispatcher: &Dispatcher,
) -> Result<ProcessOutput, DispatchError> {
    let command = context.plan(request, dispatcher)?;
    let output = runner.run(&command).await?;
    if !output.success() {
        tracing::debug!(code = output.code, "test command exited unsuccessfully");
    }
    Ok(output)
}
