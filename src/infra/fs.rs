//! # File System Probe Module / 文件系统探测模块
//!
//! Detectors never touch the disk directly. They ask a [`FileProbe`] whether a
//! root-relative path exists and what text it holds, so the same detection
//! code runs against a real project directory or a synthetic in-memory layout.
//!
//! 检测器从不直接访问磁盘。它们通过 [`FileProbe`] 查询相对于根目录的路径是否存在
//! 以及其文本内容，因此同一套检测代码既可用于真实项目目录，也可用于内存中的模拟布局。

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the files under a project root.
///
/// 项目根目录下文件的只读视图。
pub trait FileProbe {
    /// Returns `true` if something exists at `relative` under the root.
    /// 如果根目录下 `relative` 处存在条目，则返回 `true`。
    fn exists(&self, relative: &Path) -> bool;

    /// Reads the UTF-8 text at `relative` under the root.
    /// 读取根目录下 `relative` 处的 UTF-8 文本。
    fn read_to_string(&self, relative: &Path) -> io::Result<String>;
}

/// A [`FileProbe`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskProbe {
    root: PathBuf,
}

impl DiskProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileProbe for DiskProbe {
    fn exists(&self, relative: &Path) -> bool {
        self.root.join(relative).exists()
    }

    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        fs::read_to_string(self.root.join(relative))
    }
}

/// A [`FileProbe`] over an in-memory set of files.
///
/// 基于内存文件集合的 [`FileProbe`]。
///
/// ```
/// use std::path::Path;
/// use test_dispatch::infra::fs::{FileProbe, MemoryProbe};
///
/// let probe = MemoryProbe::new().with_file("yarn.lock", "");
/// assert!(probe.exists(Path::new("yarn.lock")));
/// assert!(!probe.exists(Path::new("pnpm-lock.yaml")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, relative: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(relative, contents);
        self
    }

    pub fn insert(&mut self, relative: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(relative.into(), contents.into());
    }

    pub fn remove(&mut self, relative: &Path) {
        self.files.remove(relative);
    }
}

impl FileProbe for MemoryProbe {
    fn exists(&self, relative: &Path) -> bool {
        self.files.contains_key(relative)
    }

    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        self.files.get(relative).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not part of the in-memory project", relative.display()),
            )
        })
    }
}

/// Gets the absolute path from a potentially relative path, falling back to
/// the path itself when it cannot be resolved.
///
/// 获取可能为相对路径的绝对路径；无法解析时返回原路径。
pub fn absolute_or_original(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
