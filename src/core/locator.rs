//! # Project Root Locator / 项目根目录定位
//!
//! Walks up from a starting directory to the nearest directory holding a
//! version-control root or a `package.json`.
//!
//! 从起始目录向上查找，直到找到包含版本控制根或 `package.json` 的最近目录。

use std::path::{Path, PathBuf};

use crate::infra::fs::absolute_or_original;

/// Entries whose presence marks a directory as the project root.
/// 标记项目根目录的条目。
pub const ROOT_MARKERS: [&str; 2] = [".git", "package.json"];

/// Finds the project root for `start`.
///
/// The start directory itself is checked first. If no ancestor carries a
/// marker, the (canonicalized) start directory is returned, so this never fails.
///
/// 查找 `start` 的项目根目录。首先检查起始目录本身；如果没有祖先目录包含标记，
/// 则返回（规范化后的）起始目录，因此该函数永不失败。
pub fn find_project_root(start: &Path) -> PathBuf {
    let start = absolute_or_original(start);
    let found = start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf);

    match found {
        Some(root) => {
            tracing::debug!(root = %root.display(), "project root located");
            root
        }
        None => {
            tracing::debug!(start = %start.display(), "no root marker found, using start directory");
            start
        }
    }
}

/// Like [`find_project_root`], starting from the current working directory.
pub fn find_project_root_from_cwd() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project_root(&cwd)
}
