//! # Manifest Provider / 清单提供者
//!
//! Loads `package.json` through a [`FileProbe`]. A missing or malformed file
//! is not an error for the engine: it degrades to an empty [`Manifest`].
//!
//! 通过 [`FileProbe`] 加载 `package.json`。文件缺失或格式错误不会导致引擎出错，
//! 而是降级为空的 [`Manifest`]。

use std::path::Path;

use crate::core::models::Manifest;
use crate::infra::fs::FileProbe;

/// File name of the manifest at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Parses manifest text, or `None` if it is not a valid manifest document.
pub fn parse_manifest(text: &str) -> Option<Manifest> {
    match serde_json::from_str::<Manifest>(text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::debug!(error = %e, "manifest is malformed");
            None
        }
    }
}

/// Reads the project manifest, falling back to an empty one.
///
/// 读取项目清单，失败时返回空清单。
pub fn load_manifest(probe: &impl FileProbe) -> Manifest {
    let text = match probe.read_to_string(Path::new(MANIFEST_FILE)) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "manifest unavailable, using an empty one");
            return Manifest::default();
        }
    };
    parse_manifest(&text).unwrap_or_default()
}
