//! # Configuration Module / 配置模块
//!
//! Optional per-project settings, read from `TestDispatch.toml` at the project
//! root. Every field has a default, so a missing file is the same as an empty one.
//!
//! 可选的项目级设置，从项目根目录的 `TestDispatch.toml` 读取。
//! 每个字段都有默认值，因此缺少文件等同于空文件。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::core::dispatch::Dispatcher;
use crate::core::models::TestRunner;

/// Default configuration file name, resolved against the project root.
pub const DEFAULT_CONFIG_FILE: &str = "TestDispatch.toml";

/// The runner substituted when detection finds none, or `none` to disable it.
///
/// 检测不到运行器时替代使用的运行器；设为 `none` 表示禁用。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackRunner {
    #[default]
    Jest,
    Vitest,
    Mocha,
    #[serde(alias = "node-test-runner")]
    NodeNative,
    None,
}

impl FallbackRunner {
    pub fn runner(self) -> Option<TestRunner> {
        match self {
            FallbackRunner::Jest => Some(TestRunner::Jest),
            FallbackRunner::Vitest => Some(TestRunner::Vitest),
            FallbackRunner::Mocha => Some(TestRunner::Mocha),
            FallbackRunner::NodeNative => Some(TestRunner::NodeNative),
            FallbackRunner::None => None,
        }
    }
}

/// Settings loaded from the configuration file.
///
/// 从配置文件加载的设置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// The language for the runner's own messages (e.g., "en", "zh-CN").
    /// When absent, `--lang` or the system locale decides.
    ///
    /// 工具自身消息的语言（例如 "en", "zh-CN"）。
    /// 未设置时由 `--lang` 或系统区域设置决定。
    #[serde(default)]
    pub language: Option<String>,

    /// Runner used when neither a script nor detection provides one.
    /// 既没有脚本也检测不到运行器时使用的运行器。
    #[serde(default)]
    pub fallback_runner: FallbackRunner,
}

impl DispatchConfig {
    /// Builds the dispatcher that applies this configuration's fallback policy.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.fallback_runner.runner())
    }
}

/// Parses configuration text.
pub fn parse_config(text: &str) -> Result<DispatchConfig> {
    toml::from_str(text).context("Failed to parse the configuration file")
}

/// Loads the configuration at `path`. A missing file yields the defaults;
/// an unreadable or malformed one is an error.
///
/// 加载 `path` 处的配置。文件不存在时返回默认值；无法读取或格式错误则返回错误。
pub fn load_config(path: &Path) -> Result<DispatchConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(DispatchConfig::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    parse_config(&text).with_context(|| format!("Invalid configuration in {}", path.display()))
}
