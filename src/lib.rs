//! # Test Dispatch Library / Test Dispatch 库
//!
//! This library resolves how a JavaScript project runs its tests, without any
//! project-specific configuration: which package manager fronts its scripts,
//! which test runner it uses, and which concrete command runs the whole suite,
//! a test category, a name-filtered subset, or watch mode.
//!
//! 此库在无需任何项目专用配置的情况下解析 JavaScript 项目的测试运行方式：
//! 由哪个包管理器执行脚本、使用哪种测试运行器，以及运行整套测试、某个测试类别、
//! 按名称过滤的子集或监视模式时应执行的具体命令。
//!
//! ## Modules / 模块
//!
//! - `core` - Root location, manifest loading, detection and dispatch
//! - `infra` - Process execution, file system probing and i18n
//! - `reporting` - Console output
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 根目录定位、清单加载、检测与分发
//! - `infra` - 进程执行、文件系统探测和国际化
//! - `reporting` - 控制台输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::detection;
pub use crate::core::dispatch;
pub use crate::core::models;

/// Picks the best available UI language for `requested` and activates it.
///
/// The full locale (e.g., "zh-CN") is tried first, then just the language code
/// (e.g., "en" from "en-US"), and finally the default language ("en").
///
/// 为 `requested` 选择最合适的界面语言并启用。
/// 先尝试完整的区域设置（如 "zh-CN"），再尝试语言代码（如 "en-US" 中的 "en"），
/// 最后回退到默认语言（"en"）。
pub fn set_language(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    let is_available = |code: &str| available_locales.iter().any(|locale| *locale == code);

    let lang = if is_available(requested) {
        requested
    } else {
        requested
            .split(['-', '_'])
            .next()
            .filter(|lang_code| is_available(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
    lang.to_string()
}

/// The system locale, or "en" when it cannot be determined.
pub fn system_language() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
