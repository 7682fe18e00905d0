//! # Detection Module / 检测模块
//!
//! Decides which package manager fronts script execution and which test
//! runner family a project uses. Both decisions are recomputed on every call;
//! nothing is cached.
//!
//! 判断由哪个包管理器执行脚本，以及项目使用哪种测试运行器。
//! 每次调用都会重新计算，不做任何缓存。

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::core::manifest::load_manifest;
use crate::core::models::{Detection, Manifest, PackageManager, StringMap, TestRunner};
use crate::infra::fs::FileProbe;

/// Lock files in precedence order. The first one present decides.
/// 按优先级排列的锁文件，第一个存在的决定结果。
const LOCK_FILES: [(&str, PackageManager); 2] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
];

/// Runner families in the order the keyword search tries them.
const RUNNER_PRIORITY: [TestRunner; 3] = [TestRunner::Jest, TestRunner::Vitest, TestRunner::Mocha];

static NODE_NATIVE_TEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node\s+--test").expect("static regex is valid"));

/// Picks the package manager from lock files, defaulting to npm.
///
/// 根据锁文件选择包管理器，默认为 npm。
pub fn detect_package_manager(probe: &impl FileProbe) -> PackageManager {
    LOCK_FILES
        .iter()
        .find(|(lock_file, _)| probe.exists(Path::new(lock_file)))
        .map(|&(_, manager)| manager)
        .unwrap_or(PackageManager::Npm)
}

/// Merges two name → value maps. Entries of `right` override entries of `left`
/// with the same key.
///
/// 合并两个 名称 → 值 映射。`right` 中的条目覆盖 `left` 中键相同的条目。
pub fn merge_overriding(left: &StringMap, right: &StringMap) -> StringMap {
    let mut merged = left.clone();
    merged.extend(right.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Detects the test runner from script contents first, then dependency names.
/// Returns `None` when there is no evidence; no default is substituted here.
///
/// 先根据脚本内容、再根据依赖名称检测测试运行器。
/// 没有证据时返回 `None`，此处不会替换为默认值。
pub fn detect_test_runner(manifest: &Manifest) -> Option<TestRunner> {
    runner_from_scripts(&manifest.scripts).or_else(|| runner_from_dependencies(manifest))
}

fn runner_from_scripts(scripts: &StringMap) -> Option<TestRunner> {
    let joined = scripts
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    RUNNER_PRIORITY
        .into_iter()
        .find(|runner| joined.contains(runner.as_str()))
        .or_else(|| NODE_NATIVE_TEST.is_match(&joined).then_some(TestRunner::NodeNative))
}

fn runner_from_dependencies(manifest: &Manifest) -> Option<TestRunner> {
    let merged = merge_overriding(&manifest.dependencies, &manifest.dev_dependencies);
    let names: Vec<String> = merged.keys().map(|name| name.to_lowercase()).collect();

    RUNNER_PRIORITY
        .into_iter()
        .find(|runner| names.iter().any(|name| dependency_names_runner(name, *runner)))
}

fn dependency_names_runner(name: &str, runner: TestRunner) -> bool {
    match runner {
        TestRunner::Jest => name == "jest" || name.starts_with("@jest/"),
        TestRunner::Vitest => name == "vitest",
        TestRunner::Mocha => name == "mocha",
        // Only script contents can reveal the built-in runner.
        TestRunner::NodeNative => false,
    }
}

/// Runs both detectors against the project behind `probe`.
///
/// 对 `probe` 背后的项目运行两个检测器。
pub fn detect(probe: &impl FileProbe) -> (Detection, Manifest) {
    let manifest = load_manifest(probe);
    let detection = Detection {
        package_manager: detect_package_manager(probe),
        test_runner: detect_test_runner(&manifest),
    };
    tracing::debug!(
        package_manager = %detection.package_manager,
        test_runner = ?detection.test_runner,
        "detection finished"
    );
    (detection, manifest)
}
