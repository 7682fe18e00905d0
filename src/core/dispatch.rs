//! # Dispatch Module / 分发模块
//!
//! Turns an [`InvocationRequest`] plus detection results into a
//! [`ComposedCommand`]. Explicit manifest scripts always win; runner-specific
//! flags are only synthesized when the matching script is absent.
//!
//! 将 [`InvocationRequest`] 与检测结果转换为 [`ComposedCommand`]。
//! 清单中的显式脚本始终优先；只有在缺少对应脚本时才会合成运行器专用参数。

use std::path::Path;

use crate::core::error::DispatchError;
use crate::core::models::{
    ComposedCommand, Detection, InvocationRequest, Manifest, PackageManager, TestRunner,
};

/// Script used for whole-suite runs.
pub const TEST_SCRIPT: &str = "test";
/// Flag forwarded to scripts and jest for watch mode.
pub const WATCH_FLAG: &str = "--watch";

/// Composes commands under a fixed fallback-runner policy.
///
/// `fallback_runner` is substituted when detection found no runner. It is a
/// caller decision and applies identically to whole-suite and category runs;
/// `None` disables the fallback so an undetectable project fails to resolve.
///
/// 在固定的回退运行器策略下组合命令。
/// 检测不到运行器时使用 `fallback_runner`；该策略由调用方决定，
/// 对整套运行和分类运行一视同仁。设为 `None` 时禁用回退，无法检测的项目将解析失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    pub fallback_runner: Option<TestRunner>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            fallback_runner: Some(TestRunner::Jest),
        }
    }
}

impl Dispatcher {
    pub fn new(fallback_runner: Option<TestRunner>) -> Self {
        Self { fallback_runner }
    }

    /// Composes the command for `request`. Pure: the same inputs always give
    /// the same command.
    ///
    /// 为 `request` 组合命令。纯函数：相同输入总是得到相同命令。
    pub fn compose(
        &self,
        request: &InvocationRequest,
        manifest: &Manifest,
        detection: &Detection,
        cwd: &Path,
    ) -> Result<ComposedCommand, DispatchError> {
        let script = match request.category {
            Some(category) => category.script_name(),
            None => TEST_SCRIPT.to_string(),
        };

        if manifest.has_script(&script) {
            let argv = script_command(
                detection.package_manager,
                &script,
                script_extra_args(request),
            );
            tracing::debug!(script = %script, "dispatching to manifest script");
            return Ok(ComposedCommand::new(argv, cwd));
        }

        let runner = detection
            .test_runner
            .or(self.fallback_runner)
            .ok_or(DispatchError::RunnerUnresolved {
                category: request.category,
            })?;

        if request.category.is_none() && non_empty_pattern(request).is_some() {
            tracing::warn!("--pattern is only applied to category runs without a script; ignoring it");
        }
        let pattern = focus_pattern(request);

        tracing::debug!(runner = %runner, "no matching script, invoking runner directly");
        Ok(ComposedCommand::new(
            runner_command(runner, request.watch, pattern),
            cwd,
        ))
    }
}

/// Trailing arguments forwarded verbatim to a script: the watch flag, then
/// the pattern. The whole suite forwards only the watch flag.
fn script_extra_args(request: &InvocationRequest) -> Vec<String> {
    let mut extra = Vec::new();
    if request.watch {
        extra.push(WATCH_FLAG.to_string());
    }
    if let Some(pattern) = focus_pattern(request) {
        extra.push(pattern.to_string());
    }
    extra
}

/// An empty pattern means no pattern at all.
fn non_empty_pattern(request: &InvocationRequest) -> Option<&str> {
    request.pattern.as_deref().filter(|p| !p.is_empty())
}

/// The pattern that reaches the command: category runs only, never empty.
fn focus_pattern(request: &InvocationRequest) -> Option<&str> {
    request.category.and(non_empty_pattern(request))
}

/// `<pm> run <script> [-- extra...]`. The separator makes the extra arguments
/// reach the script's tool instead of the package manager.
///
/// `<pm> run <script> [-- extra...]`。分隔符使额外参数传给脚本中的工具，而非包管理器。
pub fn script_command(manager: PackageManager, script: &str, extra: Vec<String>) -> Vec<String> {
    let mut argv = manager.script_invocation(script);
    if !extra.is_empty() {
        argv.push("--".to_string());
        argv.extend(extra);
    }
    argv
}

/// Direct invocation of a runner with watch and name-filter flags translated.
///
/// 直接调用运行器，并转换监视和名称过滤参数。
pub fn runner_command(runner: TestRunner, watch: bool, pattern: Option<&str>) -> Vec<String> {
    let mut argv: Vec<String> = match runner {
        TestRunner::Jest => {
            let mut argv = vec!["npx".to_string(), "jest".to_string()];
            if watch {
                argv.push(WATCH_FLAG.to_string());
            }
            argv
        }
        // `vitest` watches by default; `vitest run` is the single-pass form.
        TestRunner::Vitest if watch => vec!["npx".to_string(), "vitest".to_string()],
        TestRunner::Vitest => vec!["npx".to_string(), "vitest".to_string(), "run".to_string()],
        TestRunner::Mocha => vec!["npx".to_string(), "mocha".to_string()],
        TestRunner::NodeNative => vec!["node".to_string(), "--test".to_string()],
    };

    if let Some(pattern) = pattern {
        match runner {
            TestRunner::Jest | TestRunner::Vitest => {
                argv.extend(["-t".to_string(), pattern.to_string()]);
            }
            TestRunner::Mocha => argv.extend(["--grep".to_string(), pattern.to_string()]),
            TestRunner::NodeNative => {
                tracing::debug!("node --test has no name filter here; pattern ignored");
            }
        }
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitest_watch_drops_run_subcommand() {
        assert_eq!(runner_command(TestRunner::Vitest, true, None), ["npx", "vitest"]);
        assert_eq!(
            runner_command(TestRunner::Vitest, false, Some("x")),
            ["npx", "vitest", "run", "-t", "x"]
        );
    }

    #[test]
    fn mocha_never_gets_a_watch_flag() {
        assert_eq!(runner_command(TestRunner::Mocha, true, None), ["npx", "mocha"]);
    }

    #[test]
    fn script_command_without_extras_has_no_separator() {
        assert_eq!(
            script_command(PackageManager::Yarn, "test", Vec::new()),
            ["yarn", "test"]
        );
    }
}
