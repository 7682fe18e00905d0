//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures shared by the detectors and
//! the dispatcher: the parsed manifest, the package manager and test runner
//! families, invocation requests and composed commands.
//!
//! 此模块定义了检测器和分发器共享的核心数据结构：
//! 解析后的清单、包管理器与测试运行器类型、调用请求以及组合后的命令。

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A name → value map as found in the `scripts` and dependency sections.
/// 清单中 `scripts` 与依赖部分的 名称 → 值 映射。
pub type StringMap = BTreeMap<String, String>;

/// The subset of `package.json` the engine cares about.
///
/// 引擎关心的 `package.json` 子集。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    /// Named scripts runnable through the package manager.
    /// 可通过包管理器运行的命名脚本。
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scripts: StringMap,
    /// Runtime dependencies. / 运行时依赖。
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: StringMap,
    /// Development dependencies. / 开发依赖。
    #[serde(
        default,
        rename = "devDependencies",
        deserialize_with = "null_as_empty"
    )]
    pub dev_dependencies: StringMap,
}

impl Manifest {
    /// Returns `true` if a script with exactly this name is defined.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

// `"scripts": null` is seen in the wild and means the same as an absent section.
fn null_as_empty<'de, D>(deserializer: D) -> Result<StringMap, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringMap>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The tool fronting script execution for a project.
///
/// 为项目执行脚本的包管理器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// The argument vector that runs a named script.
    /// yarn accepts the bare `yarn <script>` form on every major version,
    /// while npm and pnpm need the explicit `run` subcommand.
    ///
    /// 运行命名脚本的参数向量。
    pub fn script_invocation(self, script: &str) -> Vec<String> {
        match self {
            PackageManager::Pnpm => vec!["pnpm".into(), "run".into(), script.into()],
            PackageManager::Yarn => vec!["yarn".into(), script.into()],
            PackageManager::Npm => vec!["npm".into(), "run".into(), script.into()],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test runner family the dispatcher knows how to drive directly.
/// Absence of a runner is expressed as `Option::None`, never as a variant.
///
/// 分发器可以直接驱动的测试运行器类型。
/// 没有检测到运行器时用 `Option::None` 表示，而不是一个枚举变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestRunner {
    Jest,
    Vitest,
    Mocha,
    /// The runner built into Node.js (`node --test`).
    #[serde(alias = "node-test-runner")]
    NodeNative,
}

impl TestRunner {
    pub fn as_str(self) -> &'static str {
        match self {
            TestRunner::Jest => "jest",
            TestRunner::Vitest => "vitest",
            TestRunner::Mocha => "mocha",
            TestRunner::NodeNative => "node-native",
        }
    }
}

impl fmt::Display for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named test subset, mapped to a `test:<category>` script when present.
///
/// 命名的测试子集，存在时映射到 `test:<category>` 脚本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TestCategory {
    Unit,
    Integration,
    E2e,
}

impl TestCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TestCategory::Unit => "unit",
            TestCategory::Integration => "integration",
            TestCategory::E2e => "e2e",
        }
    }

    /// The manifest script that implements this category, e.g. `test:unit`.
    pub fn script_name(self) -> String {
        format!("test:{}", self.as_str())
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller asked for. `category: None` means the whole suite.
///
/// 调用方的请求。`category` 为 `None` 表示运行整个测试套件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Category to run; absent runs the whole suite. / 要运行的类别；缺省运行全部。
    pub category: Option<TestCategory>,
    /// Test-name filter, translated per runner. / 测试名称过滤，按运行器转换。
    pub pattern: Option<String>,
    /// Whether watch mode was requested. / 是否请求监视模式。
    pub watch: bool,
}

impl InvocationRequest {
    pub fn whole_suite() -> Self {
        Self::default()
    }

    pub fn category(category: TestCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }
}

/// Everything detection learned about a project root.
///
/// 对项目根目录的检测结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub package_manager: PackageManager,
    pub test_runner: Option<TestRunner>,
}

/// A fully resolved command: program plus arguments, and where to run it.
/// The fields are private so a composed command cannot be altered after
/// the dispatcher hands it out.
///
/// 完全解析后的命令：程序及其参数，以及运行目录。
/// 字段为私有，分发器交出命令后不可再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    argv: Vec<String>,
    cwd: PathBuf,
}

impl ComposedCommand {
    /// `argv` must contain at least the program name.
    pub fn new(argv: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        debug_assert!(!argv.is_empty(), "a composed command needs a program");
        Self {
            argv,
            cwd: cwd.into(),
        }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Renders the argument vector as a single shell-quoted line for display.
    /// 将参数向量渲染为一行经过 shell 转义的文本，用于显示。
    pub fn display_line(&self) -> String {
        shlex::try_join(self.argv.iter().map(String::as_str))
            .unwrap_or_else(|_| self.argv.join(" "))
    }
}

/// Exit status and captured streams of a finished child process.
///
/// 已结束子进程的退出状态和捕获的输出流。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}
