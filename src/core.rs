//! # Core Module / 核心模块
//!
//! This module contains the resolution engine: data models, configuration,
//! root location, manifest loading, detection and dispatch.
//!
//! 此模块包含解析引擎：数据模型、配置、根目录定位、清单加载、检测与分发。

pub mod config;
pub mod detection;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod locator;
pub mod manifest;
pub mod models;

// Re-exports
pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use execution::{run_request, ProjectContext};
pub use models::{ComposedCommand, InvocationRequest, PackageManager, TestCategory, TestRunner};
