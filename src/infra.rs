//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the dispatcher,
//! including process execution, file system probing, and i18n support.
//!
//! 此模块为分发器提供基础设施服务，
//! 包括进程执行、文件系统探测和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
