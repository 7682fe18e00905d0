//! # Reporting Module / 报告模块
//!
//! This module handles what the tool writes to the terminal: detection
//! reports, dry-run previews, failure messages and the relayed output of the
//! test command.
//!
//! 此模块负责工具写入终端的内容：检测报告、试运行预览、失败信息以及测试命令的转发输出。

pub mod console;

// Re-export common reporting functions
pub use console::{print_detection, print_dispatch_error, print_dry_run, relay_output};
