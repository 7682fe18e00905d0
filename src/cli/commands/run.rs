//! # Run Command Module / 运行命令模块
//!
//! This module implements the default action of the CLI: resolve the test
//! command for the request and either preview it (`--dry-run`) or run it and
//! relay its output.
//!
//! 此模块实现 CLI 的默认操作：为请求解析测试命令，
//! 然后预览（`--dry-run`）或运行该命令并转发其输出。

use anyhow::{Context, Result};

use crate::{
    core::{
        dispatch::Dispatcher,
        execution::{ProjectContext, run_request},
        models::InvocationRequest,
    },
    infra::{command::ProcessRunner, t},
    reporting::{print_dispatch_error, print_dry_run, relay_output},
};

/// Executes the run command and returns the exit code to report.
///
/// # Arguments
/// * `runner` - Process runner used to execute the composed command
/// * `context` - Detection snapshot of the project root
/// * `request` - Category, pattern and watch settings
/// * `dispatcher` - Dispatcher carrying the fallback runner policy
/// * `dry_run` - Print the command instead of running it
///
/// # Returns
/// The child's exit code, `0` for a successful dry run, or the error's exit
/// code (127 when nothing could be resolved or the executable is missing).
pub async fn execute<R: ProcessRunner>(
    runner: &R,
    context: &ProjectContext,
    request: &InvocationRequest,
    dispatcher: &Dispatcher,
    dry_run: bool,
) -> Result<u8> {
    if dry_run {
        return Ok(match context.plan(request, dispatcher) {
            Ok(command) => {
                print_dry_run(&command);
                0
            }
            Err(e) => {
                print_dispatch_error(&e);
                e.exit_code()
            }
        });
    }

    match run_request(runner, context, request, dispatcher).await {
        Ok(output) => {
            relay_output(&output).with_context(|| t!("output_relay_failed").to_string())?;
            Ok(exit_code_byte(output.code))
        }
        Err(e) => {
            tracing::debug!(error = %e, "dispatch failed");
            print_dispatch_error(&e);
            Ok(e.exit_code())
        }
    }
}

/// Process exit codes are a single byte on every platform we report to.
fn exit_code_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
