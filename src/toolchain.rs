//! External tool invocation.
//!
//! The scaffolder never reimplements the protocol compiler, the SQL code
//! generator or the Go toolchain; it shells out to them from the project root
//! and fails the command when they exit non-zero. Command lines come from
//! [`ScaffoldConfig::tools`], so tests substitute stub scripts through the
//! `RPCSCAFFOLD_*_BIN` variables instead of mutating `PATH`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};

/// Run `command` (program followed by arguments) in `root`
///
/// Returns the captured stdout.
///
/// # Errors
///
/// Returns [`ScaffoldError::Tool`] when the command is empty, cannot be
/// started, or exits unsuccessfully. The message carries the tool's stderr.
pub fn run_tool(command: &[String], root: &Path) -> Result<String> {
    let command_line = command.join(" ");
    let Some((program, args)) = command.split_first() else {
        return Err(ScaffoldError::Tool {
            command: command_line,
            message: "empty command".to_string(),
        });
    };

    debug!("Running `{command_line}` in {}", root.display());
    let output = Command::new(program)
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| ScaffoldError::Tool {
            command: command_line.clone(),
            message: format!("failed to start: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => format!("exited with {}", output.status),
            text => format!("exited with {}: {text}", output.status),
        };
        return Err(ScaffoldError::Tool {
            command: command_line,
            message,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run the protocol compiler (`make protoc` by default)
///
/// # Errors
///
/// See [`run_tool`].
pub fn run_protoc(root: &Path, config: &ScaffoldConfig) -> Result<()> {
    info!("Generating protobuf files...");
    run_tool(&config.tools.protoc, root)?;
    Ok(())
}

/// `go fmt ./...`
///
/// # Errors
///
/// See [`run_tool`].
pub fn go_fmt(root: &Path, config: &ScaffoldConfig) -> Result<()> {
    info!("Formatting code...");
    run_tool(&go_command(config, &["fmt", "./..."]), root)?;
    Ok(())
}

/// `go mod tidy`
///
/// # Errors
///
/// See [`run_tool`].
pub fn go_mod_tidy(root: &Path, config: &ScaffoldConfig) -> Result<()> {
    info!("Tidying go.mod...");
    run_tool(&go_command(config, &["mod", "tidy"]), root)?;
    Ok(())
}

/// Run the SQL code generator (`sqlc generate` by default)
///
/// # Errors
///
/// See [`run_tool`].
pub fn sqlc_generate(root: &Path, config: &ScaffoldConfig) -> Result<()> {
    info!("Generating sqlc code...");
    let stdout = run_tool(&config.tools.sqlc, root)?;
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        info!("sqlc: {line}");
    }
    Ok(())
}

fn go_command(config: &ScaffoldConfig, args: &[&str]) -> Vec<String> {
    std::iter::once(config.tools.go.clone())
        .chain(args.iter().map(|a| (*a).to_string()))
        .collect()
}
