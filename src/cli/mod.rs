//! # CLI Module
//!
//! Command table for the `rpcscaffold` binary. Every command is a variant of
//! [`Commands`] and is dispatched by a single `match` in [`run_cli`].
//!
//! ## Commands
//!
//! ### `module add`
//!
//! Scaffold a module from `proto/<module>`:
//!
//! ```bash
//! rpcscaffold module add course github.com/acme/school
//! ```
//!
//! Options:
//! - `--skip-protogen` - Don't validate proto files or run `make protoc`
//! - `--no-format` - Don't run `go fmt ./...` and `go mod tidy`
//! - `--dry-run` - Report what would be written
//!
//! Existing files in `app/rpc/<module>/` are never overwritten.
//!
//! ### `module register` / `gateway register`
//!
//! Rewrite `app/rpc/server.go` or `app/gateway/gateway.go` from every
//! directory under `app/rpc` holding a `service.go`. `module gateway` is the
//! same as `gateway register`.
//!
//! ### `module list`
//!
//! Print discovered modules, or their registration descriptors with `--json`.
//!
//! ### `protogen`, `sqlc generate`
//!
//! Run the external generator, then `go mod tidy`.
//!
//! ## Global Options
//!
//! - `--root <DIR>` - Project root (default `.`)
//! - `--config <FILE>` - Layout config (default `<root>/rpcscaffold.toml`)
//! - `-v` / `-q` - Debug or warn-level logging
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use rpcscaffold::cli::{run_cli, Cli};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cli = Cli::parse_from(["rpcscaffold", "--root", "school", "module", "register"]);
//! run_cli(cli)?;
//! # Ok(())
//! # }
//! ```

mod commands;


pub use commands::{
    run_cli, AddArgs, Cli, Commands, GatewayCommand, ModuleCommand, RegisterArgs, SqlcCommand,
};
