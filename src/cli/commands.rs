use crate::config::ScaffoldConfig;
use crate::discovery::discover_modules;
use crate::generator::{add_module, register_gateway, register_services, AddOptions};
use crate::toolchain;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface for rpcscaffold
///
/// Scaffolds the Go application layer of gRPC modules and keeps the
/// aggregate server and gateway in sync with them.
#[derive(Parser, Debug)]
#[command(name = "rpcscaffold", version)]
#[command(about = "Scaffold gRPC service modules for a Go project", long_about = None)]
pub struct Cli {
    /// Project root (directory holding go.mod)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/rpcscaffold.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Module management commands
    #[command(subcommand)]
    Module(ModuleCommand),
    /// Gateway commands
    #[command(subcommand)]
    Gateway(GatewayCommand),
    /// Run the protocol compiler, then `go mod tidy`
    Protogen,
    /// SQL code generation
    #[command(subcommand)]
    Sqlc(SqlcCommand),
}

/// `module ...`
#[derive(Subcommand, Debug)]
pub enum ModuleCommand {
    /// Create a gRPC module with one handler per RPC from its proto files
    Add(AddArgs),
    /// Regenerate app/rpc/server.go from every module
    Register(RegisterArgs),
    /// Regenerate app/gateway/gateway.go from every module
    Gateway(RegisterArgs),
    /// List discovered modules
    List {
        /// Print the registration descriptors as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// `gateway ...`
#[derive(Subcommand, Debug)]
pub enum GatewayCommand {
    /// Regenerate app/gateway/gateway.go from every module
    Register(RegisterArgs),
}

/// `sqlc ...`
#[derive(Subcommand, Debug)]
pub enum SqlcCommand {
    /// Run `sqlc generate`, then `go mod tidy`
    Generate,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Module name (directory under proto/ and protogen/)
    pub module_name: String,

    /// Root import path of the Go project (e.g. github.com/acme/school)
    pub target_module: String,

    /// Do not validate proto/<module> or run the protocol compiler
    #[arg(long, default_value_t = false)]
    pub skip_protogen: bool,

    /// Do not run `go fmt` and `go mod tidy` afterwards
    #[arg(long, default_value_t = false)]
    pub no_format: bool,

    /// Show what would be written without touching any file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Show what would be written without touching any file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Execute a parsed command line
///
/// # Errors
///
/// Returns the first fatal error, with context naming the command.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let root = cli.root.as_path();
    let config = ScaffoldConfig::load(root, cli.config.as_deref())?;

    match cli.command {
        Commands::Module(ModuleCommand::Add(args)) => {
            let options = AddOptions {
                skip_protogen: args.skip_protogen,
                no_format: args.no_format,
                dry_run: args.dry_run,
            };
            add_module(root, &config, &args.module_name, &args.target_module, options)
                .with_context(|| format!("failed to add module '{}'", args.module_name))?;
        }
        Commands::Module(ModuleCommand::Register(args)) => {
            register_services(root, &config, args.dry_run)
                .context("failed to register services")?;
        }
        Commands::Module(ModuleCommand::Gateway(args))
        | Commands::Gateway(GatewayCommand::Register(args)) => {
            register_gateway(root, &config, args.dry_run)
                .context("failed to register gateway endpoints")?;
        }
        Commands::Module(ModuleCommand::List { json }) => list_modules(root, &config, json)?,
        Commands::Protogen => {
            toolchain::run_protoc(root, &config).context("protogen failed")?;
            toolchain::go_mod_tidy(root, &config).context("protogen failed")?;
        }
        Commands::Sqlc(SqlcCommand::Generate) => {
            toolchain::sqlc_generate(root, &config).context("sqlc generate failed")?;
            toolchain::go_mod_tidy(root, &config).context("sqlc generate failed")?;
        }
    }
    Ok(())
}

fn list_modules(root: &Path, config: &ScaffoldConfig, json: bool) -> anyhow::Result<()> {
    let modules = discover_modules(root, config).context("failed to discover modules")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }
    if modules.is_empty() {
        println!("No modules found");
    }
    for module in &modules {
        println!(
            "{:<20} {:<24} {}",
            module.module_name, module.service_name, module.pb_import_path
        );
    }
    Ok(())
}
