use clap::Parser;
use rpcscaffold::cli::{run_cli, Cli};
use rpcscaffold::logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();
    let log_config = LogConfig::from_env().with_verbosity(cli.verbose, cli.quiet);
    if let Err(err) = init_logging(&log_config) {
        eprintln!("warning: {err:#}");
    }

    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
