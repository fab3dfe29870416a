use clap::Parser;
use color_eyre::Result;
use multilogin::cli::{run_cli_command, Cli};
use multilogin::MultiloginError;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "multilogin=debug"
    } else {
        "multilogin=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_cli_command(cli.command));

    if let Err(report) = &result {
        if let Some(err) = report.downcast_ref::<MultiloginError>() {
            tracing::debug!(code = err.error_code(), category = %err.category(), "Command failed");
            eprintln!("hint: {}", err.category().recovery_hint());
        }
    }
    result
}
