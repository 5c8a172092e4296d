use anyhow::Result;
use clap::Parser;
use legacymap::cli::{Cli, Commands};
use legacymap::commands;
use legacymap::config::Config;
use legacymap::server::tools::ServerState;

fn main() -> Result<()> {
    // Logs go to stderr so the stdio protocol on stdout stays clean.
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let state = ServerState::new(config.limits, config.exclude);

    let code = match cli.command {
        Commands::Scan {
            path,
            exclude,
            output,
        } => commands::scan::handle_scan(&state, path, exclude, output)?,
        Commands::Report {
            path,
            exclude,
            output,
        } => commands::report::handle_report(&state, path, exclude, output)?,
        Commands::Convert {
            file,
            no_backup,
            dry_run,
        } => commands::convert::handle_convert(&state, file, no_backup, dry_run)?,
        Commands::Validate { file } => commands::validate::handle_validate(&state, file)?,
        Commands::Compare {
            original,
            converted,
        } => commands::compare::handle_compare(&state, original, converted)?,
        Commands::Serve => commands::serve::handle_serve(&state)?,
    };

    std::process::exit(code)
}
