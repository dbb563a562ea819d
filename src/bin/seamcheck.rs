use clap::Parser;
use colored::Colorize;
use seamcheck_core::cli::{self, Cli};
use seamcheck_core::exit::SeamExit;

fn main() -> SeamExit {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose, cli.log_level.as_deref());

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(SeamExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            SeamExit::Error
        }
    }
}
