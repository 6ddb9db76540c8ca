mod cli;
#[cfg(windows)]
mod commands;

use clap::Parser;

use cli::Cli;

#[cfg(windows)]
fn main() {
    use cli::{Commands, DebugCommands};

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Send(args) => commands::send::execute(&args),
        Commands::Debug { command } => match command {
            DebugCommands::List => commands::debug::list::execute(),
        },
    }
}

#[cfg(not(windows))]
fn main() {
    let _ = Cli::parse();
    eprintln!("winrelay controls Win32 windows and only runs on Windows.");
    std::process::exit(1);
}
