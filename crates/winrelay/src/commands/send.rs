use winrelay_core::{Command, Message};

use crate::cli::SendArgs;

/// Relays one message to the running host.
pub fn execute(args: &SendArgs) {
    if !winrelay_windows::ipc::is_host_running() {
        eprintln!("winrelay is not running.");
        std::process::exit(1);
    }

    let command = Command::Relay {
        message: Message::new(args.command.clone(), args.data.clone()),
    };
    if let Some(msg) = super::request(&command) {
        println!("{msg}");
    }
}
