pub mod debug;
pub mod init;
pub mod run;
pub mod send;
pub mod status;
pub mod stop;

use winrelay_core::ipc::{Command, ResponseStatus};

/// Sends a request to the running host, exiting the process on failure.
///
/// Returns the response message, if any.
fn request(command: &Command) -> Option<String> {
    match winrelay_windows::ipc::send_command(command) {
        Ok(response) if response.status == ResponseStatus::Ok => response.message,
        Ok(response) => {
            eprintln!(
                "Error: {}",
                response.message.unwrap_or("unknown error".into())
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to reach winrelay: {e}");
            std::process::exit(1);
        }
    }
}
