use winrelay_core::Command;

pub fn execute() {
    if !winrelay_windows::ipc::is_host_running() {
        println!("winrelay is not running.");
        return;
    }

    let message = super::request(&Command::Stop).unwrap_or_default();
    println!("winrelay stopped. {message}");
}
