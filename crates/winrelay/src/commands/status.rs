use winrelay_core::Command;

pub fn execute() {
    if !winrelay_windows::ipc::is_host_running() {
        println!("winrelay is not running.");
        return;
    }

    let summary = super::request(&Command::Status).unwrap_or_default();
    println!("winrelay is running: {summary}");
}
