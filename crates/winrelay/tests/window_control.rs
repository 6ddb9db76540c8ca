//! End-to-end tests against a real window.
//!
//! These need an interactive desktop session with notepad.exe. They
//! launch notepad, run the host against its title, relay messages with
//! `winrelay send`, and check the window through raw Win32 calls.
#![cfg(windows)]

use std::process::{Child, Command};
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Win32 FFI
// ---------------------------------------------------------------------------

#[allow(non_snake_case, non_camel_case_types)]
mod win32 {
    use std::ffi::c_void;

    pub type HWND = *mut c_void;
    pub type BOOL = i32;
    pub type DWORD = u32;
    pub type UINT = u32;
    pub type WPARAM = usize;
    pub type LPARAM = isize;

    pub const WM_CLOSE: UINT = 0x0010;
    pub const GWL_EXSTYLE: i32 = -20;
    pub const WS_EX_LAYERED: isize = 0x0008_0000;
    pub const LWA_COLORKEY: DWORD = 0x0000_0001;

    pub type WNDENUMPROC = unsafe extern "system" fn(hwnd: HWND, lparam: LPARAM) -> BOOL;

    #[repr(C)]
    pub struct RECT {
        pub left: i32,
        pub top: i32,
        pub right: i32,
        pub bottom: i32,
    }

    #[link(name = "user32")]
    unsafe extern "system" {
        pub fn IsWindowVisible(hwnd: HWND) -> BOOL;
        pub fn EnumWindows(cb: WNDENUMPROC, lparam: LPARAM) -> BOOL;
        pub fn GetWindowThreadProcessId(hwnd: HWND, pid: *mut DWORD) -> DWORD;
        pub fn PostMessageW(hwnd: HWND, msg: UINT, wparam: WPARAM, lparam: LPARAM) -> BOOL;
        pub fn GetWindowRect(hwnd: HWND, rect: *mut RECT) -> BOOL;
        pub fn GetWindowTextW(hwnd: HWND, text: *mut u16, max: i32) -> i32;
        pub fn GetWindowLongPtrW(hwnd: HWND, index: i32) -> isize;
        pub fn GetLayeredWindowAttributes(
            hwnd: HWND,
            key: *mut DWORD,
            alpha: *mut u8,
            flags: *mut DWORD,
        ) -> BOOL;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn winrelay(args: &[&str]) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_winrelay"))
        .args(args)
        .spawn()
        .expect("failed to spawn winrelay")
        .wait()
        .expect("failed to wait for winrelay")
}

/// Starts the host for `title` in the background and waits for its pipe.
fn start_host(title: &str) -> Child {
    let _ = winrelay(&["stop"]);
    thread::sleep(Duration::from_millis(500));

    let child = Command::new(env!("CARGO_BIN_EXE_winrelay"))
        .args(["run", "--title", title, "--allow-move", "--allow-title"])
        .spawn()
        .expect("failed to start host");
    thread::sleep(Duration::from_secs(1));
    child
}

/// Stops the host, which restores the window, and waits for it to exit.
fn stop_host(mut host: Child) {
    assert!(winrelay(&["stop"]).success(), "stop failed");
    let _ = host.wait();
}

fn send(command: &str, data: &str) {
    let status = winrelay(&["send", command, "--data", data]);
    assert!(status.success(), "send {command} failed");
}

fn launch_notepad() -> (Child, win32::HWND) {
    let child = Command::new("notepad.exe")
        .spawn()
        .expect("failed to launch notepad.exe");
    let pid = child.id();

    let mut hwnd = std::ptr::null_mut();
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(500));
        hwnd = find_window_by_pid(pid);
        if !hwnd.is_null() {
            break;
        }
    }
    assert!(!hwnd.is_null(), "notepad window did not appear within 10s");
    (child, hwnd)
}

fn close_notepad(mut child: Child, hwnd: win32::HWND) {
    unsafe {
        win32::PostMessageW(hwnd, win32::WM_CLOSE, 0, 0);
    }
    let _ = child.wait();
}

fn find_window_by_pid(pid: u32) -> win32::HWND {
    struct Search {
        pid: u32,
        result: win32::HWND,
    }

    unsafe extern "system" fn enum_cb(hwnd: win32::HWND, lparam: win32::LPARAM) -> win32::BOOL {
        let search = unsafe { &mut *(lparam as *mut Search) };
        let mut window_pid: win32::DWORD = 0;
        unsafe {
            win32::GetWindowThreadProcessId(hwnd, &mut window_pid);
        }
        if window_pid == search.pid && unsafe { win32::IsWindowVisible(hwnd) } != 0 {
            search.result = hwnd;
            return 0;
        }
        1
    }

    let mut search = Search {
        pid,
        result: std::ptr::null_mut(),
    };
    unsafe {
        win32::EnumWindows(enum_cb, &mut search as *mut Search as win32::LPARAM);
    }
    search.result
}

fn window_rect(hwnd: win32::HWND) -> (i32, i32, i32, i32) {
    let mut rect = win32::RECT {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
    unsafe {
        win32::GetWindowRect(hwnd, &mut rect);
    }
    (rect.left, rect.top, rect.right, rect.bottom)
}

fn window_title(hwnd: win32::HWND) -> String {
    let mut buffer = [0u16; 512];
    let len = unsafe { win32::GetWindowTextW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32) };
    String::from_utf16_lossy(&buffer[..len.max(0) as usize])
}

fn is_layered(hwnd: win32::HWND) -> bool {
    let ex_style = unsafe { win32::GetWindowLongPtrW(hwnd, win32::GWL_EXSTYLE) };
    ex_style & win32::WS_EX_LAYERED != 0
}

fn layered_flags(hwnd: win32::HWND) -> win32::DWORD {
    let (mut key, mut alpha, mut flags) = (0, 0, 0);
    unsafe {
        win32::GetLayeredWindowAttributes(hwnd, &mut key, &mut alpha, &mut flags);
    }
    flags
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore = "needs an interactive desktop with notepad.exe"]
fn set_window_moves_and_stop_restores() {
    let (notepad, hwnd) = launch_notepad();
    let title = window_title(hwnd);
    let original = window_rect(hwnd);
    let host = start_host(&title);

    send("SetWindow", r#"{"x":10,"y":10,"width":400,"height":300}"#);
    thread::sleep(Duration::from_millis(300));
    let moved = window_rect(hwnd);
    assert_ne!(moved, original, "window should have moved");

    stop_host(host);
    thread::sleep(Duration::from_millis(300));
    assert_eq!(window_rect(hwnd), original, "stop should restore the window");

    close_notepad(notepad, hwnd);
}

#[test]
#[ignore = "needs an interactive desktop with notepad.exe"]
fn title_and_transparency_are_reverted_on_restore() {
    let (notepad, hwnd) = launch_notepad();
    let title = window_title(hwnd);
    let host = start_host(&title);

    send("SetWindowTitle", r#"{"name":"winrelay test"}"#);
    send("SetWindowTransparency", r#"{"transparency":200,"color":"FF00FF"}"#);
    thread::sleep(Duration::from_millis(300));
    assert_eq!(window_title(hwnd), "winrelay test");
    assert!(is_layered(hwnd), "window should be layered");
    assert_eq!(
        layered_flags(hwnd),
        win32::LWA_COLORKEY,
        "only the color key should be applied"
    );

    send("RestoreWindowState", "{}");
    thread::sleep(Duration::from_millis(300));
    assert_eq!(window_title(hwnd), title);
    assert!(!is_layered(hwnd), "restore should clear the layered style");

    stop_host(host);
    close_notepad(notepad, hwnd);
}
