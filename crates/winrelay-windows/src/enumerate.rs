use winrelay_core::WindowResult;

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::window::Window;

/// Enumerates all visible top-level windows that have a title.
///
/// This calls the Win32 `EnumWindows` API, which iterates over every top-level
/// window and invokes a callback for each one.
pub fn enumerate_windows() -> WindowResult<Vec<Window>> {
    let mut windows: Vec<Window> = Vec::new();

    // SAFETY: EnumWindows calls our callback synchronously for each
    // top-level window. The Vec behind LPARAM outlives the call.
    unsafe {
        EnumWindows(
            Some(collect_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )?;
    }

    Ok(windows)
}

/// Returns the first visible top-level window whose title equals `title`.
pub fn find_by_title(title: &str) -> Option<Window> {
    let mut search = TitleSearch { title, found: None };

    // SAFETY: same contract as in enumerate_windows. The callback returns
    // FALSE once it finds a match, which makes EnumWindows report an
    // error; the match is read from `search` instead.
    unsafe {
        let _ = EnumWindows(
            Some(search_callback),
            LPARAM(&mut search as *mut TitleSearch as isize),
        );
    }

    search.found
}

struct TitleSearch<'a> {
    title: &'a str,
    found: Option<Window>,
}

unsafe extern "system" fn collect_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec<Window> pointer from enumerate_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<Window>) };

    let window = Window::new(hwnd);
    if window.is_visible() && !window.title().is_empty() {
        windows.push(window);
    }

    BOOL(1) // TRUE: continue enumerating
}

unsafe extern "system" fn search_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the TitleSearch pointer from find_by_title().
    let search = unsafe { &mut *(lparam.0 as *mut TitleSearch) };

    let window = Window::new(hwnd);
    if window.is_visible() && window.title() == search.title {
        search.found = Some(window);
        return BOOL(0); // FALSE: stop, we have our match
    }

    BOOL(1)
}
