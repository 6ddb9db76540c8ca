use crate::controller::DEFAULT_TITLE;

/// Generates the commented default `config.toml` written by `winrelay init`.
pub fn generate_config() -> String {
    format!(
        r#"# winrelay configuration
# Every key is optional; missing keys use the defaults shown here.

[window]
# Exact title of the window to control. The window is also renamed
# back to this title when it is restored.
title = "{DEFAULT_TITLE}"

[permissions]
# Allow the application to move and resize its window (SetWindow).
can_move_window = false
# Allow the application to change its window title (SetWindowTitle).
can_set_window_title = false

[logging]
enabled = false
# One of: debug, info, warn, error
level = "info"
max_file_mb = 10
"#
    )
}
