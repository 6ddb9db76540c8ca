use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

pub fn execute() {
    winrelay_windows::dpi::enable_dpi_awareness();

    let windows = match winrelay_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Failed to enumerate windows: {e}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("X").set_alignment(CellAlignment::Right),
            Cell::new("Y").set_alignment(CellAlignment::Right),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
            Cell::new("DPI").set_alignment(CellAlignment::Right),
        ]);

    for window in &windows {
        let rect = window.rect().unwrap_or_default();
        table.add_row(vec![
            Cell::new(format!("0x{:X}", window.handle().raw())),
            Cell::new(window.title()),
            Cell::new(rect.x).set_alignment(CellAlignment::Right),
            Cell::new(rect.y).set_alignment(CellAlignment::Right),
            Cell::new(rect.width).set_alignment(CellAlignment::Right),
            Cell::new(rect.height).set_alignment(CellAlignment::Right),
            Cell::new(window.dpi()).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
    println!("\n{} windows found", windows.len());
}
