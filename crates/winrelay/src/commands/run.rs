use winrelay_windows::host::{self, HostOptions};

use crate::cli::RunArgs;

pub fn execute(args: &RunArgs) {
    let options = HostOptions {
        title: args.title.clone(),
        allow_move: args.allow_move,
        allow_title: args.allow_title,
    };

    if let Err(e) = host::run(&options) {
        eprintln!("winrelay error: {e}");
        std::process::exit(1);
    }
}
