//! txtplate CLI entry point
//!
//! Parses arguments, sets up logging, runs the render pipeline and turns any
//! error into a colored message on stderr with exit code 1.

use clap::Parser;
use txtplate::cli::{self, Cli};
use txtplate::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli::init_logging(&cli.log_config());

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
