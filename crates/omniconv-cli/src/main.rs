use omniconv_core::{LoggingDestination, init_logging};

fn main() {
    if let Err(err) = init_logging(LoggingDestination::FileOnly) {
        eprintln!("Warning: logging disabled: {err}");
    }
    if let Err(err) = omniconv_cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
