use soda_drv::{main as run, EXIT_USAGE_OR_IO_ERROR};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(EXIT_USAGE_OR_IO_ERROR);
        }
    }
}
