//! The `taskflow` binary. All CLI concerns live in `cli/`; this file only runs
//! it and turns an error into a message and exit status.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
