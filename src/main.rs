//! pontolog main entrypoint.

use pontolog::run;

fn main() {
    // Diagnostics go to stderr; RUST_LOG=debug for details.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
