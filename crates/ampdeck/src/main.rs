#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = ampdeck::run_from_env() {
        eprintln!("ampdeck: {error}");
        std::process::exit(error.exit_code());
    }
}
