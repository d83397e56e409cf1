#![forbid(unsafe_code)]

//! tourkit demo binary entry point.

use tourkit_demo::cli::Opts;

fn main() {
    let opts = Opts::from_env();
    if let Err(e) = tourkit_demo::run(&opts) {
        eprintln!("tourkit-demo: {e}");
        std::process::exit(1);
    }
}
