//! Terminal bot-navigation demo using crossterm.
//!
//! Run: cargo run --bin botnav -- [grid_size] [obstacles]

use botnav_demo::{Demo, config_from_args};

fn main() {
    let config = match config_from_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let result = Demo::new(config)
        .map_err(|e| e.to_string())
        .and_then(|demo| demo.run_terminal().map_err(|e| e.to_string()));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
