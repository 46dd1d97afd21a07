use colour_filter::{print_current, DisplayPrefs};
use std::io;

fn main() {
    let prefs = DisplayPrefs::new();
    if let Err(e) = print_current(prefs, io::stdout()) {
        eprintln!("{}", e);
    }
    println!();
    if let Err(e) = print_current(prefs.show_address(false), io::stdout()) {
        eprintln!("{}", e);
    }
}
