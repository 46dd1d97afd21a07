use colour_filter::{ColourFilter, DisplayBudget, DisplayPrefs, RawFrame};
use std::io;

// A backtrace as a debugger would report it after `abort()`.
fn frames() -> Vec<RawFrame> {
    vec![
        RawFrame::new(0, 0x7ffff7a42428)
            .with_function("raise")
            .with_argument("sig", "6")
            .with_filename("../sysdeps/unix/sysv/linux/raise.c")
            .with_line(54),
        RawFrame::new(0, 0x7ffff7a4402a)
            .with_function(0x7ffff7a4402au64)
            .with_filename("abort.c"),
        RawFrame::new(0, 0x401136)
            .with_function("_ZN4demo6Parser10parse_line17h0123456789abcdefE")
            .with_argument("self", "0x7fffffffe2b0")
            .with_argument("line", "")
            .with_filename("src/parser.rs")
            .with_line(118),
        RawFrame::new(0, 0x401f20)
            .with_function("main")
            .with_argument("argc", "1")
            .with_argument("argv", "0x7fffffffe428")
            .with_filename("main.c")
            .with_line(12),
    ]
}

fn info_symbol(addr: u64) -> String {
    match addr {
        0x7ffff7a4402a => "abort + 362 in section .text of /usr/lib/libc.so.6\n".to_string(),
        _ => format!("No symbol matches 0x{:x}.\n", addr),
    }
}

fn main() {
    for &width in &[160, 60] {
        for &show_address in &[true, false] {
            let prefs = DisplayPrefs::new()
                .show_address(show_address)
                .budget(DisplayBudget::new(width).unwrap_or_default());
            println!("width {}, addresses {}:", width, show_address);
            let filter = ColourFilter::default().prefs(prefs);
            if let Err(e) = filter.filter(frames(), &info_symbol, io::stdout()).unroll() {
                eprintln!("{}", e);
            }
            println!();
        }
    }
}
