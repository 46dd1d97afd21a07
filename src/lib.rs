//! A library to print debugger backtraces with colours.
//!
//! Each frame is rendered as
//!
//! ```text
//! #<depth>  <address> in <function> (<args>) at <filename>[:<line>]
//! ```
//!
//! with every part in its own ANSI colour. Frames wider than the display
//! budget continue on a second line that starts with the `at` clause, lined
//! up beneath the function.
//!
//! The debugger itself stays outside of this crate: it supplies frames
//! through [`FrameAttributes`], describes bare code addresses through
//! [`SymbolLookup`], and drives a [`ColourFilter`] once per backtrace
//! request.
//!
//! # Usage
//!
//! ```
//! use colour_filter::{ColourFilter, DisplayPrefs, RawFrame, Unresolved};
//!
//! let frames = vec![
//!     RawFrame::new(0, 0x7ffff7a42428)
//!         .with_function("raise")
//!         .with_argument("sig", "6")
//!         .with_filename("../sysdeps/unix/sysv/linux/raise.c")
//!         .with_line(54),
//!     RawFrame::new(0, 0x401136).with_function("main").with_filename("main.c").with_line(3),
//! ];
//!
//! let filter = ColourFilter::default().prefs(DisplayPrefs::new().show_address(false));
//! let mut out = Vec::new();
//! filter.filter(frames, &Unresolved, &mut out).unroll().unwrap();
//! ```
//!
//! # Cargo features
//!
//! * `capture` (default) - render the running process's own stack, see
//!   `print_current`.
//! * `cpp_demangle` - demangle C++ function names.
//! * `serialize-serde` - `serde` support for frames and preferences.

#![doc(html_root_url = "https://docs.rs/colour-filter")]

pub use crate::ansi::{strip, visible_len, Painted, Style};
pub use crate::backtrace::{BacktraceEmitter, Drain};
pub use crate::config::{DisplayBudget, DisplayPrefs};
pub use crate::error::{Error, Result};
pub use crate::filter::{ColourFilter, FilterSet, FrameFilter, DEFAULT_NAME};
pub use crate::format::{render, FrameRenderer, RenderedFrame};
pub use crate::symbolize::{demangle, resolve_by_address, SymbolInfo, SymbolLookup, Unresolved};
pub use crate::types::{
    Argument, BlockSymbol, FrameAttributes, FunctionRef, LexicalBlock, NoBlock, RawFrame,
};

mod ansi;
mod backtrace;
mod config;
mod error;
mod filter;
mod format;
mod symbolize;
mod types;

cfg_if::cfg_if! {
    if #[cfg(feature = "capture")] {
        mod capture;
        pub use crate::capture::{print_current, CapturedFrame};
    }
}
