//! ANSI SGR helpers: the colour palette used for frames and a length
//! calculation that ignores escape sequences.

use core::fmt;

const ESC: char = '\u{1b}';
const SGR_END: char = 'm';
const RESET: &str = "\u{1b}[0m";

/// Colours of the individual parts of a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// The `#<depth>` marker.
    Depth,
    /// The program counter of the frame.
    Address,
    /// Function name, symbolic or resolved from an address.
    Function,
    /// Parentheses around the argument list.
    Brackets,
    /// Source file name.
    Filename,
    /// Source line number, including its leading colon.
    Line,
}

impl Style {
    /// The SGR parameters of this style, e.g. `1;34`.
    pub fn code(self) -> &'static str {
        match self {
            Style::Depth | Style::Brackets => "1;37",
            Style::Address => "1;30",
            Style::Function => "1;34",
            Style::Filename => "0;36",
            Style::Line => "0;35",
        }
    }

    /// Wraps `text` in this style, always followed by a reset.
    pub fn paint<T: fmt::Display>(self, text: T) -> Painted<T> {
        Painted { style: self, text }
    }
}

/// Text wrapped in a [`Style`], see [`Style::paint`].
#[derive(Debug, Clone, Copy)]
pub struct Painted<T> {
    style: Style,
    text: T,
}

impl<T: fmt::Display> fmt::Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}m{}{}", ESC, self.style.code(), self.text, RESET)
    }
}

/// Number of characters of `s` that end up on the screen.
///
/// An escape sequence runs from `ESC` up to and including the next `m`. An
/// escape without a terminating `m` swallows the rest of the string.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if in_escape {
            in_escape = c != SGR_END;
        } else if c == ESC {
            in_escape = true;
        } else {
            len += 1;
        }
    }
    len
}

/// Removes every escape sequence from `s`, using the same rules as
/// [`visible_len`].
pub fn strip(s: &str) -> String {
    let mut in_escape = false;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if in_escape {
            in_escape = c != SGR_END;
        } else if c == ESC {
            in_escape = true;
        } else {
            out.push(c);
        }
    }
    out
}
