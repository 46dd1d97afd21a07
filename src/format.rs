use crate::ansi::{self, Style};
use crate::config::{DisplayBudget, DisplayPrefs};
use crate::symbolize::{self, SymbolLookup};
use crate::types::{FunctionRef, RawFrame};
use core::fmt;

/// One frame of a backtrace, rendered with ANSI colours.
///
/// Holds a single line, or two when the frame was wider than the display
/// budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame(String);

impl RenderedFrame {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the frame was split onto a continuation line.
    pub fn is_wrapped(&self) -> bool {
        self.0.contains('\n')
    }

    /// The frame with all colours removed.
    pub fn plain(&self) -> String {
        ansi::strip(&self.0)
    }
}

impl fmt::Display for RenderedFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RenderedFrame> for String {
    fn from(frame: RenderedFrame) -> String {
        frame.0
    }
}

/// Renders frames according to a set of [`DisplayPrefs`].
///
/// The layout of a frame is
///
/// ```text
/// #<depth>  <address> in <function> (<args>) at <filename>[:<line>]
/// ```
///
/// where the address part is only present with `show_address`. A frame
/// wider than the budget continues on a second line starting with the
/// `at` clause.
pub struct FrameRenderer<'a> {
    prefs: DisplayPrefs,
    lookup: &'a dyn SymbolLookup,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(prefs: DisplayPrefs, lookup: &'a dyn SymbolLookup) -> FrameRenderer<'a> {
        FrameRenderer { prefs, lookup }
    }

    pub fn prefs(&self) -> &DisplayPrefs {
        &self.prefs
    }

    pub fn render(&self, frame: &RawFrame) -> RenderedFrame {
        let show_address = self.prefs.show_address;

        let depth = Style::Depth.paint(format!("#{:<3}", frame.depth));
        let prefix = if show_address {
            let address = Style::Address.paint(format!("0x{:016x}", frame.address));
            format!("{}  {} in ", depth, address)
        } else {
            format!("{} ", depth)
        };

        let args = frame
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let call = format!(
            "{} {}",
            self.function_label(frame.function.as_ref()),
            Style::Brackets.paint(format!("({})", args))
        );

        let mut location = Style::Filename
            .paint(frame.filename.as_deref().unwrap_or("??"))
            .to_string();
        if let Some(line) = frame.line.filter(|&line| line > 0) {
            location.push_str(&Style::Line.paint(format!(":{}", line)).to_string());
        }

        let line = format!("{}{} at {}", prefix, call, location);
        if ansi::visible_len(&line) <= self.prefs.budget.width() {
            return RenderedFrame(line);
        }

        // Line up the continuation under the function name; with addresses
        // the ` in ` separator is compensated for.
        let mut shift = ansi::visible_len(&prefix).saturating_sub(1);
        if show_address {
            shift = shift.saturating_sub(3);
        }
        RenderedFrame(format!(
            "{}{}\n{} at {}",
            prefix,
            call,
            " ".repeat(shift),
            location
        ))
    }

    fn function_label(&self, function: Option<&FunctionRef>) -> String {
        match function {
            Some(FunctionRef::Symbolic(name)) => {
                if self.prefs.demangle {
                    Style::Function.paint(symbolize::demangle(name)).to_string()
                } else {
                    Style::Function.paint(name).to_string()
                }
            }
            Some(FunctionRef::AddressOnly(addr)) => {
                let (label, coloured) =
                    symbolize::resolve_label(*addr, self.lookup, self.prefs.demangle);
                if coloured {
                    Style::Function.paint(label).to_string()
                } else {
                    label
                }
            }
            None => Style::Function.paint("??").to_string(),
        }
    }
}

/// Renders `frame` with default preferences apart from the width budget and
/// whether addresses are shown.
pub fn render(
    frame: &RawFrame,
    budget: DisplayBudget,
    show_address: bool,
    lookup: &dyn SymbolLookup,
) -> RenderedFrame {
    let prefs = DisplayPrefs::default()
        .budget(budget)
        .show_address(show_address);
    FrameRenderer::new(prefs, lookup).render(frame)
}
