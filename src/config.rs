//! Display preferences supplied by the host.

/// Maximum number of visible characters on one physical output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayBudget(usize);

impl DisplayBudget {
    /// Width used when the host does not report one.
    pub const DEFAULT: DisplayBudget = DisplayBudget(160);

    /// A budget no frame ever exceeds.
    pub const UNLIMITED: DisplayBudget = DisplayBudget(usize::MAX);

    /// Returns `None` for a zero width.
    pub fn new(width: usize) -> Option<DisplayBudget> {
        if width == 0 {
            None
        } else {
            Some(DisplayBudget(width))
        }
    }

    pub fn width(self) -> usize {
        self.0
    }

    /// Reads the host's report of its line width.
    ///
    /// The report ends in the width, e.g.
    /// `Number of characters gdb thinks are in a line is 174.`, or in
    /// `unlimited.` when the host never wraps.
    pub fn from_width_report(report: &str) -> Option<DisplayBudget> {
        let last = report.trim().rsplit(char::is_whitespace).next()?;
        let last = last.trim_end_matches('.');
        if last == "unlimited" {
            return Some(DisplayBudget::UNLIMITED);
        }
        last.parse().ok().and_then(DisplayBudget::new)
    }
}

impl Default for DisplayBudget {
    fn default() -> DisplayBudget {
        DisplayBudget::DEFAULT
    }
}

/// How frames are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayPrefs {
    pub show_address: bool,
    pub budget: DisplayBudget,
    pub demangle: bool,
}

impl Default for DisplayPrefs {
    fn default() -> DisplayPrefs {
        DisplayPrefs {
            show_address: true,
            budget: DisplayBudget::DEFAULT,
            demangle: true,
        }
    }
}

impl DisplayPrefs {
    /// Alias for `DisplayPrefs::default`.
    pub fn new() -> DisplayPrefs {
        DisplayPrefs::default()
    }

    /// Controls whether each frame starts with its program counter.
    ///
    /// Defaults to `true`.
    pub fn show_address(mut self, show: bool) -> DisplayPrefs {
        self.show_address = show;
        self
    }

    /// Controls the width after which a frame is wrapped onto two lines.
    ///
    /// Defaults to [`DisplayBudget::DEFAULT`].
    pub fn budget(mut self, budget: DisplayBudget) -> DisplayPrefs {
        self.budget = budget;
        self
    }

    /// Controls whether mangled Rust (and C++) function names are demangled.
    ///
    /// Defaults to `true`.
    pub fn demangle(mut self, demangle: bool) -> DisplayPrefs {
        self.demangle = demangle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_rejected() {
        assert_eq!(DisplayBudget::new(0), None);
        assert_eq!(DisplayBudget::new(80).map(DisplayBudget::width), Some(80));
    }

    #[test]
    fn width_reports() {
        assert_eq!(
            DisplayBudget::from_width_report("Number of characters gdb thinks are in a line is 174.\n"),
            DisplayBudget::new(174)
        );
        assert_eq!(
            DisplayBudget::from_width_report("Number of characters gdb thinks are in a line is unlimited."),
            Some(DisplayBudget::UNLIMITED)
        );
        assert_eq!(DisplayBudget::from_width_report("is 0."), None);
        assert_eq!(DisplayBudget::from_width_report(""), None);
        assert_eq!(DisplayBudget::from_width_report("garbage"), None);
    }
}
