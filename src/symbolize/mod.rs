//! Turning bare code addresses into `function + offset` labels.
//!
//! Debuggers sometimes know a frame's function only by address. The host
//! can still describe which symbol contains that address with a line such as
//!
//! ```text
//! raise + 272 in section .text of /usr/lib/libc.so.6
//! ```
//!
//! and this module condenses that into the label `raise 0x110`.

use core::str::FromStr;
use std::borrow::Cow;

const SECTION_MARKER: &str = "in section";
const MODULE_MARKER: &str = " of ";

/// The host's "which symbol contains this address" facility.
pub trait SymbolLookup {
    /// Free text description of the symbol containing `addr`, in the form
    /// `<name> [+ <offset>] in section <section> [of <module>]`.
    fn info_symbol(&self, addr: u64) -> String;
}

impl<F: Fn(u64) -> String> SymbolLookup for F {
    fn info_symbol(&self, addr: u64) -> String {
        self(addr)
    }
}

/// A lookup for hosts that cannot describe addresses at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolved;

impl SymbolLookup for Unresolved {
    fn info_symbol(&self, _addr: u64) -> String {
        "??".to_string()
    }
}

/// A parsed symbol description, see [`SymbolLookup::info_symbol`].
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SymbolInfo {
    /// Everything in front of the offset, or the whole head when the offset
    /// is missing or unparseable.
    pub name: String,
    /// Byte offset of the address into the symbol.
    pub offset: Option<u64>,
    pub section: String,
    /// Object file holding the section; absent for the main executable.
    pub module: Option<String>,
}

impl FromStr for SymbolInfo {
    type Err = &'static str;

    // Format: name [+ offset] in section section [of module]
    // e.g.: "raise + 272 in section .text of /usr/lib/libc.so.6"
    // e.g.: "main in section .text"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let idx = s.find(SECTION_MARKER).ok_or("Couldn't find section marker")?;
        let head = s[..idx].trim();
        let rest = s[idx + SECTION_MARKER.len()..].trim();

        let (section, module) = match rest.find(MODULE_MARKER) {
            Some(i) => (&rest[..i], Some(rest[i + MODULE_MARKER.len()..].trim())),
            None => (rest, None),
        };
        let (name, offset) = match split_offset(head) {
            Some((name, offset)) => (name, Some(offset)),
            None => (head, None),
        };

        Ok(SymbolInfo {
            name: name.to_string(),
            offset,
            section: section.trim().to_string(),
            module: module.map(str::to_string),
        })
    }
}

/// Splits `raise + 272` into `("raise", 272)` at the last whitespace.
fn split_offset(head: &str) -> Option<(&str, u64)> {
    let idx = head.rfind(char::is_whitespace)?;
    let (name, tail) = head.split_at(idx);
    let offset = tail.trim_start().parse::<u64>().ok()?;
    Some((name.trim_end().trim_end_matches('+').trim_end(), offset))
}

/// Produces the function label of a frame known only by `addr`.
///
/// Returns the label together with whether it should be coloured, which is
/// only the case when both a name and an offset could be read from the
/// host's description. Anything less falls back to the trimmed text, left
/// uncoloured.
pub fn resolve_by_address(addr: u64, lookup: &dyn SymbolLookup) -> (String, bool) {
    resolve_label(addr, lookup, false)
}

pub(crate) fn resolve_label(
    addr: u64,
    lookup: &dyn SymbolLookup,
    demangle_names: bool,
) -> (String, bool) {
    let text = lookup.info_symbol(addr);
    let info = match text.parse::<SymbolInfo>() {
        Ok(info) => info,
        Err(_) => return (text.trim().to_string(), false),
    };

    let name = if demangle_names {
        demangle(&info.name)
    } else {
        Cow::Borrowed(info.name.as_str())
    };
    match info.offset {
        Some(offset) => (format!("{} {:#x}", name, offset), true),
        None => (name.into_owned(), false),
    }
}

/// Demangles Rust symbols (and C++ ones with the `cpp_demangle` feature),
/// returning anything else untouched.
pub fn demangle(name: &str) -> Cow<'_, str> {
    if let Ok(sym) = rustc_demangle::try_demangle(name) {
        return Cow::Owned(format!("{:#}", sym));
    }

    #[cfg(feature = "cpp_demangle")]
    {
        if name.starts_with("_Z") {
            if let Ok(sym) = cpp_demangle::Symbol::new(name) {
                return Cow::Owned(sym.to_string());
            }
        }
    }

    Cow::Borrowed(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(text: &'static str) -> impl Fn(u64) -> String {
        move |_| text.to_string()
    }

    #[test]
    fn check_symbol_info_parsing() {
        assert_eq!(
            "raise + 272 in section .text of /usr/lib/libc.so.6\n"
                .parse::<SymbolInfo>()
                .unwrap(),
            SymbolInfo {
                name: "raise".into(),
                offset: Some(272),
                section: ".text".into(),
                module: Some("/usr/lib/libc.so.6".into()),
            }
        );
        assert_eq!(
            "main in section .text".parse::<SymbolInfo>().unwrap(),
            SymbolInfo {
                name: "main".into(),
                offset: None,
                section: ".text".into(),
                module: None,
            }
        );
        assert!("No symbol matches 0x1234.".parse::<SymbolInfo>().is_err());
    }

    #[test]
    fn offset_becomes_hex() {
        let text = lookup("raise + 272 in section .text of /usr/lib/libc.so.6");
        assert_eq!(resolve_by_address(0, &text), ("raise 0x110".to_string(), true));
    }

    #[test]
    fn missing_marker_is_uncoloured() {
        assert_eq!(resolve_by_address(0, &Unresolved), ("??".to_string(), false));
        let text = lookup("No symbol matches 0x1234.\n");
        assert_eq!(
            resolve_by_address(0x1234, &text),
            ("No symbol matches 0x1234.".to_string(), false)
        );
    }

    #[test]
    fn bad_offset_keeps_name_only_text() {
        let text = lookup("weird_symbol + notanumber in section .text of lib");
        assert_eq!(
            resolve_by_address(0, &text),
            ("weird_symbol + notanumber".to_string(), false)
        );
    }

    #[test]
    fn no_offset_is_uncoloured() {
        let text = lookup("main in section .text");
        assert_eq!(resolve_by_address(0, &text), ("main".to_string(), false));
    }

    #[test]
    fn demangles_resolved_names() {
        let text = lookup("_ZN4core9panicking5panic17h5d6d7b5f2a3c9e1bE + 16 in section .text of app");
        assert_eq!(
            resolve_label(0, &text, true),
            ("core::panicking::panic 0x10".to_string(), true)
        );
    }

    #[test]
    fn demangle_leaves_c_names_alone() {
        assert_eq!(demangle("raise"), "raise");
        assert_eq!(demangle("_ZN3foo3barE"), "foo::bar");
    }
}
