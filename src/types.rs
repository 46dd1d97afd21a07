//! Host facing frame types.
//!
//! A debugger hands frames over through [`FrameAttributes`]; the renderer
//! works on the owned [`RawFrame`] snapshot taken from it.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// What is known about the function of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionRef {
    /// The debugger knows the function by name.
    Symbolic(String),
    /// Only the function's address is known; the name has to be looked up
    /// through a [`SymbolLookup`](crate::SymbolLookup).
    AddressOnly(u64),
}

impl From<&str> for FunctionRef {
    fn from(name: &str) -> FunctionRef {
        FunctionRef::Symbolic(name.to_string())
    }
}

impl From<String> for FunctionRef {
    fn from(name: String) -> FunctionRef {
        FunctionRef::Symbolic(name)
    }
}

impl From<u64> for FunctionRef {
    fn from(addr: u64) -> FunctionRef {
        FunctionRef::AddressOnly(addr)
    }
}

/// One formal argument of a frame's function, with its printed value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    pub name: String,
    /// Printed form of the value. Empty when the debugger could not print
    /// anything, e.g. for some optimized out values.
    pub value: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Argument {
        Argument {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}={}", self.name, self.value)
        }
    }
}

/// A symbol declared in a lexical block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSymbol {
    pub name: String,
    /// Whether the symbol is a formal argument of the block's function.
    pub is_argument: bool,
    /// Printed value of the symbol, evaluated in the frame the block was
    /// obtained from.
    pub value: String,
}

impl From<BlockSymbol> for Argument {
    fn from(sym: BlockSymbol) -> Argument {
        Argument {
            name: sym.name,
            value: sym.value,
        }
    }
}

/// A lexical block of the debugged program.
///
/// Blocks nest: an inlined function or a `{ ... }` scope has a superblock,
/// and only the outermost blocks know the function they belong to.
pub trait LexicalBlock: Sized {
    /// The function this block is the body of, if any.
    fn function(&self) -> Option<&str>;

    /// The enclosing block.
    fn superblock(&self) -> Option<Self>;

    /// Symbols declared in this block, in declaration order.
    fn symbols(&self) -> Vec<BlockSymbol>;
}

/// Block type of hosts that never have block information.
#[derive(Debug)]
pub enum NoBlock {}

impl LexicalBlock for NoBlock {
    fn function(&self) -> Option<&str> {
        match *self {}
    }

    fn superblock(&self) -> Option<NoBlock> {
        match *self {}
    }

    fn symbols(&self) -> Vec<BlockSymbol> {
        match *self {}
    }
}

/// Per frame accessors of the host debugger.
pub trait FrameAttributes {
    type Block: LexicalBlock;

    /// Program counter of the frame.
    fn address(&self) -> u64;

    /// The frame's function, `None` when nothing at all is known about it.
    fn function(&self) -> Option<FunctionRef>;

    fn filename(&self) -> Option<Cow<'_, str>>;

    fn line(&self) -> Option<u32>;

    /// The innermost lexical block the frame is executing in.
    fn block(&self) -> Result<Self::Block>;

    /// Formal arguments of the frame's own function.
    ///
    /// Ascends from [`block`](FrameAttributes::block) to the nearest block
    /// that knows its function, so locals of nested or inlined scopes are
    /// never listed. A failing block lookup yields no arguments.
    fn arguments(&self) -> Vec<Argument> {
        let mut block = match self.block() {
            Ok(block) => Some(block),
            Err(e) => {
                log::debug!("no block for frame at {:#x}: {}", self.address(), e);
                None
            }
        };

        while let Some(b) = block {
            if b.function().is_some() {
                return b
                    .symbols()
                    .into_iter()
                    .filter(|sym| sym.is_argument)
                    .map(Argument::from)
                    .collect();
            }
            block = b.superblock();
        }

        Vec::new()
    }
}

/// Owned snapshot of one frame, as handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFrame {
    /// Position in the backtrace, innermost frame first.
    pub depth: usize,
    pub address: u64,
    pub function: Option<FunctionRef>,
    pub arguments: Vec<Argument>,
    pub filename: Option<String>,
    pub line: Option<u32>,
}

impl RawFrame {
    pub fn new(depth: usize, address: u64) -> RawFrame {
        RawFrame {
            depth,
            address,
            ..RawFrame::default()
        }
    }

    /// Reads every attribute of `frame` once.
    pub fn capture<F: FrameAttributes + ?Sized>(depth: usize, frame: &F) -> RawFrame {
        RawFrame {
            depth,
            address: frame.address(),
            function: frame.function(),
            arguments: frame.arguments(),
            filename: frame.filename().map(Cow::into_owned),
            line: frame.line(),
        }
    }

    pub fn with_function(mut self, function: impl Into<FunctionRef>) -> RawFrame {
        self.function = Some(function.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> RawFrame {
        self.arguments.push(Argument::new(name, value));
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> RawFrame {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> RawFrame {
        self.line = Some(line);
        self
    }
}

impl FrameAttributes for RawFrame {
    type Block = NoBlock;

    fn address(&self) -> u64 {
        self.address
    }

    fn function(&self) -> Option<FunctionRef> {
        self.function.clone()
    }

    fn filename(&self) -> Option<Cow<'_, str>> {
        self.filename.as_deref().map(Cow::Borrowed)
    }

    fn line(&self) -> Option<u32> {
        self.line
    }

    fn block(&self) -> Result<NoBlock> {
        Err(Error::NoBlock)
    }

    fn arguments(&self) -> Vec<Argument> {
        self.arguments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Block {
        function: Option<&'static str>,
        symbols: Vec<BlockSymbol>,
        parent: Option<Box<Block>>,
    }

    impl LexicalBlock for Block {
        fn function(&self) -> Option<&str> {
            self.function
        }

        fn superblock(&self) -> Option<Block> {
            self.parent.as_deref().cloned()
        }

        fn symbols(&self) -> Vec<BlockSymbol> {
            self.symbols.clone()
        }
    }

    struct Frame(Option<Block>);

    impl FrameAttributes for Frame {
        type Block = Block;

        fn address(&self) -> u64 {
            0x1000
        }

        fn function(&self) -> Option<FunctionRef> {
            Some("f".into())
        }

        fn filename(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn line(&self) -> Option<u32> {
            None
        }

        fn block(&self) -> Result<Block> {
            self.0.clone().ok_or_else(|| Error::Host("No symbol table is loaded.".into()))
        }
    }

    fn sym(name: &str, is_argument: bool, value: &str) -> BlockSymbol {
        BlockSymbol {
            name: name.to_string(),
            is_argument,
            value: value.to_string(),
        }
    }

    #[test]
    fn arguments_come_from_function_block() {
        let outer = Block {
            function: Some("f"),
            symbols: vec![sym("argc", true, "1"), sym("local", false, "3"), sym("argv", true, "0x7ffe")],
            parent: None,
        };
        let inner = Block {
            function: None,
            symbols: vec![sym("shadow", true, "9")],
            parent: Some(Box::new(outer)),
        };
        assert_eq!(
            Frame(Some(inner)).arguments(),
            vec![Argument::new("argc", "1"), Argument::new("argv", "0x7ffe")]
        );
    }

    #[test]
    fn no_function_block_means_no_arguments() {
        let orphan = Block {
            function: None,
            symbols: vec![sym("x", true, "1")],
            parent: None,
        };
        assert!(Frame(Some(orphan)).arguments().is_empty());
    }

    #[test]
    fn failing_block_lookup_means_no_arguments() {
        assert!(Frame(None).arguments().is_empty());
    }

    #[test]
    fn argument_display() {
        assert_eq!(Argument::new("sig", "6").to_string(), "sig=6");
        assert_eq!(Argument::new("this", "").to_string(), "this");
    }

    #[test]
    fn capture_raw_frame() {
        let frame = RawFrame::new(7, 0xdead)
            .with_function("raise")
            .with_argument("sig", "6")
            .with_filename("raise.c")
            .with_line(50);
        assert_eq!(RawFrame::capture(2, &frame), RawFrame { depth: 2, ..frame });
    }
}
