//! Frames of the running process, acquired through the `backtrace` crate.

use crate::backtrace::Drain;
use crate::config::DisplayPrefs;
use crate::error::{Error, Result};
use crate::filter::ColourFilter;
use crate::symbolize::Unresolved;
use crate::types::{Argument, FrameAttributes, FunctionRef, NoBlock};
use ::backtrace::{Backtrace, BacktraceFrame, BacktraceSymbol};
use std::borrow::Cow;
use std::io::Write;

/// A resolved frame of a [`Backtrace`], seen through [`FrameAttributes`].
///
/// Only the first symbol of the frame is used; inlined callers are not
/// listed separately.
#[derive(Debug, Clone, Copy)]
pub struct CapturedFrame<'a> {
    frame: &'a BacktraceFrame,
}

impl<'a> CapturedFrame<'a> {
    pub fn new(frame: &'a BacktraceFrame) -> CapturedFrame<'a> {
        CapturedFrame { frame }
    }

    fn symbol(&self) -> Option<&'a BacktraceSymbol> {
        self.frame.symbols().first()
    }
}

impl FrameAttributes for CapturedFrame<'_> {
    type Block = NoBlock;

    fn address(&self) -> u64 {
        self.frame.ip() as usize as u64
    }

    fn function(&self) -> Option<FunctionRef> {
        match self.symbol().and_then(BacktraceSymbol::name) {
            Some(name) => Some(FunctionRef::Symbolic(format!("{:#}", name))),
            None => Some(FunctionRef::AddressOnly(
                self.frame.symbol_address() as usize as u64,
            )),
        }
    }

    fn filename(&self) -> Option<Cow<'_, str>> {
        self.symbol()?.filename().map(|path| path.to_string_lossy())
    }

    fn line(&self) -> Option<u32> {
        self.symbol()?.lineno()
    }

    fn block(&self) -> Result<NoBlock> {
        Err(Error::NoBlock)
    }

    // Argument values are not available without a debugger.
    fn arguments(&self) -> Vec<Argument> {
        Vec::new()
    }
}

/// Captures the current thread's stack and writes it to `out`, returning the
/// number of frames written.
pub fn print_current<W: Write>(prefs: DisplayPrefs, out: W) -> Result<usize> {
    let backtrace = Backtrace::new();
    let frames = backtrace.frames().iter().map(CapturedFrame::new);
    let mut emitter = ColourFilter::default()
        .prefs(prefs)
        .filter(frames, &Unresolved, out);
    match emitter.unroll()? {
        Drain::Emitted(n) => Ok(n),
        Drain::Finished => Ok(0),
    }
}
