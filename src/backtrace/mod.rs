use crate::error::Result;
use crate::format::FrameRenderer;
use crate::types::{FrameAttributes, RawFrame};
use core::mem;
use std::io::Write;

/// Outcome of [`BacktraceEmitter::unroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drain {
    /// This call rendered and wrote the given number of frames.
    Emitted(usize),
    /// The frames were already emitted by an earlier call; nothing was
    /// written.
    Finished,
}

enum State<I> {
    Pending(I),
    Drained,
}

/// Renders a whole backtrace exactly once.
///
/// The emitter owns the host's frame sequence. The first call to
/// [`unroll`](BacktraceEmitter::unroll) (or to `next` through the `Iterator`
/// impl) numbers the frames from zero, innermost first, renders each one and
/// writes them newline separated to the output with a single write. Every
/// later call does nothing.
///
/// # Example
///
/// ```
/// use colour_filter::{BacktraceEmitter, DisplayPrefs, Drain, FrameRenderer, RawFrame, Unresolved};
///
/// let frames = vec![
///     RawFrame::new(0, 0x401136).with_function("main").with_filename("main.c").with_line(3),
/// ];
/// let renderer = FrameRenderer::new(DisplayPrefs::new().show_address(false), &Unresolved);
/// let mut out = Vec::new();
/// let mut emitter = BacktraceEmitter::new(frames, renderer, &mut out);
///
/// assert_eq!(emitter.unroll().unwrap(), Drain::Emitted(1));
/// assert_eq!(emitter.unroll().unwrap(), Drain::Finished);
/// ```
pub struct BacktraceEmitter<'a, I, W> {
    state: State<I>,
    renderer: FrameRenderer<'a>,
    out: W,
}

impl<'a, I, W> BacktraceEmitter<'a, I, W>
where
    I: Iterator,
    I::Item: FrameAttributes,
    W: Write,
{
    pub fn new<F>(frames: F, renderer: FrameRenderer<'a>, out: W) -> BacktraceEmitter<'a, I, W>
    where
        F: IntoIterator<IntoIter = I>,
    {
        BacktraceEmitter {
            state: State::Pending(frames.into_iter()),
            renderer,
            out,
        }
    }

    /// Whether the frames have already been consumed.
    pub fn is_drained(&self) -> bool {
        match self.state {
            State::Pending(_) => false,
            State::Drained => true,
        }
    }

    /// Renders and writes all frames on the first call.
    ///
    /// The frames count as consumed even when writing them fails.
    pub fn unroll(&mut self) -> Result<Drain> {
        let frames = match mem::replace(&mut self.state, State::Drained) {
            State::Pending(frames) => frames,
            State::Drained => {
                log::trace!("backtrace already emitted, nothing to do");
                return Ok(Drain::Finished);
            }
        };

        let rendered = frames
            .enumerate()
            .map(|(depth, frame)| {
                self.renderer
                    .render(&RawFrame::capture(depth, &frame))
                    .into_string()
            })
            .collect::<Vec<_>>();

        let mut text = rendered.join("\n");
        text.push('\n');
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;

        log::debug!("emitted backtrace of {} frames", rendered.len());
        Ok(Drain::Emitted(rendered.len()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The host's iteration protocol: the first `next` prints the whole
/// backtrace, and no frame is ever handed back for the host to print.
impl<'a, I, W> Iterator for BacktraceEmitter<'a, I, W>
where
    I: Iterator,
    I::Item: FrameAttributes,
    W: Write,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Err(e) = self.unroll() {
            log::warn!("{}", e);
        }
        None
    }
}
