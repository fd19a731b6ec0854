//! Direction-dispatched wrapper around the flate2 streaming engine.
//!
//! The bridge treats the compressor as an external component: this module
//! owns one [`flate2::Compress`] or [`flate2::Decompress`] per stream, feeds
//! it flat input/output regions, and reports progress as consumed/produced
//! byte counts derived from the engine's running totals. Flush selection
//! mirrors classic zlib usage: inflate always runs with sync-flush so every
//! call returns as much output as fits, deflate runs with no-flush until the
//! caller signals the final chunk.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::direction::Direction;
use crate::error::StreamError;
use crate::view::ByteView;

/// Returns the name of the zlib backend compiled into this build.
///
/// Backend selection happens at compile time through the `zlib-ng` and
/// `zlib-rs` cargo features; without either the pure-Rust miniz_oxide
/// backend is used.
#[must_use]
pub fn backend() -> &'static str {
    if cfg!(feature = "zlib-ng") {
        "zlib-ng"
    } else if cfg!(feature = "zlib-rs") {
        "zlib-rs"
    } else {
        "miniz_oxide"
    }
}

/// Progress made by a single engine invocation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Run {
    /// Bytes read from the input region.
    pub(crate) consumed: usize,
    /// Bytes written to the output region.
    pub(crate) produced: usize,
    /// Whether the stream reached its end marker (inflate) or emitted its
    /// final block (deflate).
    pub(crate) ended: bool,
}

/// One stateful compression or decompression engine.
#[derive(Debug)]
pub(crate) struct Engine {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Deflate(Compress),
    Inflate(Decompress),
}

impl Engine {
    /// Allocates a fresh engine for the requested direction.
    ///
    /// Compression uses the engine's default level; no level, dictionary, or
    /// window-size knob is exposed. Streams carry the standard zlib wrapper.
    pub(crate) fn new(direction: Direction) -> Self {
        let inner = match direction {
            Direction::Deflate => Inner::Deflate(Compress::new(Compression::default(), true)),
            Direction::Inflate => Inner::Inflate(Decompress::new(true)),
        };
        Self { inner }
    }

    /// Returns the direction this engine was created for.
    pub(crate) fn direction(&self) -> Direction {
        match self.inner {
            Inner::Deflate(_) => Direction::Deflate,
            Inner::Inflate(_) => Direction::Inflate,
        }
    }

    /// Advances the stream over the given regions.
    ///
    /// `finish` only affects deflate, where it switches to finalize-flush;
    /// inflate always requests sync-flush and ignores the flag. Returns the
    /// progress made, with `ended` set once the stream is complete. `Ok` and
    /// `BufError` statuses both mean "call again with more input or output
    /// room"; any engine error is surfaced as [`StreamError`].
    pub(crate) fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        finish: bool,
    ) -> Result<Run, StreamError> {
        let before_in = self.total_in();
        let before_out = self.total_out();
        let status = match &mut self.inner {
            Inner::Deflate(engine) => {
                let flush = if finish {
                    FlushCompress::Finish
                } else {
                    FlushCompress::None
                };
                engine.compress(input, output, flush)?
            }
            Inner::Inflate(engine) => engine.decompress(input, output, FlushDecompress::Sync)?,
        };
        // The totals advance by at most the lengths of the regions handed in,
        // so the deltas always fit in usize.
        let consumed = (self.total_in() - before_in) as usize;
        let produced = (self.total_out() - before_out) as usize;
        let ended = match status {
            Status::StreamEnd => true,
            Status::Ok | Status::BufError => false,
        };
        Ok(Run {
            consumed,
            produced,
            ended,
        })
    }

    /// Advances the stream over caller-owned views, writing the engine's
    /// progress back into their positions.
    ///
    /// This is the view half of the bridge protocol: the input region is
    /// `input[position..limit]` when a view is present and the empty slice on
    /// a drain call, the output region is always `output[position..limit]`,
    /// and after the call each present view's position has moved by exactly
    /// the bytes the engine consumed or produced. Limits are never modified.
    pub(crate) fn run_views(
        &mut self,
        mut input: Option<&mut ByteView<'_>>,
        output: &mut ByteView<'_>,
        finish: bool,
    ) -> Result<Run, StreamError> {
        let run = {
            let in_bytes: &[u8] = match &input {
                Some(view) => view.remaining_slice(),
                None => &[],
            };
            self.run(in_bytes, output.remaining_slice_mut(), finish)?
        };
        if let Some(view) = input.as_deref_mut() {
            view.advance(run.consumed);
        }
        output.advance(run.produced);
        Ok(run)
    }

    /// Reinitialises the engine's internal state (history window, pending
    /// bits) while keeping the allocation, ready for a new independent
    /// stream.
    pub(crate) fn reset(&mut self) {
        match &mut self.inner {
            Inner::Deflate(engine) => engine.reset(),
            Inner::Inflate(engine) => engine.reset(true),
        }
    }

    fn total_in(&self) -> u64 {
        match &self.inner {
            Inner::Deflate(engine) => engine.total_in(),
            Inner::Inflate(engine) => engine.total_in(),
        }
    }

    fn total_out(&self) -> u64 {
        match &self.inner {
            Inner::Deflate(engine) => engine.total_out(),
            Inner::Inflate(engine) => engine.total_out(),
        }
    }
}
