//! Owned per-stream session objects layered over the engine wrapper.
//!
//! Where the [`table`](crate::table) module serves callers that address
//! streams through integer tokens, [`Deflater`] and [`Inflater`] serve Rust
//! callers directly: each session owns its engine, tracks whether the stream
//! has completed, and tears the engine down on drop. A `Deflater`
//! additionally carries a finish latch — once [`Deflater::finish`] is called,
//! every following [`Deflater::deflate`] call runs with finalize-flush until
//! the trailing blocks are out and [`Deflater::finished`] turns true.

use tracing::trace;

use crate::direction::Direction;
use crate::engine::Engine;
use crate::error::StreamError;
use crate::view::ByteView;

/// A compression session over caller-owned buffers.
pub struct Deflater {
    engine: Engine,
    finish: bool,
    finished: bool,
}

impl Deflater {
    /// Opens a fresh compression session at the engine's default level.
    #[must_use]
    pub fn new() -> Self {
        trace!("deflater opened");
        Self {
            engine: Engine::new(Direction::Deflate),
            finish: false,
            finished: false,
        }
    }

    /// Marks the current input as the last input. From the next
    /// [`deflate`](Deflater::deflate) call on, the engine flushes and emits
    /// its trailing blocks. Cleared by [`reset`](Deflater::reset).
    pub fn finish(&mut self) {
        self.finish = true;
    }

    /// Returns `true` once the final block has been written and the engine's
    /// internal buffers are clear.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Compresses more data from `input` into `output`, advancing both
    /// positions. `input` may be omitted mid-flush when no fresh input is
    /// available.
    ///
    /// # Errors
    ///
    /// Surfaces the engine's processing error; the session should then be
    /// dropped or reset.
    pub fn deflate(
        &mut self,
        input: Option<&mut ByteView<'_>>,
        output: &mut ByteView<'_>,
    ) -> Result<(), StreamError> {
        let run = self.engine.run_views(input, output, self.finish)?;
        self.finished = self.finished || run.ended;
        Ok(())
    }

    /// Returns the session to a fresh state for a new independent stream,
    /// keeping the engine allocation.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.finish = false;
        self.finished = false;
        trace!("deflater reset");
    }
}

impl Default for Deflater {
    fn default() -> Self {
        Self::new()
    }
}

/// A decompression session over caller-owned buffers.
pub struct Inflater {
    engine: Engine,
    finished: bool,
}

impl Inflater {
    /// Opens a fresh decompression session.
    #[must_use]
    pub fn new() -> Self {
        trace!("inflater opened");
        Self {
            engine: Engine::new(Direction::Inflate),
            finished: false,
        }
    }

    /// Returns `true` once the stream's end marker has been reached and all
    /// output has been handed out.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Decompresses more data from `input` into `output`, advancing both
    /// positions. `input` may be omitted to drain output still pending inside
    /// the engine. Each call returns as much output as fits; there is no
    /// finish signal on the decompression side.
    ///
    /// # Errors
    ///
    /// Surfaces the engine's processing error, typically caused by a corrupt
    /// compressed stream.
    pub fn inflate(
        &mut self,
        input: Option<&mut ByteView<'_>>,
        output: &mut ByteView<'_>,
    ) -> Result<(), StreamError> {
        let run = self.engine.run_views(input, output, false)?;
        self.finished = self.finished || run.ended;
        Ok(())
    }

    /// Returns the session to a fresh state for a new independent stream,
    /// keeping the engine allocation.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.finished = false;
        trace!("inflater reset");
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_latch_completes_an_empty_stream() {
        let mut deflater = Deflater::new();
        deflater.finish();
        let mut buf = [0u8; 64];
        let mut out = ByteView::new(&mut buf);
        deflater.deflate(None, &mut out).expect("flush");
        assert!(deflater.finished());
        assert!(out.position() > 0, "empty stream still carries framing");
    }

    #[test]
    fn reset_clears_the_finish_latch() {
        let mut deflater = Deflater::new();
        deflater.finish();
        let mut buf = [0u8; 64];
        deflater
            .deflate(None, &mut ByteView::new(&mut buf))
            .expect("flush");
        assert!(deflater.finished());
        deflater.reset();
        assert!(!deflater.finished());

        // After reset the session accepts a new stream without finishing it.
        let mut input = *b"fresh stream";
        let mut out = [0u8; 64];
        let mut in_view = ByteView::new(&mut input);
        deflater
            .deflate(Some(&mut in_view), &mut ByteView::new(&mut out))
            .expect("deflate");
        assert!(!deflater.finished());
        assert_eq!(in_view.position(), in_view.limit());
    }

    #[test]
    fn inflater_reports_corrupt_streams() {
        let mut inflater = Inflater::new();
        let mut garbage = [0xFFu8; 16];
        let mut out = [0u8; 64];
        let mut in_view = ByteView::new(&mut garbage);
        let err = inflater.inflate(Some(&mut in_view), &mut ByteView::new(&mut out));
        assert!(matches!(err, Err(StreamError::Inflate(_))));
    }
}
