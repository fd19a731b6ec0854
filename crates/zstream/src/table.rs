//! Handle table owning the engine streams behind opaque caller tokens.
//!
//! A [`StreamTable`] is an arena of engine streams addressed by
//! generation-checked indices. Callers hold a [`StreamHandle`] — convertible
//! to and from a plain `u64` for runtimes that can only carry an integer —
//! and pass it back on every call. Use of a closed, foreign, or null handle
//! is rejected with a typed error instead of reaching freed memory: the
//! generation stored in the slot must match the generation baked into the
//! handle, and both change when a slot is recycled.
//!
//! The table performs no internal locking. `&mut self` on every operation
//! makes the single-threaded-per-table contract a compile-time property;
//! independent tables are fully isolated from each other.

use core::fmt;
use std::sync::Once;

use tracing::{debug, info, trace};

use crate::direction::Direction;
use crate::engine::{Engine, backend};
use crate::error::StreamError;
use crate::view::ByteView;

static BACKEND_LOG: Once = Once::new();

/// Opaque token referencing one live engine stream in a [`StreamTable`].
///
/// The raw form packs the slot index into the low 32 bits and the slot
/// generation into the high 32 bits. Raw value `0` is the reserved
/// [`StreamHandle::NULL`] and never resolves to a stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct StreamHandle {
    index: u32,
    generation: u32,
}

impl StreamHandle {
    /// The null handle. Closing it is a no-op; any other use is rejected as
    /// stale.
    pub const NULL: Self = Self {
        index: 0,
        generation: 0,
    };

    /// Packs the handle into an integer token for callers that cannot hold a
    /// structured value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        (self.generation as u64) << 32 | self.index as u64
    }

    /// Rebuilds a handle from its integer token. The result is only as valid
    /// as the token: a stale or fabricated value is rejected at first use.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            index: raw as u32,
            generation: (raw >> 32) as u32,
        }
    }
}

impl fmt::Display for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.index, self.generation)
    }
}

struct Slot {
    /// Bumped every time the slot's stream is torn down. Starts at 1 so the
    /// null handle's generation 0 can never match a live slot.
    generation: u32,
    stream: Option<Engine>,
}

/// Arena of owned engine streams addressed by [`StreamHandle`]s.
///
/// See the [crate docs](crate) for the lifecycle contract. All operations are
/// synchronous and CPU-bound; no call blocks or retries internally.
#[derive(Default)]
pub struct StreamTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl StreamTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of currently open streams.
    #[must_use]
    pub fn live_streams(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.stream.is_some())
            .count()
    }

    /// Opens a stream for the given direction and returns its handle.
    ///
    /// Compression streams use the engine's default level; decompression
    /// takes no parameters. The handle stays valid until [`close`], and may
    /// be recycled for a fresh stream via [`reset`].
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::HandleSpaceExhausted`] when no slot index is
    /// left to allocate.
    ///
    /// [`close`]: StreamTable::close
    /// [`reset`]: StreamTable::reset
    pub fn open(&mut self, direction: Direction) -> Result<StreamHandle, StreamError> {
        BACKEND_LOG.call_once(|| {
            info!(backend = backend(), "zlib backend selected");
        });
        let engine = Engine::new(direction);
        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.stream = Some(engine);
            StreamHandle {
                index,
                generation: slot.generation,
            }
        } else {
            if self.slots.len() >= u32::MAX as usize {
                return Err(StreamError::HandleSpaceExhausted);
            }
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                stream: Some(engine),
            });
            StreamHandle {
                index,
                generation: 1,
            }
        };
        trace!(handle = %handle, direction = %direction, "stream opened");
        Ok(handle)
    }

    /// Advances a stream over the caller's buffer regions.
    ///
    /// `input` may be omitted to drain output pending inside the engine, for
    /// example on the finishing calls of a decompression stream. `output` is
    /// mandatory. Both views have their position advanced by the bytes the
    /// engine consumed/produced; limits are never touched. `finish` signals
    /// the final chunk of a compression stream and is ignored for
    /// decompression.
    ///
    /// Returns `Ok(true)` once the stream is complete and `Ok(false)` while
    /// the engine needs more input or more output room.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::StaleHandle`] for closed, foreign, or null
    /// handles, [`StreamError::DirectionMismatch`] when `direction` disagrees
    /// with the stream, and a processing error when the engine rejects its
    /// state or input. After a processing error the stream is left as-is and
    /// should be closed.
    pub fn work(
        &mut self,
        direction: Direction,
        handle: StreamHandle,
        input: Option<&mut ByteView<'_>>,
        output: &mut ByteView<'_>,
        finish: bool,
    ) -> Result<bool, StreamError> {
        let engine = self.resolve(handle)?;
        check_direction(direction, engine.direction())?;
        let run = engine.run_views(input, output, finish)?;
        debug!(
            handle = %handle,
            consumed = run.consumed,
            produced = run.produced,
            ended = run.ended,
            "stream advanced"
        );
        Ok(run.ended)
    }

    /// Reinitialises a stream for reuse, keeping its allocation and handle.
    ///
    /// The engine's reset cannot fail; a trace event records each reset so
    /// resets stay observable.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::StaleHandle`] or
    /// [`StreamError::DirectionMismatch`] under the same rules as
    /// [`work`](StreamTable::work).
    pub fn reset(&mut self, direction: Direction, handle: StreamHandle) -> Result<(), StreamError> {
        let engine = self.resolve(handle)?;
        check_direction(direction, engine.direction())?;
        engine.reset();
        trace!(handle = %handle, "stream reset");
        Ok(())
    }

    /// Tears down a stream and releases its slot.
    ///
    /// Idempotent: closing the null handle, a stale handle, or the same
    /// handle twice is a safe no-op. After this call the handle must not be
    /// used again; the slot's generation changes so later uses are rejected.
    pub fn close(&mut self, handle: StreamHandle) {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return;
        };
        if slot.generation != handle.generation || slot.stream.is_none() {
            return;
        }
        slot.stream = None;
        // A slot whose generation counter is spent is retired, not recycled.
        if slot.generation < u32::MAX {
            slot.generation += 1;
            self.free.push(handle.index);
        }
        trace!(handle = %handle, "stream closed");
    }

    fn resolve(&mut self, handle: StreamHandle) -> Result<&mut Engine, StreamError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or(StreamError::StaleHandle(handle))?;
        if slot.generation != handle.generation {
            return Err(StreamError::StaleHandle(handle));
        }
        slot.stream
            .as_mut()
            .ok_or(StreamError::StaleHandle(handle))
    }
}

fn check_direction(requested: Direction, actual: Direction) -> Result<(), StreamError> {
    if requested != actual {
        return Err(StreamError::DirectionMismatch { requested, actual });
    }
    Ok(())
}
