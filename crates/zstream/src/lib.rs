#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `zstream` exposes a streaming zlib compression engine over
//! externally-allocated byte buffers. Callers describe the readable and
//! writable regions of their own memory with [`ByteView`]s — a base buffer
//! plus a position and a limit — and the bridge translates those regions into
//! the flat input/output arguments of the stateful engine, writing the
//! engine's progress back by advancing the view positions. Stream lifetime
//! (open → work → finish → reset/close) is managed so that no engine resource
//! leaks and no call can corrupt another stream's state.
//!
//! # Design
//!
//! Two surfaces share one engine wrapper built on
//! [`flate2`](https://docs.rs/flate2):
//!
//! - [`StreamTable`] keeps an arena of owned engine streams addressed by
//!   generation-checked [`StreamHandle`]s. Handles convert to and from plain
//!   `u64` tokens for callers that can only hold an integer; stale, foreign,
//!   and null tokens are rejected with a typed error instead of touching
//!   freed state.
//! - [`Deflater`] and [`Inflater`] are owned per-stream sessions for direct
//!   Rust callers, with a finish latch on the compression side and RAII
//!   teardown.
//!
//! The zlib backend is chosen at compile time: miniz_oxide by default, with
//! the `zlib-ng` and `zlib-rs` cargo features switching to SIMD-accelerated
//! backends. [`backend`] reports the active choice, which is also logged once
//! per process on first open.
//!
//! # Invariants
//!
//! - The bridge never allocates, moves, or resizes caller buffers; all output
//!   lands in the regions the caller staged.
//! - `position <= limit` holds on every view before and after every call, and
//!   only positions are ever mutated.
//! - After any `work` call, positions have moved monotonically forward by
//!   exactly the bytes the engine consumed and produced.
//! - Closing a handle is idempotent and infallible, including for the null
//!   handle and for handles already closed.
//! - A stream's direction is fixed at open; calls supplying a mismatched
//!   direction are rejected without touching the engine.
//!
//! # Errors
//!
//! Fallible operations return [`StreamError`]: stale-handle and
//! direction-mismatch rejections, handle-space exhaustion at open, and
//! processing failures wrapping the engine's own error values. View
//! construction returns [`ViewError`] when a region would break the
//! position/limit invariant. All errors surface synchronously at the call
//! site; nothing is retried or deferred internally.
//!
//! # Concurrency
//!
//! No internal locking. Every operation takes `&mut self`, making the
//! single-threaded-per-table (and per-session) contract a compile-time
//! property. Independent tables and sessions may be driven concurrently; the
//! only process-wide state is the one-time backend log behind a safe
//! [`Once`](std::sync::Once).
//!
//! # Examples
//!
//! Round-trip a payload through the handle table with undersized working
//! buffers:
//!
//! ```
//! use zstream::{ByteView, Direction, StreamTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = b"caller-owned buffers all the way down";
//! let mut table = StreamTable::new();
//!
//! let deflate = table.open(Direction::Deflate)?;
//! let mut input = payload.to_vec();
//! let mut compressed = vec![0u8; 128];
//! let compressed_len = {
//!     let mut in_view = ByteView::new(&mut input);
//!     let mut out_view = ByteView::new(&mut compressed);
//!     while !table.work(Direction::Deflate, deflate, Some(&mut in_view), &mut out_view, true)? {}
//!     out_view.position()
//! };
//! table.close(deflate);
//!
//! let inflate = table.open(Direction::Inflate)?;
//! let mut decompressed = vec![0u8; payload.len() + 32];
//! let produced = {
//!     let mut in_view = ByteView::with_region(&mut compressed, 0, compressed_len)?;
//!     let mut out_view = ByteView::new(&mut decompressed);
//!     while !table.work(Direction::Inflate, inflate, Some(&mut in_view), &mut out_view, false)? {}
//!     out_view.position()
//! };
//! table.close(inflate);
//!
//! assert_eq!(&decompressed[..produced], &payload[..]);
//! # Ok(())
//! # }
//! ```
//!
//! The session layer offers the same protocol without handles:
//!
//! ```
//! use zstream::{ByteView, Deflater};
//!
//! # fn main() -> Result<(), zstream::StreamError> {
//! let mut deflater = Deflater::new();
//! let mut input = *b"session layer";
//! let mut compressed = [0u8; 64];
//! let mut in_view = ByteView::new(&mut input);
//! let mut out_view = ByteView::new(&mut compressed);
//! deflater.finish();
//! while !deflater.finished() {
//!     deflater.deflate(Some(&mut in_view), &mut out_view)?;
//! }
//! assert!(out_view.position() > 0);
//! # Ok(())
//! # }
//! ```
//!
//! # See also
//!
//! - [`table`] for the handle arena and the raw `open`/`work`/`reset`/`close`
//!   surface.
//! - [`session`] for the owned `Deflater`/`Inflater` objects.
//! - [`view`] for the buffer-region abstraction and its invariants.

pub mod direction;
mod engine;
pub mod error;
pub mod session;
pub mod table;
pub mod view;

pub use direction::{Direction, DirectionParseError};
pub use engine::backend;
pub use error::StreamError;
pub use session::{Deflater, Inflater};
pub use table::{StreamHandle, StreamTable};
pub use view::{ByteView, ViewError};
