//! Error taxonomy shared by the handle table and the session layer.

use flate2::{CompressError, DecompressError};
use thiserror::Error;

use crate::direction::Direction;
use crate::table::StreamHandle;

/// Errors raised by stream operations.
///
/// All errors surface synchronously at the call site; the bridge never
/// retries, defers, or batches failures. After a processing error the stream
/// is left in an undefined state and should be closed by the caller.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The handle index space is exhausted and no stream can be allocated.
    ///
    /// This is the allocation-failure channel of `open`: engine construction
    /// itself cannot fail, so running out of handle slots is the only
    /// non-recoverable allocation condition left.
    #[error("cannot open stream: handle space exhausted")]
    HandleSpaceExhausted,
    /// The handle is null, was already closed, or belongs to another table.
    #[error("stale stream handle {0}")]
    StaleHandle(StreamHandle),
    /// The direction supplied with the call disagrees with the direction the
    /// stream was opened with.
    #[error("stream opened as {actual} but the call requested {requested}")]
    DirectionMismatch {
        /// Direction supplied by the caller on this call.
        requested: Direction,
        /// Direction the stream was opened with.
        actual: Direction,
    },
    /// The compression engine rejected the current input or internal state.
    #[error("deflate engine failed to process input: {0}")]
    Deflate(
        #[from]
        #[source]
        CompressError,
    ),
    /// The decompression engine rejected the current input, typically because
    /// the compressed stream is corrupt.
    #[error("inflate engine failed to process input: {0}")]
    Inflate(
        #[from]
        #[source]
        DecompressError,
    ),
}
