//! Shared enumeration describing the two processing directions of a stream.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Direction of a zlib stream: compression or decompression.
///
/// The direction is fixed when a stream is opened and stored on the stream
/// itself. Operations that accept a redundant direction argument validate it
/// against the stored value instead of trusting the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Compress input into a zlib-wrapped deflate stream.
    Deflate,
    /// Decompress a zlib-wrapped deflate stream.
    Inflate,
}

impl Direction {
    /// Returns the canonical display name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Deflate => "deflate",
            Direction::Inflate => "inflate",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "deflate" | "compress" => Ok(Direction::Deflate),
            "inflate" | "decompress" => Ok(Direction::Inflate),
            other => Err(DirectionParseError::new(other)),
        }
    }
}

/// Error returned when parsing an unrecognised direction name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown stream direction {input:?}, expected \"deflate\" or \"inflate\"")]
pub struct DirectionParseError {
    input: String,
}

impl DirectionParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_accepts_canonical_names() {
        assert_eq!("deflate".parse::<Direction>().unwrap(), Direction::Deflate);
        assert_eq!("inflate".parse::<Direction>().unwrap(), Direction::Inflate);
    }

    #[test]
    fn parsing_accepts_aliases() {
        assert_eq!("compress".parse::<Direction>().unwrap(), Direction::Deflate);
        assert_eq!(
            "decompress".parse::<Direction>().unwrap(),
            Direction::Inflate
        );
    }

    #[test]
    fn parsing_rejects_unknown_names() {
        let err = "brotli".parse::<Direction>().expect_err("unsupported");
        assert_eq!(err.input(), "brotli");
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Direction::Deflate.to_string(), "deflate");
        assert_eq!(Direction::Inflate.to_string(), "inflate");
    }
}
