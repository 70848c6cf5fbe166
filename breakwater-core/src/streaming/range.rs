//! HTTP `Range` header parsing and validation.
//!
//! Supports the single-range `bytes=<start>-<end>` form with an optional
//! end. Multi-range requests are rejected outright rather than silently
//! truncated to their first window; a silently dropped range hides client
//! bugs behind a plausible-looking 206.

use thiserror::Error;

/// A validated byte window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedRange {
    /// No range requested; serve the whole file.
    Full,
    /// Inclusive `[start, end]` window within the file.
    Window { start: u64, end: u64 },
}

impl RequestedRange {
    /// Content length of the response body for this range.
    pub fn content_length(&self, file_size: u64) -> u64 {
        match self {
            RequestedRange::Full => file_size,
            RequestedRange::Window { start, end } => end - start + 1,
        }
    }
}

/// Errors from range parsing. All map to 416.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range not satisfiable for file of {file_size} bytes")]
    Unsatisfiable { file_size: u64 },

    #[error("multi-range requests are not supported")]
    MultiRangeUnsupported { file_size: u64 },
}

impl RangeError {
    /// File size to report in the `Content-Range: bytes */N` header.
    pub fn file_size(&self) -> u64 {
        match self {
            RangeError::Unsatisfiable { file_size }
            | RangeError::MultiRangeUnsupported { file_size } => *file_size,
        }
    }
}

/// Parses an optional `Range` header against a known file size.
///
/// An absent header, or one not using the `bytes=` unit, requests the full
/// file. A `bytes=` header must name a single window whose resolved start
/// and end both fall within `[0, file_size - 1]`.
///
/// # Errors
///
/// - `RangeError::MultiRangeUnsupported` - The header names more than one range
/// - `RangeError::Unsatisfiable` - Malformed numbers, inverted window, or
///   a window outside the file bounds
pub fn parse_range(header: Option<&str>, file_size: u64) -> Result<RequestedRange, RangeError> {
    let Some(header) = header else {
        return Ok(RequestedRange::Full);
    };

    let Some(spec) = header.strip_prefix("bytes=") else {
        // Alien units degrade to a full response rather than an error
        return Ok(RequestedRange::Full);
    };

    if spec.contains(',') {
        return Err(RangeError::MultiRangeUnsupported { file_size });
    }

    let unsatisfiable = RangeError::Unsatisfiable { file_size };

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return Err(unsatisfiable);
    };

    let start = start_str
        .trim()
        .parse::<u64>()
        .map_err(|_| RangeError::Unsatisfiable { file_size })?;

    let end = if end_str.trim().is_empty() {
        file_size.saturating_sub(1)
    } else {
        end_str
            .trim()
            .parse::<u64>()
            .map_err(|_| RangeError::Unsatisfiable { file_size })?
    };

    let last_byte = file_size.saturating_sub(1);
    if file_size == 0 || start > end || start > last_byte || end > last_byte {
        return Err(unsatisfiable);
    }

    Ok(RequestedRange::Window { start, end })
}
