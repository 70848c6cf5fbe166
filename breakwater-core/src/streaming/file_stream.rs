//! Chunked HTTP delivery of resolved media files.
//!
//! Serves full-content and partial-content responses whose bodies copy
//! bounded chunks from disk to the socket. The file handle lives inside
//! the body stream, so it is closed on every exit path: normal completion,
//! client disconnect, or read error.

use std::io::SeekFrom;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{Stream, stream};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::storage::ResolvedFile;
use crate::streaming::range::{RangeError, RequestedRange};

/// Size of chunks copied from disk to the response body.
///
/// Balances memory per in-flight request against syscall overhead. The
/// whole file is never buffered.
const CHUNK_SIZE: usize = 256 * 1024; // 256 KiB

/// Caching policy for media bodies: entitlement can be revoked between
/// plays, so intermediaries must not serve stale grants.
const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// Creates a body stream yielding `length` bytes from `file`, which must
/// already be seeked to the window start.
fn file_chunk_stream(file: File, length: u64) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
    stream::unfold((file, length), |(mut file, remaining)| async move {
        if remaining == 0 {
            return None;
        }

        let chunk_size = std::cmp::min(CHUNK_SIZE as u64, remaining) as usize;
        let mut buffer = vec![0u8; chunk_size];

        match file.read(&mut buffer).await {
            Ok(0) => {
                // File shrank underneath us; end the body early
                None
            }
            Ok(read) => {
                buffer.truncate(read);
                Some((Ok(Bytes::from(buffer)), (file, remaining - read as u64)))
            }
            Err(e) => Some((Err(e), (file, 0))),
        }
    })
}

/// Serves a resolved file for the requested byte window.
///
/// Emits 200 with the full body for [`RequestedRange::Full`], or 206 with
/// `Content-Range` for a window. The caller has already rejected
/// zero-length files and validated the window against the file size.
///
/// # Errors
///
/// - `std::io::Error` - Opening or seeking the file failed
pub async fn serve_file(
    resolved: &ResolvedFile,
    range: RequestedRange,
) -> Result<Response, std::io::Error> {
    let mut file = File::open(&resolved.path).await?;

    let (status, start) = match range {
        RequestedRange::Full => (StatusCode::OK, 0),
        RequestedRange::Window { start, .. } => (StatusCode::PARTIAL_CONTENT, start),
    };
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }

    let length = range.content_length(resolved.size);
    let body = Body::from_stream(file_chunk_stream(file, length));

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, resolved.mime_type)
        .header(header::CONTENT_LENGTH, length.to_string())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, CACHE_CONTROL);

    if let RequestedRange::Window { start, end } = range {
        builder = builder.header(
            header::CONTENT_RANGE,
            format!("bytes {start}-{end}/{}", resolved.size),
        );
    }

    Ok(builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}

/// Builds the 416 response for an unsatisfiable or multi-range request.
///
/// Carries `Content-Range: bytes */<size>` and an empty body; no streaming
/// is attempted.
pub fn range_not_satisfiable(error: &RangeError) -> Response {
    (
        StatusCode::RANGE_NOT_SATISFIABLE,
        [(
            header::CONTENT_RANGE,
            format!("bytes */{}", error.file_size()),
        )],
    )
        .into_response()
}
