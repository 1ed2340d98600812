// Author: kelexine (https://github.com/kelexine)
// counter/lines.rs — Encoding-tolerant per-file line counting

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;
use tracing::trace;

use super::encoding::{self, RawLineTally, SAMPLE_SIZE};

/// Files above this size are decoded in chunks instead of being read whole.
pub const MAX_BUFFERED_SIZE: u64 = 64 * 1024 * 1024;

const RAW_CHUNK: usize = 64 * 1024;

/// Why a file could not be counted. Never fatal to a scan.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No fallback decoder accepted the file. Windows-1252 maps all 256 byte
    /// values, so with the current fallback list this is never produced.
    #[error("no usable text encoding for {}", .0.display())]
    Undecodable(PathBuf),
}

impl CountError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Count the lines of `path`, whatever its text encoding.
///
/// Empty files count as zero. The encoding is guessed from the first
/// [`SAMPLE_SIZE`] bytes; when no guess is possible the whole file is tried
/// against a short list of strict decoders. Files that cannot be buffered
/// are tallied as raw bytes instead.
pub fn count_lines(path: &Path) -> Result<usize, CountError> {
    count_lines_buffering_up_to(path, MAX_BUFFERED_SIZE)
}

fn count_lines_buffering_up_to(path: &Path, max_buffered: u64) -> Result<usize, CountError> {
    let mut file = File::open(path).map_err(|e| CountError::io(path, e))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);

    let mut buf = Vec::with_capacity(SAMPLE_SIZE);
    (&mut file)
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut buf)
        .map_err(|e| CountError::io(path, e))?;
    if buf.is_empty() {
        return Ok(0);
    }

    let complete = buf.len() < SAMPLE_SIZE;
    let detected = encoding::detect(&buf, complete);

    if size > max_buffered {
        trace!(path = %path.display(), size, "decoding oversized file in chunks");
        return count_streamed(path, file, detected);
    }

    if !complete {
        buf.reserve((size as usize).saturating_sub(buf.len()));
        match file.read_to_end(&mut buf) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::OutOfMemory => {
                trace!(path = %path.display(), "buffering failed; counting raw bytes");
                return count_raw_lines(path);
            }
            Err(e) => return Err(CountError::io(path, e)),
        }
    }

    match detected {
        Some(enc) => {
            trace!(path = %path.display(), encoding = enc.name(), "decoding with detected encoding");
            Ok(encoding::count_text_lines(&encoding::decode_lossy(&buf, enc)))
        }
        None => match encoding::decode_strict(&buf) {
            Some((text, enc)) => {
                trace!(path = %path.display(), encoding = enc.name(), "decoded with fallback encoding");
                Ok(encoding::count_text_lines(&text))
            }
            None => Err(CountError::Undecodable(path.to_path_buf())),
        },
    }
}

/// Same decoding chain as the buffered path, reading `file` from the start
/// once per attempted encoding.
fn count_streamed(
    path: &Path,
    mut file: File,
    detected: Option<&'static Encoding>,
) -> Result<usize, CountError> {
    let rewind = |file: &mut File| {
        file.seek(SeekFrom::Start(0))
            .map(|_| ())
            .map_err(|e| CountError::io(path, e))
    };

    if let Some(enc) = detected {
        rewind(&mut file)?;
        return encoding::count_decoded(&mut file, enc).map_err(|e| CountError::io(path, e));
    }
    for enc in encoding::fallback_encodings() {
        rewind(&mut file)?;
        if let Some(lines) =
            encoding::count_decoded_strict(&mut file, enc).map_err(|e| CountError::io(path, e))?
        {
            trace!(path = %path.display(), encoding = enc.name(), "decoded with fallback encoding");
            return Ok(lines);
        }
    }
    Err(CountError::Undecodable(path.to_path_buf()))
}

/// Count `\n` bytes (plus a trailing unterminated chunk) without decoding.
pub fn count_raw_lines(path: &Path) -> Result<usize, CountError> {
    let file = File::open(path).map_err(|e| CountError::io(path, e))?;
    let mut reader = BufReader::with_capacity(RAW_CHUNK, file);
    let mut chunk = vec![0u8; RAW_CHUNK];
    let mut tally = RawLineTally::default();
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => tally.feed(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CountError::io(path, e)),
        }
    }
    Ok(tally.finish())
}
