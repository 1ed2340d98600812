// Author: kelexine (https://github.com/kelexine)
// counter/encoding.rs — Encoding detection, decoding fallbacks, and line tallies

use std::borrow::Cow;
use std::io::{self, Read};

use chardetng::EncodingDetector;
use encoding_rs::{CoderResult, DecoderResult, Encoding, ISO_8859_15, UTF_8, WINDOWS_1252};

/// Bytes inspected when guessing a file's encoding.
pub const SAMPLE_SIZE: usize = 8 * 1024;

/// Strict decoders tried, in order, when detection gives no usable answer.
pub fn fallback_encodings() -> [&'static Encoding; 3] {
    [UTF_8, WINDOWS_1252, ISO_8859_15]
}

/// Best-guess encoding for a file whose first bytes are `sample`.
///
/// `complete` tells whether `sample` holds the entire file, so a multi-byte
/// sequence cut at the sample boundary is not held against UTF-8.
///
/// A byte-order mark always wins. A sample with NUL bytes and no BOM is not
/// text in any encoding the statistical detector knows, so `None` is returned
/// and the caller falls back to strict decoding.
pub fn detect(sample: &[u8], complete: bool) -> Option<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return Some(encoding);
    }
    if sample.contains(&0) {
        return None;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, complete);
    Some(detector.guess(None, true))
}

/// Decode `bytes` with the first fallback encoding that reports no errors.
pub fn decode_strict(bytes: &[u8]) -> Option<(Cow<'_, str>, &'static Encoding)> {
    fallback_encodings().into_iter().find_map(|encoding| {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| (text, encoding))
    })
}

/// Decode `bytes` as `encoding`, replacing malformed sequences.
pub fn decode_lossy<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, _, _) = encoding.decode(bytes);
    text
}

/// Number of lines in decoded text. `\n`, `\r\n` and a lone `\r` each end a
/// line; trailing text without a terminator is one more line.
pub fn count_text_lines(text: &str) -> usize {
    let mut tally = TextLineTally::default();
    tally.feed(text);
    tally.finish()
}

/// Universal-newline tally over decoded text fed in chunks. A `\r\n` split
/// across two chunks still ends a single line.
#[derive(Debug, Default)]
pub struct TextLineTally {
    lines: usize,
    last: Option<u8>,
}

impl TextLineTally {
    pub fn feed(&mut self, text: &str) {
        let mut bytes = text.as_bytes();
        if self.last == Some(b'\r') && bytes.first() == Some(&b'\n') {
            bytes = &bytes[1..];
            self.last = Some(b'\n');
        }

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => self.lines += 1,
                b'\r' => {
                    self.lines += 1;
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        if let Some(&b) = bytes.last() {
            self.last = Some(b);
        }
    }

    pub fn finish(self) -> usize {
        match self.last {
            None | Some(b'\n' | b'\r') => self.lines,
            Some(_) => self.lines + 1,
        }
    }
}

/// Bytes read per step when decoding a file in chunks.
const STREAM_CHUNK: usize = 64 * 1024;

/// Count lines of everything `reader` yields, decoded as `encoding` in
/// chunks. Malformed sequences are replaced, as with [`decode_lossy`].
pub fn count_decoded<R: Read>(reader: R, encoding: &'static Encoding) -> io::Result<usize> {
    let mut decoder = encoding.new_decoder();
    let mut tally = TextLineTally::default();
    let mut text = String::with_capacity(STREAM_CHUNK * 3);

    for_each_chunk(reader, |src, last| {
        let mut src = src;
        loop {
            text.clear();
            let (result, read, _) = decoder.decode_to_string(src, &mut text, last);
            tally.feed(&text);
            src = &src[read..];
            if let CoderResult::InputEmpty = result {
                return true;
            }
        }
    })?;
    Ok(tally.finish())
}

/// Streaming counterpart of [`decode_strict`] for a single encoding:
/// `Ok(None)` as soon as a malformed sequence shows up.
pub fn count_decoded_strict<R: Read>(
    reader: R,
    encoding: &'static Encoding,
) -> io::Result<Option<usize>> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut tally = TextLineTally::default();
    let mut text = String::with_capacity(STREAM_CHUNK * 3);
    let mut malformed = false;

    for_each_chunk(reader, |src, last| {
        let mut src = src;
        loop {
            text.clear();
            let (result, read) = decoder.decode_to_string_without_replacement(src, &mut text, last);
            tally.feed(&text);
            src = &src[read..];
            match result {
                DecoderResult::InputEmpty => return true,
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => {
                    malformed = true;
                    return false;
                }
            }
        }
    })?;
    Ok(if malformed { None } else { Some(tally.finish()) })
}

/// Feed `reader` to `f` in [`STREAM_CHUNK`] pieces, then once more with an
/// empty slice and `last = true`. Stops early when `f` returns false.
fn for_each_chunk<R: Read>(mut reader: R, mut f: impl FnMut(&[u8], bool) -> bool) -> io::Result<()> {
    let mut chunk = vec![0u8; STREAM_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if !f(&chunk[..n], n == 0) || n == 0 {
            return Ok(());
        }
    }
}

/// Running `\n` tally over raw bytes fed in chunks.
#[derive(Debug, Default)]
pub struct RawLineTally {
    newlines: usize,
    last: Option<u8>,
}

impl RawLineTally {
    pub fn feed(&mut self, chunk: &[u8]) {
        self.newlines += chunk.iter().filter(|&&b| b == b'\n').count();
        if let Some(&b) = chunk.last() {
            self.last = Some(b);
        }
    }

    pub fn finish(self) -> usize {
        match self.last {
            Some(b'\n') | None => self.newlines,
            Some(_) => self.newlines + 1,
        }
    }
}
