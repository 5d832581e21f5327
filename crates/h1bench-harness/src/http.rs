//! `MessageParser` adapter over `httparse`
//!
//! `httparse` parses the message head. The adapter then walks the body
//! framing the head declares, so `execute` reports how many bytes one whole
//! message occupies.

use h1bench_core::{Direction, MessageParser};
use httparse::{Header, ParserConfig, Status, EMPTY_HEADER};
use thiserror::Error;

/// Header slots available to one message head or trailer section
pub const MAX_HEADERS: usize = 32;

/// Why a buffer did not parse as exactly one message
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("invalid message head: {0}")]
    Head(httparse::Error),

    #[error("message is incomplete")]
    Incomplete,

    #[error("invalid Content-Length")]
    InvalidContentLength,

    #[error("both Content-Length and chunked Transfer-Encoding present")]
    ConflictingFraming,

    #[error("invalid chunk size")]
    InvalidChunkSize,

    #[error("chunk data not followed by CRLF")]
    MissingChunkTerminator,

    #[error("{0} bytes follow the end of the message")]
    TrailingBytes(usize),
}

/// How the body after the head is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    Empty,
    Length(u64),
    Chunked,
    UntilEof,
}

/// One-message HTTP/1.x parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpParser {
    direction: Direction,
    failure: Option<ParseFailure>,
}

impl HttpParser {
    pub fn new(direction: Direction) -> Self {
        HttpParser {
            direction,
            failure: None,
        }
    }

    /// Parse one message from the front of `data`.
    ///
    /// Returns the message length. A malformed or incomplete message
    /// consumes nothing. Bytes after the message are left unconsumed.
    pub fn execute(&mut self, config: &ParserConfig, data: &[u8]) -> usize {
        match self.message_len(config, data) {
            Ok(len) => {
                if len < data.len() {
                    self.failure = Some(ParseFailure::TrailingBytes(data.len() - len));
                }
                len
            }
            Err(failure) => {
                self.failure = Some(failure);
                0
            }
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn failure_kind(&self) -> Option<ParseFailure> {
        self.failure
    }

    fn message_len(&self, config: &ParserConfig, data: &[u8]) -> Result<usize, ParseFailure> {
        let (head_len, framing) = match self.direction {
            Direction::Request => request_head(config, data)?,
            Direction::Response => response_head(config, data)?,
        };

        let body = &data[head_len..];
        let body_len = match framing {
            Framing::Empty => 0,
            Framing::Length(len) => match usize::try_from(len) {
                Ok(len) if len <= body.len() => len,
                _ => return Err(ParseFailure::Incomplete),
            },
            Framing::Chunked => chunked_body_len(body)?,
            Framing::UntilEof => body.len(),
        };

        Ok(head_len + body_len)
    }
}

impl MessageParser for HttpParser {
    type Settings = ParserConfig;

    fn init(direction: Direction) -> Self {
        HttpParser::new(direction)
    }

    #[inline]
    fn execute(&mut self, settings: &ParserConfig, data: &[u8]) -> usize {
        HttpParser::execute(self, settings, data)
    }

    fn failure(&self) -> Option<String> {
        self.failure.map(|f| f.to_string())
    }
}

fn complete<T>(status: Status<T>) -> Result<T, ParseFailure> {
    match status {
        Status::Complete(value) => Ok(value),
        Status::Partial => Err(ParseFailure::Incomplete),
    }
}

fn request_head(config: &ParserConfig, data: &[u8]) -> Result<(usize, Framing), ParseFailure> {
    let mut headers = [EMPTY_HEADER; MAX_HEADERS];
    let mut request = httparse::Request::new(&mut headers);
    let status = config
        .parse_request(&mut request, data)
        .map_err(ParseFailure::Head)?;
    let head_len = complete(status)?;

    let framing = declared_framing(request.headers)?.unwrap_or(Framing::Empty);
    Ok((head_len, framing))
}

fn response_head(config: &ParserConfig, data: &[u8]) -> Result<(usize, Framing), ParseFailure> {
    let mut headers = [EMPTY_HEADER; MAX_HEADERS];
    let mut response = httparse::Response::new(&mut headers);
    let status = config
        .parse_response(&mut response, data)
        .map_err(ParseFailure::Head)?;
    let head_len = complete(status)?;

    // 1xx, 204 and 304 never carry a body
    let framing = match response.code {
        Some(100..=199 | 204 | 304) => Framing::Empty,
        _ => declared_framing(response.headers)?.unwrap_or(Framing::UntilEof),
    };
    Ok((head_len, framing))
}

/// Framing from Content-Length / Transfer-Encoding, if either is present
fn declared_framing(headers: &[Header<'_>]) -> Result<Option<Framing>, ParseFailure> {
    let mut length: Option<u64> = None;
    let mut chunked = false;

    for header in headers {
        if header.name.eq_ignore_ascii_case("content-length") {
            let value = content_length(header.value)?;
            if length.is_some_and(|seen| seen != value) {
                return Err(ParseFailure::InvalidContentLength);
            }
            length = Some(value);
        } else if header.name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = last_coding_is_chunked(header.value);
        }
    }

    match (length, chunked) {
        (Some(_), true) => Err(ParseFailure::ConflictingFraming),
        (Some(len), false) => Ok(Some(Framing::Length(len))),
        (None, true) => Ok(Some(Framing::Chunked)),
        (None, false) => Ok(None),
    }
}

fn content_length(value: &[u8]) -> Result<u64, ParseFailure> {
    std::str::from_utf8(value)
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|v| v.parse().ok())
        .ok_or(ParseFailure::InvalidContentLength)
}

fn last_coding_is_chunked(value: &[u8]) -> bool {
    std::str::from_utf8(value)
        .ok()
        .and_then(|v| v.rsplit(',').next())
        .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"))
}

/// Length of a chunked body including the last chunk and trailer section
fn chunked_body_len(body: &[u8]) -> Result<usize, ParseFailure> {
    let mut pos = 0;

    loop {
        let status =
            httparse::parse_chunk_size(&body[pos..]).map_err(|_| ParseFailure::InvalidChunkSize)?;
        let (size_len, size) = complete(status)?;
        pos += size_len;

        if size == 0 {
            break;
        }

        let rest = usize::try_from(size)
            .ok()
            .and_then(|size| body.get(pos..)?.get(size..))
            .ok_or(ParseFailure::Incomplete)?;
        match rest.get(..2) {
            Some(b"\r\n") => pos = body.len() - rest.len() + 2,
            Some(_) => return Err(ParseFailure::MissingChunkTerminator),
            None => return Err(ParseFailure::Incomplete),
        }
    }

    let mut trailers = [EMPTY_HEADER; MAX_HEADERS];
    let status = httparse::parse_headers(&body[pos..], &mut trailers).map_err(ParseFailure::Head)?;
    let (trailer_len, _) = complete(status)?;

    Ok(pos + trailer_len)
}
