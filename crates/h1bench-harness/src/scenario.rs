//! Benchmark scenarios
//!
//! Each scenario is exactly one complete, well-formed HTTP/1.x message. A
//! correct parser consumes the whole payload, so the payload length is also
//! the expected consumption.

use std::collections::HashSet;

use h1bench_core::{BenchError, BenchResult, Direction};

/// A named message buffer and the grammar it is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario<'a> {
    /// Short key used for bench case names and CLI selection
    pub id: &'a str,
    /// Name printed in reports
    pub name: &'a str,
    pub direction: Direction,
    pub payload: &'a [u8],
}

impl<'a> Scenario<'a> {
    pub const fn new(id: &'a str, name: &'a str, direction: Direction, payload: &'a [u8]) -> Self {
        Scenario {
            id,
            name,
            direction,
            payload,
        }
    }

    /// Buffer length, which is also the expected consumption
    #[inline]
    pub const fn len(&self) -> usize {
        self.payload.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Minimal request: no headers, no body
pub const SIMPLE_GET: Scenario<'static> = Scenario::new(
    "simple_get",
    "Simple GET Request (Minimal)",
    Direction::Request,
    b"GET /get_no_headers_no_body/world HTTP/1.1\r\n\r\n",
);

/// Browser-like request with a typical header set
pub const COMPLEX_GET: Scenario<'static> = Scenario::new(
    "complex_get",
    "Complex GET Request (Browser-like)",
    Direction::Request,
    b"GET /favicon.ico HTTP/1.1\r\n\
Host: 0.0.0.0=5000\r\n\
User-Agent: Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.9) Gecko/2008061015 Firefox/3.0\r\n\
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\r\n\
Accept-Language: en-us,en;q=0.5\r\n\
Accept-Encoding: gzip,deflate\r\n\
Accept-Charset: ISO-8859-1,utf-8;q=0.7,*;q=0.7\r\n\
Keep-Alive: 300\r\n\
Connection: keep-alive\r\n\
\r\n",
);

/// Small identity body framed by Content-Length
pub const POST_CONTENT_LENGTH: Scenario<'static> = Scenario::new(
    "post_content_length",
    "POST Request (Content-Length)",
    Direction::Request,
    b"POST /post_identity_body_world?q=search#hey HTTP/1.1\r\n\
Accept: */*\r\n\
Content-Length: 5\r\n\
\r\n\
World",
);

/// Small body in one chunk plus the terminating chunk
pub const POST_CHUNKED: Scenario<'static> = Scenario::new(
    "post_chunked",
    "POST Request (Chunked TE)",
    Direction::Request,
    b"POST /post_chunked_all_your_base HTTP/1.1\r\n\
Transfer-Encoding: chunked\r\n\
\r\n\
1e\r\nall your base are belong to us\r\n\
0\r\n\
\r\n",
);

/// Minimal response: status line only
pub const SIMPLE_200_RESPONSE: Scenario<'static> = Scenario::new(
    "simple_200_response",
    "Simple 200 OK Response",
    Direction::Response,
    b"HTTP/1.1 200 OK\r\n\r\n",
);

/// Standard scenarios, in run order
pub const SCENARIOS: &[Scenario<'static>] = &[
    SIMPLE_GET,
    COMPLEX_GET,
    POST_CONTENT_LENGTH,
    POST_CHUNKED,
    SIMPLE_200_RESPONSE,
];

/// Look up a standard scenario by id
pub fn find(id: &str) -> Option<&'static Scenario<'static>> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Check registry invariants: non-empty payloads, unique ids and names
pub fn validate_registry(scenarios: &[Scenario<'_>]) -> BenchResult<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for scenario in scenarios {
        if scenario.is_empty() {
            return Err(BenchError::EmptyScenario(scenario.id.to_string()));
        }
        if !ids.insert(scenario.id) {
            return Err(BenchError::DuplicateScenario(scenario.id.to_string()));
        }
        if !names.insert(scenario.name) {
            return Err(BenchError::DuplicateScenario(scenario.name.to_string()));
        }
    }

    Ok(())
}
