//! Feeds arbitrary bytes to `HttpParser::execute`.
//!
//! Consumption never exceeds the input, and a short consumption always
//! comes with a recorded failure.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use h1bench_core::Direction;
use h1bench_harness::HttpParser;
use httparse::ParserConfig;

#[derive(Arbitrary, Debug)]
struct Input {
    response: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let direction = if input.response {
        Direction::Response
    } else {
        Direction::Request
    };
    let mut parser = HttpParser::new(direction);

    let consumed = parser.execute(&ParserConfig::default(), &input.data);
    assert!(consumed <= input.data.len());
    if consumed < input.data.len() {
        assert!(parser.failure_kind().is_some());
    }
});
