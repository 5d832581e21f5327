//! Message direction
//!
//! HTTP/1.x uses two start-line grammars:
//! - Request: `METHOD target HTTP/x.y`
//! - Response: `HTTP/x.y code reason`

use std::fmt;

/// Which grammar a parser applies to its input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Client to server message
    #[default]
    Request,

    /// Server to client message
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => f.write_str("request"),
            Direction::Response => f.write_str("response"),
        }
    }
}
