//! HTTP transport types shared by the builder, transport, and parser.
//!
//! # Design
//! Requests and responses are plain data: the client builds `HttpRequest`
//! values deterministically, `transport::execute` performs the round-trip,
//! and `parse_response` consumes an `HttpResponse`. Keeping the three seams
//! data-only makes the request-construction logic testable without a
//! network.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved
//! across threads or stored without lifetime concerns.

use std::fmt;

/// HTTP verb for an API call. The schema table only ever declares GET or
/// POST, so no other verbs exist here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `SdClient::build_request`. `url` is absolute and already
/// percent-encoded; `body` is the urlencoded form payload for POST calls.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, as returned by
/// `transport::execute` and consumed by `SdClient::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
