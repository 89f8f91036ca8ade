//! Mock backend for the student clinic records frontend.
//!
//! Requests are matched on method and normalized path against a fixed route
//! table and answered with canned JSON. The same router serves raw HTTP/1.1
//! over TCP ([`http::server::Server`]) and serverless-style JSON events
//! ([`event::handle_event`]).

pub mod api;
pub mod concurrency;
pub mod event;
pub mod http;
