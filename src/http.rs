pub mod handler;
pub mod method;
pub mod middleware;
pub mod parse;
pub mod request;
pub mod router;
pub mod server;
pub mod status;

use crate::http::status::Status;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;

pub(crate) const BUFFER_SIZE: usize = 1024;

#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub headers: HashMap<String, String>,
    pub content: Option<Vec<u8>>,
}

impl Response {
    pub fn from_parts(
        status: Status,
        headers: HashMap<String, String>,
        content: Option<Vec<u8>>,
    ) -> Response {
        Response {
            status,
            headers,
            content,
        }
    }

    /// JSON response from an already-built value. Serializing a `Value` cannot fail.
    pub fn json(status: Status, body: Value) -> Response {
        Response::from_parts(status, HashMap::new(), Some(body.to_string().into_bytes()))
    }

    pub fn json_from<T: Serialize>(status: Status, body: &T) -> serde_json::Result<Response> {
        let content = serde_json::to_vec(body)?;
        Ok(Response::from_parts(status, HashMap::new(), Some(content)))
    }

    pub fn header(&self, k: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(k))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> &str {
        self.content
            .as_deref()
            .and_then(|c| std::str::from_utf8(c).ok())
            .unwrap_or("")
    }
}

pub fn ok() -> Response {
    Response::from_parts(Status::OK, HashMap::new(), Some(Vec::new()))
}

pub fn not_found() -> Response {
    Response::json(Status::NOT_FOUND, json!({ "error": "Endpoint not found" }))
}

pub fn bad_request() -> Response {
    Response::from_parts(Status::BAD_REQUEST, HashMap::new(), None)
}

pub fn server_error(err: &anyhow::Error) -> Response {
    Response::json(
        Status::INTERNAL_SERVER_ERROR,
        json!({ "error": format!("Server Error: {err}") }),
    )
}
