//! Serverless invocation contract: one JSON event in, one JSON response out.

use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::router::Router;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiEvent {
    pub fn new(http_method: &str, path: &str, body: Option<&str>) -> ApiEvent {
        ApiEvent {
            http_method: http_method.to_string(),
            path: path.to_string(),
            body: body.map(String::from),
        }
    }

    fn into_request(self) -> Request {
        let method = Method::from_str(&self.http_method)
            .unwrap_or_else(|_| Method::Other(self.http_method.clone()));
        Request {
            method,
            url: self.path,
            headers: HashMap::new(),
            content: self.body.map(String::into_bytes).unwrap_or_default(),
        }
    }
}

pub fn handle_event(router: &Router, event: ApiEvent) -> ApiResponse {
    let request = event.into_request();
    let response = router.dispatch(&request);

    ApiResponse {
        status_code: response.status.code_num,
        body: response.body_str().to_string(),
        headers: response.headers,
    }
}
