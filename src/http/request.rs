use crate::http::method::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot read properties of null (reading '{0}')")]
    NullBody(String),
}

#[derive(Debug)]
pub struct RequestContext<'a> {
    request: &'a Request,
    path: String,
    url_vars: HashMap<String, String>,
    body: Value,
}

impl<'a> RequestContext<'a> {
    pub fn from(request: &'a Request, path: String) -> RequestContext<'a> {
        RequestContext {
            request,
            path,
            url_vars: HashMap::new(),
            body: Value::Object(Map::new()),
        }
    }

    /// Normalized routing key, not the raw target.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.request.method
    }

    pub fn get_var(&self, k: &str) -> Option<&str> {
        self.url_vars.get(k).map(|v| v.as_str())
    }

    pub(crate) fn set_vars(&mut self, url_vars: HashMap<String, String>) {
        self.url_vars = url_vars;
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.request.get_header(k)
    }

    /// Field of the parsed JSON body. Non-object bodies have no fields.
    pub fn field(&self, k: &str) -> Option<&Value> {
        self.body.get(k)
    }

    /// Like [`field`](Self::field), but a literal `null` body has no fields to
    /// read at all and is an error rather than an empty mapping.
    pub fn require_field(&self, k: &str) -> Result<Option<&Value>, BodyError> {
        if self.body.is_null() {
            return Err(BodyError::NullBody(k.to_string()));
        }
        Ok(self.body.get(k))
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub(crate) fn parse_body(&mut self) -> Result<(), BodyError> {
        if let Some(body) = self.request.json_body()? {
            self.body = body;
        }
        Ok(())
    }

    pub fn request(&self) -> &Request {
        self.request
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub content: Vec<u8>,
}

impl Request {
    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers.get(&k.to_lowercase()).map(|v| v.as_str())
    }

    /// Target without its query string.
    pub fn path(&self) -> &str {
        match self.url.split_once('?') {
            Some((path, _)) => path,
            None => &self.url,
        }
    }

    /// `None` when there is no body at all.
    pub fn json_body(&self) -> Result<Option<Value>, BodyError> {
        if self.content.is_empty() {
            return Ok(None);
        }
        let text = std::str::from_utf8(&self.content)?;
        Ok(Some(serde_json::from_str(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, content: &[u8]) -> Request {
        Request {
            method: Method::POST,
            url: url.to_string(),
            headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
            content: content.to_vec(),
        }
    }

    #[test]
    fn path_drops_query() {
        assert_eq!(request("/api/users?q=ann", b"").path(), "/api/users");
        assert_eq!(request("/api/users", b"").path(), "/api/users");
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(
            request("/", b"").get_header("Content-Type"),
            Some("application/json")
        );
    }

    #[test]
    fn empty_body_keeps_empty_mapping() {
        let req = request("/login", b"");
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        ctx.parse_body().unwrap();
        assert_eq!(ctx.body(), &Value::Object(Map::new()));
        assert!(ctx.field("username").is_none());
    }

    #[test]
    fn body_fields_are_exposed() {
        let req = request("/login", br#"{"username":"alice"}"#);
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        ctx.parse_body().unwrap();
        assert_eq!(ctx.field("username"), Some(&Value::from("alice")));
    }

    #[test]
    fn non_object_body_has_no_fields() {
        let req = request("/login", b"[1,2]");
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        ctx.parse_body().unwrap();
        assert!(ctx.field("username").is_none());
    }

    #[test]
    fn null_body_has_no_readable_fields() {
        let req = request("/login", b"null");
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        ctx.parse_body().unwrap();

        assert!(ctx.field("username").is_none());
        let err = ctx.require_field("username").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot read properties of null (reading 'username')"
        );
    }

    #[test]
    fn require_field_reads_objects() {
        let req = request("/login", br#"{"username":"alice"}"#);
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        ctx.parse_body().unwrap();
        assert_eq!(ctx.require_field("username").unwrap(), Some(&Value::from("alice")));
        assert_eq!(ctx.require_field("missing").unwrap(), None);
    }

    #[test]
    fn malformed_body_is_an_error() {
        let req = request("/login", b"{not json");
        let mut ctx = RequestContext::from(&req, "/login".to_string());
        assert!(matches!(ctx.parse_body(), Err(BodyError::Json(_))));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let req = request("/login", &[0xff, 0xfe]);
        assert!(matches!(req.json_body(), Err(BodyError::Utf8(_))));
    }
}
