use crate::http::method::Method;
use crate::http::middleware::{Middleware, Next};
use crate::http::request::RequestContext;
use crate::http::{Response, ok};

pub const STANDARD_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Content-Type", "application/json"),
];

/// Answers preflight requests on any path and stamps the CORS/JSON headers
/// onto everything else, error responses included.
pub struct CorsMw {}

impl Middleware for CorsMw {
    fn handle(&self, ctx: &mut RequestContext, next: Next) -> Response {
        let mut resp = if *ctx.method() == Method::OPTIONS {
            ok()
        } else {
            next.run(ctx)
        };

        for (k, v) in STANDARD_HEADERS {
            resp.headers.insert(k.to_string(), v.to_string());
        }
        resp
    }
}
