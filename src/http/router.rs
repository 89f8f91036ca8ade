use crate::http;
use crate::http::Response;
use crate::http::handler::HandlerFunc;
use crate::http::method::Method;
use crate::http::middleware::{CorsMw, Middleware, Next, TraceMw};
use crate::http::request::{Request, RequestContext};
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

// `<name>` matches one segment, `<name:re>` matches `re`.
static PATTERN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?P<var>[a-z][a-z0-9_]*)(?::(?P<re>[^>]+))?>").expect("valid pattern regex")
});

static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(/\.netlify/functions/api|/api)").expect("valid prefix regex")
});

/// Routing key for a raw request path: deployment prefix stripped, leading
/// slash guaranteed, one trailing slash removed.
pub fn normalize_path(raw: &str) -> String {
    let mut path = PREFIX_RE.replace(raw, "").into_owned();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    if path.ends_with('/') {
        path.pop();
    }
    path
}

pub struct Handler {
    method: Method,
    regex: Regex,
    pub f: HandlerFunc,
}

/// Ordered route table behind a middleware chain. The first registered
/// handler whose method and pattern both match wins.
pub struct Router {
    handlers: Vec<Handler>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Router {
        let mut r = Router {
            handlers: Vec::new(),
            middlewares: Vec::new(),
        };

        r.add_middleware(Box::new(TraceMw {}));
        r.add_middleware(Box::new(CorsMw {}));
        r
    }

    pub fn add_handler(&mut self, m: Method, pattern: &str, f: HandlerFunc) -> anyhow::Result<()> {
        let regex = compile_pattern(pattern)?;
        self.handlers.push(Handler { method: m, regex, f });
        Ok(())
    }

    pub fn add_middleware(&mut self, m: Box<dyn Middleware>) {
        self.middlewares.push(m);
    }

    pub fn dispatch(&self, req: &Request) -> Response {
        let mut ctx = RequestContext::from(req, normalize_path(req.path()));

        let next = Next {
            middlewares: self.middlewares.as_ref(),
            endpoint: &|ctx| self.route(ctx),
        };

        next.run(&mut ctx)
    }

    fn route(&self, ctx: &mut RequestContext) -> Response {
        match self.try_route(ctx) {
            Ok(resp) => resp,
            Err(e) => http::server_error(&e),
        }
    }

    fn try_route(&self, ctx: &mut RequestContext) -> anyhow::Result<Response> {
        if *ctx.method() == Method::POST {
            ctx.parse_body()?;
        }

        let found = self
            .handlers
            .iter()
            .filter(|h| h.method == *ctx.method())
            .find_map(|h| h.regex.captures(ctx.path()).map(|c| (h, Self::get_url_vars(h, &c))));

        match found {
            Some((handler, vars)) => {
                ctx.set_vars(vars);
                (handler.f)(ctx)
            }
            None => Ok(http::not_found()),
        }
    }

    fn get_url_vars(handler: &Handler, capt: &Captures) -> HashMap<String, String> {
        handler
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| capt.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
            .collect()
    }
}

fn compile_pattern(pattern: &str) -> anyhow::Result<Regex> {
    let pattern = PATTERN_RE
        .replace_all(pattern, |capt: &Captures| {
            let re = capt.name("re").map(|m| m.as_str()).unwrap_or("[^/?]+");
            format!(r"(?<{}>{})", &capt["var"], re)
        })
        .to_string();
    let pattern = format!("^{}$", pattern);

    Regex::new(&pattern).with_context(|| format!("Invalid route pattern {}", pattern))
}
