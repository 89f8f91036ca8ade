use crate::http::Response;
use crate::http::middleware::{Middleware, Next};
use crate::http::request::RequestContext;
use std::time::Instant;
use tracing::info;

pub struct TraceMw {}

impl Middleware for TraceMw {
    fn handle(&self, ctx: &mut RequestContext, next: Next) -> Response {
        let started = Instant::now();
        let method = ctx.method().to_string();
        let target = ctx.request().url.clone();

        let resp = next.run(ctx);

        info!(
            %method,
            %target,
            path = ctx.path(),
            status = resp.status.code_num,
            elapsed_us = started.elapsed().as_micros() as u64,
            "request handled"
        );
        resp
    }
}
