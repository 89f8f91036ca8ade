use crate::http::Response;
use crate::http::request::RequestContext;

pub mod cors;
pub mod trace;

pub use cors::CorsMw;
pub use trace::TraceMw;

pub type Endpoint<'a> = &'a dyn Fn(&mut RequestContext) -> Response;

pub trait Middleware: Send + Sync {
    fn handle(&self, ctx: &mut RequestContext, next: Next) -> Response;
}

/// Remaining middlewares, ending in the route table.
pub struct Next<'a> {
    pub(crate) middlewares: &'a [Box<dyn Middleware>],
    pub(crate) endpoint: Endpoint<'a>,
}

impl<'a> Next<'a> {
    pub fn run(self, ctx: &mut RequestContext) -> Response {
        if let Some((first, rest)) = self.middlewares.split_first() {
            let next = Next {
                middlewares: rest,
                endpoint: self.endpoint,
            };
            first.handle(ctx, next)
        } else {
            (self.endpoint)(ctx)
        }
    }
}
