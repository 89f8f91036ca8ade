use crate::http::Response;
use crate::http::request::RequestContext;

/// Route handler. An `Err` is rendered as a 500 by the router.
pub type HandlerFunc = Box<dyn Fn(&RequestContext) -> anyhow::Result<Response> + Sync + Send>;
