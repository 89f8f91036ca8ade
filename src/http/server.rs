use crate::concurrency::ThreadPool;
use crate::http;
use crate::http::parse::{read_request, serialize_response};
use crate::http::router::Router;
use anyhow::Context;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// One request per connection, answered from the route table on the pool.
pub struct Server {
    listener: TcpListener,
    router: Router,
    pool: ThreadPool,
}

impl Server {
    fn new(listener: TcpListener, router: Router, num_workers: usize) -> Server {
        Server {
            listener,
            router,
            pool: ThreadPool::new(num_workers),
        }
    }

    pub fn from_tcp_addr(addr: &str, num_workers: usize, router: Router) -> anyhow::Result<Server> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("Can't bind address {addr}"))?;
        Ok(Server::new(listener, router, num_workers))
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Listener has no local address")
    }

    pub fn run(self) -> anyhow::Result<()> {
        info!(addr = ?self.listener.local_addr().ok(), "listening");

        let Server {
            listener,
            router,
            pool,
        } = self;
        serve(listener.incoming(), Arc::new(router), pool)
    }
}

// The pool is owned here rather than shared with the jobs, so its drop (which
// joins every worker) always runs on the accepting thread.
fn serve(
    incoming: impl Iterator<Item = io::Result<TcpStream>>,
    router: Arc<Router>,
    pool: ThreadPool,
) -> anyhow::Result<()> {
    for stream in incoming {
        let stream = stream.context("Error listening")?;
        let router = Arc::clone(&router);
        pool.execute(move || process_incoming(&router, stream))?;
    }
    Ok(())
}

fn process_incoming(router: &Router, mut stream: TcpStream) {
    let peer = stream.peer_addr().ok();
    debug!(?peer, "accepted new connection");

    if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        warn!(?peer, error = %e, "can't set read timeout");
        return;
    }

    let response = match read_request(&mut stream) {
        Ok(request) => router.dispatch(&request),
        Err(e) => {
            warn!(?peer, error = %e, "malformed request");
            http::bad_request()
        }
    };

    if let Err(e) = stream.write_all(&serialize_response(&response)) {
        warn!(?peer, error = %e, "failed to write response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use std::io::Read;
    use std::iter;
    use std::thread;

    #[test]
    fn listener_failure_finishes_in_flight_connections() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(api::router().unwrap());

        let accepting = thread::spawn(move || {
            let incoming = listener
                .incoming()
                .take(1)
                .chain(iter::once(Err(io::Error::other("listener failed"))));
            serve(incoming, router, ThreadPool::new(2))
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /api/users HTTP/1.1\r\n\r\n").unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");

        let err = accepting.join().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Error listening");
    }
}
