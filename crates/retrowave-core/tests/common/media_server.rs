//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies per path (query strings ignored), 404 for anything
//! else, and can stall selected paths to exercise transfer timeouts or answer
//! 503 for the first few requests to exercise retries. Counts
//! GET requests per path so tests can assert that skips hit no network.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep this long before answering.
    pub stall: Option<Duration>,
    /// Answer 503 to this many requests before serving the route.
    pub busy_for: usize,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            stall: None,
            busy_for: 0,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {}", status).into_bytes(),
            stall: None,
            busy_for: 0,
        }
    }

    pub fn stalled(stall: Duration) -> Self {
        Self {
            status: 200,
            body: b"late".to_vec(),
            stall: Some(stall),
            busy_for: 0,
        }
    }

    /// Serves `body` after answering 503 to the first `busy_for` requests.
    pub fn busy_then_ok(busy_for: usize, body: impl Into<Vec<u8>>) -> Self {
        Self {
            busy_for,
            ..Self::ok(body)
        }
    }
}

pub struct MediaServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl MediaServer {
    /// Starts a server in a background thread. Runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(HashMap::new()));
        let hits_srv = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&hits_srv);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            hits,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of GET requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();
    let seen = {
        let mut hits = hits.lock().unwrap();
        let n = hits.entry(path.clone()).or_insert(0);
        *n += 1;
        *n
    };

    let mut route = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Route::status(404));
    if seen <= route.busy_for {
        route = Route::status(503);
    }
    if let Some(stall) = route.stall {
        thread::sleep(stall);
    }
    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
}
