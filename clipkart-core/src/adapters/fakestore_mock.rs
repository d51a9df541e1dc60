//! Mock catalog API server for testing
//!
//! Serves `GET /products` with the same JSON shape as the Fake Store API so
//! the HTTP client can be tested without network access.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::json;

/// Mock catalog server for testing
pub struct MockCatalogServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of products to generate
    pub num_products: usize,
    /// HTTP status to answer with
    pub status: u16,
    /// Raw body to send instead of generated products
    pub body: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_products: 20,
            status: 200,
            body: None,
        }
    }
}

impl MockCatalogServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        requests_clone.fetch_add(1, Ordering::SeqCst);
                        let cfg = config.clone();
                        thread::spawn(move || handle_connection(stream, &cfg));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Full URL of the products endpoint
    pub fn products_url(&self) -> String {
        format!("http://127.0.0.1:{}/products", self.port)
    }

    /// Number of connections accepted so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockCatalogServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 4096];
    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    let (method, path) = match parts.as_slice() {
        [method, path, ..] => (*method, *path),
        _ => {
            send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
            return;
        }
    };

    let path = path.split('?').next().unwrap_or(path);
    if method != "GET" || path != "/products" {
        send_response(&mut stream, 404, r#"{"error": "Not found"}"#);
        return;
    }

    let body = config
        .body
        .clone()
        .unwrap_or_else(|| generate_mock_products(config.num_products).to_string());
    send_response(&mut stream, config.status, &body);
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Products shaped like the real API, ids starting at 1
pub fn generate_mock_products(count: usize) -> serde_json::Value {
    let categories = ["men's clothing", "jewelery", "electronics", "women's clothing"];
    let products: Vec<serde_json::Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Mock product {}", id),
                "price": 10.5 + id as f64,
                "description": format!("Description of mock product {}", id),
                "category": categories[id % categories.len()],
                "image": format!("https://fakestoreapi.com/img/{}.jpg", id),
                "rating": { "rate": 4.1, "count": 100 + id }
            })
        })
        .collect();
    serde_json::Value::Array(products)
}
