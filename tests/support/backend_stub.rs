use std::{
    collections::HashMap,
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

/// A request as seen by the stub backend.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Local HTTP server answering fixed routes with canned JSON.
pub struct BackendStub {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl BackendStub {
    /// Serve `routes`, keyed by `"METHOD /path"`, until the test process exits.
    pub fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub backend");
        let url = format!("http://{}", listener.local_addr().expect("stub address"));
        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(route, status, body)| (route.to_string(), (status, body.to_string())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let request = read_request(&mut stream);
                let key = format!("{} {}", request.method, request.path);
                let (status, body) = routes
                    .get(&key)
                    .cloned()
                    .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));
                recorded.lock().unwrap().push(request);
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        let read = match stream.read(&mut buf) {
            Ok(0) | Err(_) => break find_header_end(&data).unwrap_or(data.len()),
            Ok(read) => read,
        };
        data.extend_from_slice(&buf[..read]);
        if let Some(end) = find_header_end(&data) {
            break end;
        }
    };
    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = (header_end + 4).min(data.len());
    while data.len() < body_start + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(read) => data.extend_from_slice(&buf[..read]),
        }
    }
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    RecordedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&data[body_start..]).to_string(),
    }
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}
