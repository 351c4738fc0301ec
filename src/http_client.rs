//! Shared HTTP agent and bounded response helpers.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Status and body of a finished request, whatever the status class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpOutcome {
    pub status: u16,
    pub body: String,
}

impl HttpOutcome {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Return the shared HTTP agent.
///
/// Only connecting is bounded; reads wait for the backend, which may need to
/// cold-start before answering.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .user_agent(concat!("deeptone/", env!("CARGO_PKG_VERSION")))
            .build()
    })
}

/// Collapse a ureq call result into status + body, keeping error statuses.
///
/// Only transport failures are returned as `Err`.
pub(crate) fn into_outcome(
    result: Result<ureq::Response, ureq::Error>,
    max_bytes: usize,
) -> Result<HttpOutcome, String> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(err.to_string()),
    };
    let status = response.status();
    let body = read_body_limited(response, max_bytes)?;
    Ok(HttpOutcome { status, body })
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = read_response_bytes(response, max_bytes).map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc::{self, Receiver};
    use std::thread;
    use std::time::Duration;

    /// Serve one canned HTTP response and hand back the raw request text.
    pub(crate) fn serve_once(response: String) -> (String, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = tx.send(request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}"), rx)
    }

    /// Build a complete response with a JSON body.
    pub(crate) fn json_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
        let mut data = Vec::new();
        let mut buf = [0u8; 8192];
        loop {
            let read = match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(read) => read,
            };
            data.extend_from_slice(&buf[..read]);
            if request_complete(&data) {
                break;
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn request_complete(data: &[u8]) -> bool {
        let text = String::from_utf8_lossy(data);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        data.len() >= header_end + 4 + content_length
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{json_response, serve_once};
    use super::*;

    #[test]
    fn read_response_bytes_rejects_content_length_over_max() {
        let response = concat!(
            "HTTP/1.1 200 OK\r\n",
            "Content-Length: 100\r\n",
            "\r\n",
            "ok"
        )
        .to_string();
        let (url, _) = serve_once(response);
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_response_bytes_rejects_body_over_max() {
        let body = "a".repeat(32);
        let (url, _) = serve_once(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn outcome_keeps_error_status_and_body() {
        let (url, _) = serve_once(json_response("401 UNAUTHORIZED", r#"{"error":"nope"}"#));
        let outcome = into_outcome(agent().get(&url).call(), 1024).unwrap();
        assert_eq!(outcome.status, 401);
        assert!(!outcome.is_success());
        assert_eq!(outcome.body, r#"{"error":"nope"}"#);
    }

    #[test]
    fn outcome_reports_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = into_outcome(agent().get(&format!("http://{addr}")).call(), 1024).unwrap_err();
        assert!(!err.is_empty());
    }
}
