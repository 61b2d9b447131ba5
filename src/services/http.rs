use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use std::{thread, time::Duration};

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 500;
const TIMEOUT_SECS: u64 = 30;

pub fn new_client() -> Result<Client, String> {
    Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| e.to_string())
}

fn backoff(attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = BASE_DELAY_MS * (2_u64.pow(attempt as u32)) + jitter;
    Duration::from_millis(ms)
}

fn should_retry_http(status: StatusCode) -> bool {
    // 408/429/5xx tipicamente são temporários
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

/// GET com até 3 tentativas e backoff exponencial com jitter.
/// Status 4xx (fora 408/429) não é transitório: falha direto.
pub fn get_with_retry(client: &Client, endpoint: &str) -> Result<String, String> {
    let mut last_err: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        match client.get(endpoint).send() {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    match resp.text() {
                        Ok(text) => return Ok(text),
                        Err(err) => last_err = Some(err.to_string()),
                    }
                } else {
                    last_err = Some(format!("HTTP {} from {}", status.as_u16(), endpoint));
                    if !should_retry_http(status) {
                        break;
                    }
                }
            }
            Err(err) => last_err = Some(err.to_string()),
        }

        if attempt + 1 < MAX_RETRIES {
            thread::sleep(backoff(attempt));
        }
    }

    Err(last_err.unwrap_or_else(|| format!("request failed: {endpoint}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Servidor mínimo: responde sempre o mesmo status e conta os requests.
    fn serve_status(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(s) => s,
                    Err(_) => break,
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{addr}/collection/views.json"), hits)
    }

    #[test]
    fn only_transient_statuses_are_retryable() {
        for code in [408, 429, 500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(should_retry_http(status), "expected retry for {code}");
        }

        for code in [400, 403, 404, 410] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!should_retry_http(status), "expected no retry for {code}");
        }
    }

    #[test]
    fn success_returns_body_on_first_attempt() {
        let (endpoint, hits) = serve_status("200 OK", "{}");
        let client = new_client().unwrap();

        let body = get_with_retry(&client, &endpoint).unwrap();
        assert_eq!(body, "{}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn non_retryable_status_fails_after_a_single_attempt() {
        let (endpoint, hits) = serve_status("404 Not Found", "");
        let client = new_client().unwrap();

        let err = get_with_retry(&client, &endpoint).unwrap_err();
        assert!(err.contains("404"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn server_errors_are_retried_up_to_the_attempt_limit() {
        let (endpoint, hits) = serve_status("503 Service Unavailable", "");
        let client = new_client().unwrap();

        let err = get_with_retry(&client, &endpoint).unwrap_err();
        assert!(err.contains("503"));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES);
    }
}
