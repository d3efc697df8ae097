use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Notify};

use crate::api::ChatMessage;
use crate::core::backend::ChatBackend;
use crate::core::config::Config;
use crate::core::errors::ExchangeError;
use crate::core::settings::ClientSettings;

pub fn test_settings(api_base: &str) -> ClientSettings {
    let config = Config {
        api_base: Some(api_base.to_string()),
        system_prompt: Some("test prompt".to_string()),
        request_timeout_secs: None,
    };
    ClientSettings::resolve_with_env(&config, None, None)
}

/// Replies from a fixed script and records every context it was given.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, ExchangeError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedBackend {
    pub fn new(script: impl IntoIterator<Item = Result<String, ExchangeError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Each call waits for one `notify_one` on the returned handle before replying.
    pub fn gated(
        script: impl IntoIterator<Item = Result<String, ExchangeError>>,
    ) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut backend = Self::new(script);
        backend.gate = Some(Arc::clone(&gate));
        (backend, gate)
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, context: Vec<ChatMessage>) -> Result<String, ExchangeError> {
        self.calls.lock().unwrap().push(context);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExchangeError::unknown("script exhausted")))
    }
}

pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

pub struct MockServer {
    pub base_url: String,
    captured: oneshot::Receiver<CapturedRequest>,
}

impl MockServer {
    pub async fn request(self) -> CapturedRequest {
        self.captured.await.expect("mock server should capture a request")
    }
}

/// Accept one HTTP request on a loopback port and answer it with `status` and `body`.
pub async fn serve_once(status: &str, body: &str) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let (tx, rx) = oneshot::channel();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept should succeed");
        let captured = read_http_request(&mut stream)
            .await
            .expect("request should parse");
        stream
            .write_all(response.as_bytes())
            .await
            .expect("response should write");
        let _ = stream.shutdown().await;
        let _ = tx.send(captured);
    });

    MockServer {
        base_url: format!("http://{addr}"),
        captured: rx,
    }
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}
