#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use opportunity_finder::config::{InferenceConfig, InferenceMode, SourcesConfig};

#[derive(Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    /// Accept the connection and never answer
    Hang,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Reply::Respond {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Reply::Respond {
            status,
            body: body.to_string(),
        }
    }
}

/// Minimal HTTP/1.1 server that answers every request with the same reply.
pub struct StubServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let url = format!("http://{}", listener.local_addr().expect("stub addr"));
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (hits_task, requests_task) = (hits.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                hits_task.fetch_add(1, Ordering::SeqCst);
                let reply = reply.clone();
                let requests = requests_task.clone();
                tokio::spawn(async move { serve(socket, reply, requests).await });
            }
        });

        Self {
            url,
            hits,
            requests,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw text of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn serve(mut socket: TcpStream, reply: Reply, requests: Arc<Mutex<Vec<String>>>) {
    let request = read_request(&mut socket).await;
    requests.lock().expect("requests lock").push(request);

    match reply {
        Reply::Respond { status, body } => {
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        Reply::Hang => tokio::time::sleep(Duration::from_secs(30)).await,
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::from_utf8_lossy(&buf).into_owned(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn sources_config(github_url: &str, backend_url: Option<&str>) -> SourcesConfig {
    SourcesConfig {
        github_api_url: github_url.to_string(),
        github_token: None,
        backend_url: backend_url.map(str::to_string),
        timeout_seconds: 5,
        synthetic_count: 0,
    }
}

pub fn inference_config(url: &str, mode: InferenceMode, token: Option<&str>) -> InferenceConfig {
    InferenceConfig {
        mode,
        url: Some(url.to_string()),
        model: "test-model".to_string(),
        api_token: token.map(str::to_string),
        timeout_seconds: 5,
    }
}

pub fn github_repos(count: u64) -> serde_json::Value {
    let items: Vec<_> = (1..=count)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("repo-{}", id),
                "owner": { "login": "octo", "avatar_url": "https://avatars.example/octo" },
                "created_at": "2024-01-01T00:00:00Z",
                "description": "Friendly project",
                "html_url": format!("https://github.com/octo/repo-{}", id),
                "language": "Rust",
                "topics": ["good-first-issue"]
            })
        })
        .collect();
    serde_json::json!({ "total_count": count, "items": items })
}
