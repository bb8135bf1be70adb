// src/test_support.rs
//! In-process HTTP fixture serving canned export responses.

use serde_json::{json, Value};
use reqwest::Url;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

type RequestLog = Arc<Mutex<Vec<(Option<String>, Option<String>)>>>;

/// Wraps a JSON payload the way the export endpoint does.
pub fn export_body(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
}

/// Export response for a sheet with the given column labels and text cells.
pub fn export_table(labels: &[&str], rows: &[&[&str]]) -> String {
    let cols: Vec<Value> = labels.iter().map(|l| json!({ "label": l })).collect();
    let rows: Vec<Value> = rows
        .iter()
        .map(|row| json!({ "c": row.iter().map(|v| json!({ "v": v })).collect::<Vec<_>>() }))
        .collect();
    export_body(&json!({ "status": "ok", "table": { "cols": cols, "rows": rows } }).to_string())
}

/// Endpoint on a port nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/gviz/tq")
}

enum Route {
    Reply { content_type: String, body: Vec<u8> },
    /// Closes the connection without writing a response.
    Hangup,
}

#[derive(Default)]
pub struct TestServer {
    routes: HashMap<String, Route>,
}

pub struct RunningServer {
    addr: SocketAddr,
    log: RequestLog,
}

impl TestServer {
    pub fn start() -> Self {
        TestServer::default()
    }

    pub fn sheet(mut self, name: &str, body: String) -> Self {
        self.routes.insert(
            format!("sheet:{name}"),
            Route::Reply {
                content_type: "text/plain".to_string(),
                body: body.into_bytes(),
            },
        );
        self
    }

    /// Requests for this sheet get their connection dropped with no response.
    pub fn dropped_sheet(mut self, name: &str) -> Self {
        self.routes.insert(format!("sheet:{name}"), Route::Hangup);
        self
    }

    pub fn file(mut self, path: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.routes.insert(
            path.to_string(),
            Route::Reply {
                content_type: content_type.to_string(),
                body: bytes,
            },
        );
        self
    }

    pub async fn serve(self) -> RunningServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let routes = Arc::new(self.routes);
        let log: RequestLog = Arc::default();
        let requests = log.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => {
                                buf.extend_from_slice(&chunk[..n]);
                                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                    break;
                                }
                            }
                        }
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let target = request.split_whitespace().nth(1).unwrap_or("/");
                    let url = Url::parse(&format!("http://fixture{target}")).expect("request target");
                    let sheet = query_param(&url, "sheet");

                    let key = match &sheet {
                        Some(name) => {
                            log.lock()
                                .await
                                .push((sheet.clone(), query_param(&url, "tqx")));
                            format!("sheet:{name}")
                        }
                        None => url.path().to_string(),
                    };

                    let response = match routes.get(&key) {
                        Some(Route::Reply { content_type, body }) => {
                            http_response("200 OK", content_type, body)
                        }
                        Some(Route::Hangup) => {
                            let _ = stream.shutdown().await;
                            return;
                        }
                        None => http_response("404 Not Found", "text/plain", b"not found"),
                    };
                    let _ = stream.write_all(&response).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        RunningServer { addr, log: requests }
    }
}

impl RunningServer {
    pub fn endpoint(&self) -> String {
        format!("http://{}/gviz/tq", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// `(sheet, tqx)` for every sheet request seen so far.
    pub async fn requests(&self) -> Vec<(Option<String>, Option<String>)> {
        self.log.lock().await.clone()
    }
}

fn http_response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    out.extend_from_slice(body);
    out
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
