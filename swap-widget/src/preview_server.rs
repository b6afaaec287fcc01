//! Preview server for the swap widget
//!
//! Serves the built widget from `dist/` on port 8080. `/preview` renders a host page
//! that frames the widget (query options are forwarded to the frame) and follows the
//! resize messages it posts.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};

use shared::dto::WIDGET_MESSAGE_ID;

const ADDR: &str = "127.0.0.1:8080";

fn main() {
    let listener = match TcpListener::bind(ADDR) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", ADDR, e);
            std::process::exit(1);
        }
    };

    println!("Swap widget preview running at http://{}", ADDR);
    println!("  widget:      http://{}/?theme=dark", ADDR);
    println!("  framed host: http://{}/preview?theme=dark", ADDR);
    println!("Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle_client(stream),
            Err(e) => eprintln!("Connection error: {}", e),
        }
    }
}

fn handle_client(mut stream: TcpStream) {
    let buf_reader = BufReader::new(&mut stream);
    let request_line = match buf_reader.lines().next() {
        Some(Ok(line)) => line,
        _ => {
            eprintln!("Failed to read request line");
            return;
        }
    };

    let full_path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (path, query) = match full_path.split_once('?') {
        Some((p, q)) => (p, q),
        None => (full_path, ""),
    };

    let (status, content_type, body) = if path == "/preview" {
        ("200 OK", "text/html; charset=utf-8", preview_page(query).into_bytes())
    } else {
        serve_dist(path)
    };

    let headers = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nAccess-Control-Allow-Origin: *\r\nContent-Length: {}\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    if let Err(e) = stream.write_all(headers.as_bytes()) {
        eprintln!("Failed to write headers: {}", e);
        return;
    }
    if let Err(e) = stream.write_all(&body) {
        eprintln!("Failed to write body: {}", e);
    }
    let _ = stream.flush();
}

fn serve_dist(path: &str) -> (&'static str, &'static str, Vec<u8>) {
    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return ("403 FORBIDDEN", "text/plain", b"forbidden".to_vec());
    }

    let mut file_path = PathBuf::from("dist");
    file_path.push(relative);
    if relative.is_empty() || file_path.is_dir() || !file_path.exists() {
        file_path = PathBuf::from("dist/index.html");
    }

    match fs::read(&file_path) {
        Ok(contents) => ("200 OK", content_type(&file_path), contents),
        Err(_) => {
            eprintln!("File not found: {}", file_path.display());
            (
                "404 NOT FOUND",
                "text/html",
                b"<!DOCTYPE html><html><body><h1>Not found. Run `trunk build` in swap-widget/ first.</h1></body></html>".to_vec(),
            )
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Host page: one iframe plus a listener that applies and logs every reported height.
fn preview_page(query: &str) -> String {
    let src = if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Swap widget preview</title>
  <style>
    body {{ font-family: sans-serif; background: #f5f6fc; display: flex; gap: 2rem; padding: 2rem; }}
    iframe {{ border: none; width: 400px; height: 360px; transition: height 0.1s; }}
    #log {{ font-family: monospace; font-size: 12px; white-space: pre; }}
  </style>
</head>
<body>
  <iframe id="widget" src="{src}"></iframe>
  <div id="log"></div>
  <script>
    const frame = document.getElementById("widget");
    const log = document.getElementById("log");
    window.addEventListener("message", (event) => {{
      const data = event.data || {{}};
      if (data.id !== "{id}") return;
      frame.style.height = data.iframeHeight + "px";
      log.textContent = new Date().toISOString() + " height=" + data.iframeHeight + "\n" + log.textContent;
    }});
  </script>
</body>
</html>
"#,
        src = src.replace('"', "&quot;"),
        id = WIDGET_MESSAGE_ID,
    )
}
