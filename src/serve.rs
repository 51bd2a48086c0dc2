//! Local web server for the tree page

use log::{info, warn};
use thiserror::Error;
use tiny_http::{Header, Response, Server};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to start server on port {port}: {reason}")]
    StartError { port: u16, reason: String },
}

/// Rendered page and its data, ready to serve
#[derive(Debug, Clone)]
pub struct TreePage {
    pub html: String,
    pub json: String,
}

/// A routed response before it is handed to the HTTP layer
#[derive(Debug, PartialEq)]
struct Reply<'a> {
    status: u16,
    content_type: &'static str,
    body: &'a str,
}

fn route<'a>(url: &str, page: &'a TreePage) -> Reply<'a> {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    match path {
        "/" | "/index.html" => Reply {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: &page.html,
        },
        "/tree.json" => Reply {
            status: 200,
            content_type: "application/json",
            body: &page.json,
        },
        _ => Reply {
            status: 404,
            content_type: "text/plain",
            body: "Not found",
        },
    }
}

/// Serve `page` on localhost until the process is stopped
pub fn serve(page: &TreePage, port: u16, open_browser: bool) -> Result<(), ServeError> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| ServeError::StartError {
        port,
        reason: e.to_string(),
    })?;

    let url = format!("http://localhost:{}", port);
    info!("Serving phylogenetic tree at {}", url);
    info!("Press Ctrl+C to stop the server");

    if open_browser && webbrowser::open(&url).is_err() {
        warn!("Could not open browser automatically. Please visit: {}", url);
    }

    for request in server.incoming_requests() {
        let reply = route(request.url(), page);
        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) = Header::from_bytes("Content-Type", reply.content_type) {
            response = response.with_header(header);
        }

        if let Err(e) = request.respond(response) {
            warn!("Failed to send response: {}", e);
        }
    }

    Ok(())
}
