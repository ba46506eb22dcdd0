use chrono::{Local, NaiveDate};
use log::{debug, error, info, warn};
use tiny_http::{Header, Method, Response, Server};

use crate::config::Config;
use crate::page::PageRenderer;
use crate::page::html::to_html;
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn new(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }
}

/// Answers one request URL (path plus optional query). The dashboard page is
/// rebuilt from disk on every call.
pub fn handle(config: &Config, today: NaiveDate, url: &str) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    match path {
        "/" | "/index.html" => {
            let renderer = PageRenderer::new(config, today);
            let selection = Selection::from_query(query, renderer.days());
            let page = renderer.render(&selection);

            let status = if page.is_ok() { 200 } else { 500 };
            Reply::new(status, "text/html; charset=utf-8", to_html(&page))
        }
        "/health" => Reply::new(200, "text/plain", "ok"),
        _ => Reply::new(404, "text/plain", "Not found"),
    }
}

/// Serves the dashboard until the process is stopped. Requests are handled
/// one at a time on the calling thread.
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let address = config.address();
    let server = Server::http(address)
        .map_err(|e| format!("Failed to start server on {}: {}", address, e))?;

    info!("Serving sea ice dashboard at http://{}", address);
    info!("Reading results from {}", config.data_dir().display());

    for request in server.incoming_requests() {
        debug!("{} {}", request.method(), request.url());

        let reply = if *request.method() == Method::Get {
            handle(config, Local::now().date_naive(), request.url())
        } else {
            Reply::new(405, "text/plain", "Method not allowed")
        };

        if reply.status >= 500 {
            warn!("{} answered with {}", request.url(), reply.status);
        }

        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        match Header::from_bytes("Content-Type", reply.content_type) {
            Ok(header) => response = response.with_header(header),
            Err(()) => error!("Invalid content type {}", reply.content_type),
        }

        if let Err(e) = request.respond(response) {
            error!("Failed to send response: {}", e);
        }
    }

    Ok(())
}
