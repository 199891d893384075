//! Worker-thread loader for the template listing.
//!
//! One load cycle = one worker thread that resolves a [`TemplateSource`] and
//! sends the outcome back over an mpsc channel. The [`LoadSession`] handle
//! carries the cancellation flag the worker checks before committing, so a
//! view that has been torn down (or reloaded) never receives a late write.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::api::{self, LoadError};
use crate::types::TemplateRecord;

/// Outcome of one load cycle.
pub type LoadResult = Result<Vec<TemplateRecord>, LoadError>;

/// Where a load cycle gets its templates from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Fetch the listing from an HTTP endpoint.
    Remote(String),
    /// Use an already materialized collection. Goes through the same worker
    /// and commit path as a remote fetch.
    Preloaded(Vec<TemplateRecord>),
}

impl TemplateSource {
    #[must_use]
    pub fn remote(endpoint: impl Into<String>) -> Self {
        Self::Remote(endpoint.into())
    }

    fn resolve(self) -> LoadResult {
        match self {
            Self::Remote(endpoint) => api::fetch_listing(&endpoint),
            Self::Preloaded(templates) => Ok(templates),
        }
    }
}

/// Handle for one load cycle's lifetime.
///
/// Cloned into the worker; cancelling marks every clone, and a cancelled
/// worker drops its result instead of committing it.
#[derive(Debug, Clone)]
pub struct LoadSession {
    cancelled: Arc<AtomicBool>,
}

impl LoadSession {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the session as torn down.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Start a load cycle on a worker thread.
///
/// Returns the receiver the UI loop pumps and the session handle it cancels
/// on teardown. The worker sends at most one result.
pub fn spawn(source: TemplateSource) -> (Receiver<LoadResult>, LoadSession) {
    let (tx, rx) = mpsc::channel();
    let session = LoadSession::new();
    let worker_session = session.clone();

    thread::spawn(move || {
        let result = source.resolve();
        commit(result, &worker_session, &tx);
    });

    (rx, session)
}

/// Commit a resolved result unless the session was cancelled meanwhile.
fn commit(result: LoadResult, session: &LoadSession, tx: &Sender<LoadResult>) -> bool {
    if session.is_cancelled() {
        debug!("load cycle cancelled before commit, dropping result");
        return false;
    }

    match &result {
        Ok(templates) => debug!(count = templates.len(), "template listing loaded"),
        Err(error) => warn!(%error, "template listing failed"),
    }

    tx.send(result).is_ok()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::ListingError;

    /// Serve one request with the given body and status on a loopback port.
    fn serve_once(body: &'static str, status: u16) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}/get_memes")
    }

    fn load_from(endpoint: String) -> LoadResult {
        let (rx, _session) = spawn(TemplateSource::remote(endpoint));
        rx.recv_timeout(Duration::from_secs(5)).expect("worker result")
    }

    #[test]
    fn successful_listing_arrives_in_response_order() {
        let endpoint = serve_once(
            r#"{"success":true,"data":{"memes":[
                {"id":1,"name":"Drake","url":"u1"},
                {"id":2,"name":"Doge","url":"u2"}
            ]}}"#,
            200,
        );
        let templates = load_from(endpoint).expect("listing");
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Drake", "Doge"]);
    }

    #[test]
    fn unsuccessful_payload_reports_unexpected_response() {
        let endpoint = serve_once(r#"{"success":false}"#, 200);
        let error = load_from(endpoint).expect_err("listing error");
        assert!(matches!(
            error,
            LoadError::Listing(ListingError::Unsuccessful)
        ));
        assert_eq!(error.user_message(), "Imgflip returned an unexpected response.");
    }

    #[test]
    fn server_error_status_reports_transport_failure() {
        let endpoint = serve_once("oops", 500);
        let error = load_from(endpoint).expect_err("transport error");
        assert!(matches!(error, LoadError::Transport(_)));
        assert_eq!(error.user_message(), "Unable to load meme templates right now.");
    }

    #[test]
    fn refused_connection_reports_transport_failure() {
        // Bind then drop the listener so the port is closed when we dial it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let endpoint = format!("http://{}/get_memes", listener.local_addr().expect("addr"));
        drop(listener);

        let error = load_from(endpoint).expect_err("refused connection");
        assert!(matches!(error, LoadError::Transport(_)));
    }

    #[test]
    fn malformed_body_reports_its_own_message() {
        let endpoint = serve_once("not json", 200);
        let error = load_from(endpoint).expect_err("parse error");
        assert!(matches!(error, LoadError::Unclassified(_)));
        assert!(!error.user_message().is_empty());
    }

    #[test]
    fn cancelled_session_never_commits() {
        let (tx, rx) = mpsc::channel();
        let session = LoadSession::new();
        session.cancel();

        let committed = commit(Ok(Vec::new()), &session, &tx);
        assert!(!committed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn preloaded_source_commits_through_the_same_path() {
        let templates = vec![TemplateRecord::new("1", "Drake", "u1")];
        let (rx, session) = spawn(TemplateSource::Preloaded(templates));
        assert!(!session.is_cancelled());

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("commit");
        assert_eq!(result.expect("templates").len(), 1);
    }
}
