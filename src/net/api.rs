//! HTTP client for the slide-generation endpoint.
//!
//! ERROR HANDLING
//! ==============
//! A failed generate call publishes the error message, clears the current
//! document, and returns `Err` to the caller; the loading flag is released
//! on every exit path. Non-2xx bodies are probed for a structured
//! `{"detail": ...}` message before falling back to a status-derived one.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use crate::error::ClientError;
use crate::state::slides::{SlideDocument, SlidesState};
use crate::store::Subject;

/// Raw outcome of one HTTP exchange, independent of the transport that
/// produced it.
pub struct HttpResponse {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

/// Slide-generation API client. Publishes document, loading, and error
/// state through the shared slides subject.
#[derive(Clone)]
pub struct SlideApi {
    slides: Subject<SlidesState>,
}

impl SlideApi {
    #[must_use]
    pub fn new(slides: Subject<SlidesState>) -> Self {
        Self { slides }
    }

    #[must_use]
    pub fn slides(&self) -> &Subject<SlidesState> {
        &self.slides
    }

    /// POST `/api/generate-slides` and publish the outcome.
    ///
    /// # Errors
    ///
    /// Returns the message that was also published to the error state when
    /// the request or the response body fails.
    #[cfg(feature = "browser")]
    pub async fn generate(&self, prompt: &str) -> Result<SlideDocument, ClientError> {
        self.generate_via(prompt, |body| async move {
            let resp = gloo_net::http::Request::post("/api/generate-slides")
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = resp.status();
            let ok = resp.ok();
            let body = resp.text().await.map_err(|e| e.to_string())?;
            Ok(HttpResponse { status, ok, body })
        })
        .await
    }

    /// Transport-independent core of [`generate`](Self::generate).
    ///
    /// Publishes `loading = true` before invoking the transport and releases
    /// it on every exit path. Success publishes the parsed document and
    /// resolves with the same value; failure publishes the error, clears the
    /// document, and returns `Err`.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub async fn generate_via<F, Fut>(
        &self,
        prompt: &str,
        transport: F,
    ) -> Result<SlideDocument, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<HttpResponse, String>>,
    {
        self.slides.update(|s| {
            s.error = None;
            s.loading = true;
        });

        let body = serde_json::json!({ "query": prompt }).to_string();
        let outcome = match transport(body).await {
            Err(message) => Err(message),
            Ok(resp) if !resp.ok => Err(error_detail(resp.status, &resp.body)),
            Ok(resp) => serde_json::from_str::<SlideDocument>(&resp.body)
                .map_err(|e| format!("invalid slide payload: {e}")),
        };

        match outcome {
            Ok(doc) => {
                self.slides.update(|s| {
                    s.document = Some(doc.clone());
                    s.loading = false;
                });
                Ok(doc)
            }
            Err(message) => {
                self.slides.update(|s| {
                    s.document = None;
                    s.error = Some(message.clone());
                    s.loading = false;
                });
                Err(ClientError::Network(message))
            }
        }
    }
}

/// Backend health probe response from `GET /api/status`.
#[derive(Clone, Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Fetch the backend health message from `/api/status`.
/// Returns `None` on any failure or outside the browser.
pub async fn fetch_status() -> Option<StatusResponse> {
    #[cfg(feature = "browser")]
    {
        let resp = gloo_net::http::Request::get("/api/status").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<StatusResponse>().await.ok()
    }
    #[cfg(not(feature = "browser"))]
    {
        None
    }
}

/// Derive a user-facing message from a non-2xx response, preferring the
/// structured `{"detail": ...}` body.
fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(ToOwned::to_owned))
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}
