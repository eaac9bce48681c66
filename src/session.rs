//! Connection context for one collaborative editing session.
//!
//! DESIGN
//! ======
//! `SlideSession` replaces module-level mutable state with an explicit
//! context object: it owns the chat socket, the slide API client, and the
//! edit reconciler, and wires the socket's message log into the reconciler.
//! Construct once in the UI shell; `disconnect` tears the transport down.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::edits::EditListener;
use crate::error::ClientError;
use crate::net::api::{HttpResponse, SlideApi};
use crate::net::socket::ChatSocket;
use crate::state::connection::ConnectionState;
use crate::state::slides::{SlideDocument, SlidesState};
use crate::store::{Subject, Subscription};

pub struct SlideSession {
    socket: ChatSocket,
    api: SlideApi,
    listener: Rc<RefCell<EditListener>>,
    _log_subscription: Subscription,
}

impl Default for SlideSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideSession {
    #[must_use]
    pub fn new() -> Self {
        let slides = Subject::new(SlidesState::default());
        let socket = ChatSocket::new();
        let api = SlideApi::new(slides.clone());
        let listener = Rc::new(RefCell::new(EditListener::new()));

        // Every log publish runs the reconciler over the newly appended
        // entries, reading the local client id untracked.
        let log_subscription = {
            let listener = Rc::clone(&listener);
            let connection = socket.connection().clone();
            socket.messages().subscribe(move |log: &Vec<String>| {
                let local = connection.get().client_id;
                listener.borrow_mut().drain(log, local.as_deref(), &slides);
            })
        };

        Self { socket, api, listener, _log_subscription: log_subscription }
    }

    // ---- published state ----

    #[must_use]
    pub fn slides(&self) -> &Subject<SlidesState> {
        self.api.slides()
    }

    #[must_use]
    pub fn connection(&self) -> &Subject<ConnectionState> {
        self.socket.connection()
    }

    #[must_use]
    pub fn messages(&self) -> &Subject<Vec<String>> {
        self.socket.messages()
    }

    #[must_use]
    pub fn client_id(&self) -> Option<String> {
        self.socket.client_id()
    }

    // ---- chat channel ----

    /// Connect the chat channel under the given client id.
    #[cfg(feature = "browser")]
    pub fn connect(&self, client_id: &str) {
        self.socket.connect(client_id);
    }

    /// Connect under a freshly generated client id; returns the id.
    #[cfg(feature = "browser")]
    pub fn connect_anonymous(&self) -> String {
        let client_id = uuid::Uuid::new_v4().to_string();
        self.socket.connect(&client_id);
        client_id
    }

    pub fn disconnect(&self) {
        self.socket.disconnect();
    }

    /// Send a chat message verbatim.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConnected`] when the chat channel is not open.
    pub fn send_chat(&self, text: &str) -> Result<(), ClientError> {
        self.socket.send(text)
    }

    // ---- slide generation ----

    /// Generate a new slide document from a prompt.
    ///
    /// A successful call replaces the document wholesale, which also resets
    /// the reconciler's dedup tracking.
    ///
    /// # Errors
    ///
    /// Propagates the API failure after publishing it.
    #[cfg(feature = "browser")]
    pub async fn generate(&self, prompt: &str) -> Result<SlideDocument, ClientError> {
        let doc = self.api.generate(prompt).await?;
        self.listener.borrow_mut().reset_dedup();
        Ok(doc)
    }

    /// Transport-independent variant of [`generate`](Self::generate).
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
        let doc = self.api.generate_via(prompt, transport).await?;
        self.listener.borrow_mut().reset_dedup();
        Ok(doc)
    }
}
