#[cfg(test)]
#[path = "slides_test.rs"]
mod slides_test;

use serde::{Deserialize, Serialize};

/// A single slide. Its index within the document is its identity; there is
/// no stable id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub theme: String,
}

/// The full ordered collection of slides currently displayed.
///
/// Replaced wholesale by a successful generate call; mutated field-by-field
/// by the edit reconciler.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDocument {
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// Slide-fetch state published for the UI: the current document, the
/// in-flight flag for the one-shot generate call, and the last fetch error.
#[derive(Clone, Debug, Default)]
pub struct SlidesState {
    pub document: Option<SlideDocument>,
    pub loading: bool,
    pub error: Option<String>,
}
