//! Reconciliation of inbound edit payloads into the slide document.
//!
//! The chat channel carries both plain chat text and JSON edit envelopes
//! (`{"type": "edit", ...}`). [`classify_edit`] decides what one raw message
//! means against the current document and, for a well-formed remote edit,
//! produces the mutated document. [`EditListener`] walks the append-only
//! message log exactly once per entry, in arrival order, and publishes the
//! applied documents.

#[cfg(test)]
#[path = "edits_test.rs"]
mod edits_test;

use std::collections::HashSet;

use serde_json::Value;

use crate::state::slides::{SlideDocument, SlidesState};
use crate::store::Subject;

/// Outcome of classifying one raw inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// A well-formed remote edit; holds the new document. Unaffected slides
    /// are value-copied, only the target slide is replaced.
    Applied(SlideDocument),
    /// Authored by the local client; already applied optimistically at the
    /// point of authorship, so ignored here to suppress the feedback loop.
    SkippedSelf,
    /// Not JSON, or JSON without an `"edit"` type tag: plain chat traffic.
    SkippedUnparseable,
    /// Edit envelope with a malformed shape or a value of the wrong type.
    SkippedInvalid,
    /// `slide_index` (or a `content.<N>` index) outside the current document.
    SkippedOutOfRange,
}

/// Classify one raw message and, when it is a well-formed remote edit,
/// produce the mutated document.
///
/// Never fails: everything that cannot be applied maps to a skip outcome,
/// since the same channel legitimately carries non-edit chat text.
pub fn classify_edit(
    raw: &str,
    local_client_id: Option<&str>,
    document: Option<&SlideDocument>,
) -> EditOutcome {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return EditOutcome::SkippedUnparseable;
    };
    if value.get("type").and_then(Value::as_str) != Some("edit") {
        return EditOutcome::SkippedUnparseable;
    }

    let author = value.get("client_id").and_then(Value::as_str);
    if author.is_some() && author == local_client_id {
        return EditOutcome::SkippedSelf;
    }

    let Some(slide_index) = value.get("slide_index").and_then(Value::as_i64) else {
        return EditOutcome::SkippedInvalid;
    };
    let Some(field) = value.get("field").and_then(Value::as_str) else {
        return EditOutcome::SkippedInvalid;
    };
    let Some(new_value) = value.get("value") else {
        return EditOutcome::SkippedInvalid;
    };

    let Some(doc) = document else {
        log::warn!("edit for slide {slide_index} dropped: no document loaded");
        return EditOutcome::SkippedOutOfRange;
    };
    let index = match usize::try_from(slide_index) {
        Ok(i) if i < doc.slides.len() => i,
        _ => {
            log::warn!(
                "edit dropped: slide {slide_index} out of range (document has {} slides)",
                doc.slides.len()
            );
            return EditOutcome::SkippedOutOfRange;
        }
    };

    apply_field(doc, index, field, new_value)
}

/// Produce a new document with `field` on slide `index` replaced.
fn apply_field(doc: &SlideDocument, index: usize, field: &str, value: &Value) -> EditOutcome {
    let mut next = doc.clone();
    let slide = &mut next.slides[index];

    match field {
        "title" => match value.as_str() {
            Some(title) => slide.title = title.to_owned(),
            None => return EditOutcome::SkippedInvalid,
        },
        "theme" => match value.as_str() {
            Some(theme) => slide.theme = theme.to_owned(),
            None => return EditOutcome::SkippedInvalid,
        },
        "content" => match string_sequence(value) {
            Some(content) => slide.content = content,
            None => return EditOutcome::SkippedInvalid,
        },
        _ => {
            if let Some(n) = content_element_index(field) {
                if n >= slide.content.len() {
                    log::warn!(
                        "edit dropped: content index {n} out of range (slide has {} items)",
                        slide.content.len()
                    );
                    return EditOutcome::SkippedOutOfRange;
                }
                match value.as_str() {
                    Some(item) => slide.content[n] = item.to_owned(),
                    None => return EditOutcome::SkippedInvalid,
                }
            }
            // Unrecognized fields are tolerated as a no-op; the message is
            // still consumed.
        }
    }

    EditOutcome::Applied(next)
}

/// Parse `content.<N>` into `N`. Only plain decimal digits qualify.
fn content_element_index(field: &str) -> Option<usize> {
    let digits = field.strip_prefix("content.")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn string_sequence(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(ToOwned::to_owned))
        .collect()
}

/// Applies the append-only message log to the slides state, exactly once per
/// entry and strictly in arrival order.
#[derive(Debug, Default)]
pub struct EditListener {
    /// High-water mark: count of log entries already reconciled.
    processed: usize,
    /// Belt-and-suspenders dedup keyed by (log index, raw content), so the
    /// exact same message is never reapplied even across a log reset.
    seen: HashSet<(usize, String)>,
}

impl EditListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of log entries reconciled so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Reconcile entries appended since the last drain and publish any
    /// applied documents. Returns the outcome for each newly processed
    /// entry, in log order.
    pub fn drain(
        &mut self,
        log: &[String],
        local_client_id: Option<&str>,
        slides: &Subject<SlidesState>,
    ) -> Vec<EditOutcome> {
        if log.len() < self.processed {
            // The log was cleared by a disconnect; start over. The dedup set
            // still guards against replaying identical entries.
            self.processed = 0;
        }

        let mut outcomes = Vec::new();
        for index in self.processed..log.len() {
            let raw = &log[index];
            let key = (index, raw.clone());
            if self.seen.contains(&key) {
                continue;
            }

            let current = slides.get().document;
            let outcome = classify_edit(raw, local_client_id, current.as_ref());
            if let EditOutcome::Applied(next) = &outcome {
                let next = next.clone();
                slides.update(|s| s.document = Some(next));
            }

            self.seen.insert(key);
            outcomes.push(outcome);
        }
        self.processed = log.len();
        outcomes
    }

    /// Forget dedup tracking. Called when the document is replaced wholesale
    /// by a new fetch; the high-water mark is kept so already-consumed log
    /// entries are never replayed against the new document.
    pub fn reset_dedup(&mut self) {
        self.seen.clear();
    }
}
