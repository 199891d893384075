//! Boundary with the Imgflip listing API.
//!
//! The response envelope is validated explicitly rather than trusted: every
//! way the payload can deviate from the documented shape maps to a
//! [`ListingError`] variant, and everything the loader can fail with maps to
//! a [`LoadError`] that knows the message the UI should show.

use serde_json::Value;
use thiserror::Error;

use crate::types::TemplateRecord;

/// Endpoint serving the public template listing. `GET`, no parameters.
pub const TEMPLATE_ENDPOINT: &str = "https://api.imgflip.com/get_memes";

/// Ways the listing payload can deviate from the documented envelope.
///
/// All of these surface to the user as the same "unexpected response"
/// message; the variants exist so the boundary is exhaustive and testable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("response has no boolean `success` flag")]
    MissingSuccessFlag,
    #[error("API reported the request as unsuccessful")]
    Unsuccessful,
    #[error("response has no template array at `data.memes`")]
    MissingTemplateList,
    #[error("template entry {index} is malformed: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

/// Why a load cycle failed, with the user-facing message as `Display`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Request rejected in transit or answered with a non-success status.
    #[error("Unable to load meme templates right now.")]
    Transport(#[source] Box<ureq::Error>),
    /// Body arrived but did not carry a successful listing.
    #[error("Imgflip returned an unexpected response.")]
    Listing(#[from] ListingError),
    /// Anything else: unreadable body, malformed JSON.
    #[error("{0}")]
    Unclassified(String),
}

impl LoadError {
    /// Message to record in the error view state.
    ///
    /// Falls back to a generic message when the failure carries no
    /// human-readable text of its own.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Something went wrong.".to_string()
        } else {
            message
        }
    }
}

/// Fetch and decode the template listing from `endpoint`.
///
/// Performs exactly one outbound request. There is no timeout and no retry;
/// callers that care about teardown run this on a worker thread behind a
/// cancellation check.
pub fn fetch_listing(endpoint: &str) -> Result<Vec<TemplateRecord>, LoadError> {
    let response = ureq::get(endpoint)
        .call()
        .map_err(|err| LoadError::Transport(Box::new(err)))?;
    let body = response
        .into_string()
        .map_err(|err| LoadError::Unclassified(err.to_string()))?;
    let payload: Value =
        serde_json::from_str(&body).map_err(|err| LoadError::Unclassified(err.to_string()))?;
    Ok(decode_listing(&payload)?)
}

/// Validate the response envelope and extract the template records.
///
/// The envelope must carry `success: true` and an array at `data.memes`;
/// record order is preserved. A malformed element fails the whole listing,
/// so no partial collection ever reaches the view.
pub fn decode_listing(payload: &Value) -> Result<Vec<TemplateRecord>, ListingError> {
    let success = payload
        .get("success")
        .and_then(Value::as_bool)
        .ok_or(ListingError::MissingSuccessFlag)?;
    if !success {
        return Err(ListingError::Unsuccessful);
    }

    let memes = payload
        .get("data")
        .and_then(|data| data.get("memes"))
        .and_then(Value::as_array)
        .ok_or(ListingError::MissingTemplateList)?;

    memes
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry.clone()).map_err(|err| ListingError::MalformedEntry {
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_template_payload() -> Value {
        json!({
            "success": true,
            "data": {
                "memes": [
                    {"id": 1, "name": "Drake", "url": "u1"},
                    {"id": 2, "name": "Doge", "url": "u2"},
                ],
            },
        })
    }

    #[test]
    fn decodes_listing_in_response_order() {
        let templates = decode_listing(&two_template_payload()).unwrap();
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Drake", "Doge"]);
    }

    #[test]
    fn unsuccessful_flag_is_a_listing_error() {
        let payload = json!({"success": false});
        assert_eq!(decode_listing(&payload), Err(ListingError::Unsuccessful));
    }

    #[test]
    fn missing_or_non_boolean_success_is_a_listing_error() {
        assert_eq!(
            decode_listing(&json!({"data": {"memes": []}})),
            Err(ListingError::MissingSuccessFlag)
        );
        assert_eq!(
            decode_listing(&json!({"success": "yes"})),
            Err(ListingError::MissingSuccessFlag)
        );
    }

    #[test]
    fn missing_or_non_array_list_is_a_listing_error() {
        assert_eq!(
            decode_listing(&json!({"success": true})),
            Err(ListingError::MissingTemplateList)
        );
        assert_eq!(
            decode_listing(&json!({"success": true, "data": {}})),
            Err(ListingError::MissingTemplateList)
        );
        assert_eq!(
            decode_listing(&json!({"success": true, "data": {"memes": "nope"}})),
            Err(ListingError::MissingTemplateList)
        );
    }

    #[test]
    fn malformed_entry_fails_the_whole_listing() {
        let payload = json!({
            "success": true,
            "data": {"memes": [{"id": 1, "url": "u1"}]},
        });
        assert!(matches!(
            decode_listing(&payload),
            Err(ListingError::MalformedEntry { index: 0, .. })
        ));
    }

    #[test]
    fn listing_errors_share_the_unexpected_response_message() {
        let error = LoadError::from(ListingError::Unsuccessful);
        assert_eq!(error.user_message(), "Imgflip returned an unexpected response.");
    }

    #[test]
    fn empty_unclassified_message_falls_back_to_generic_text() {
        let error = LoadError::Unclassified(String::new());
        assert_eq!(error.user_message(), "Something went wrong.");
    }
}
