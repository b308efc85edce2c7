//! The `{status, ...}` wrapper every backend response uses.

use mime::Mime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ConsoleError, ConsoleResult};

#[derive(Deserialize)]
struct RawEnvelope {
    status: Option<String>,
    error: Option<String>,
    message: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// The fields of a successful envelope, minus `status`.
#[derive(Debug, Default)]
pub struct Payload {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Payload {
    /// Deserialize the field the endpoint puts its data under.
    pub fn into_field<T: DeserializeOwned>(mut self, key: &str) -> ConsoleResult<T> {
        let value = self
            .fields
            .remove(key)
            .ok_or_else(|| ConsoleError::protocol(format!("response is missing `{key}`")))?;
        serde_json::from_value(value)
            .map_err(|e| ConsoleError::protocol(format!("malformed `{key}`: {e}")))
    }

    /// The id of a freshly created record, under whichever key the endpoint uses.
    pub fn created_id(&self, key: &str) -> Option<i32> {
        self.fields
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|id| i32::try_from(id).ok())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

pub fn ensure_json(content_type: Option<&str>) -> ConsoleResult<()> {
    let raw = content_type.ok_or_else(|| ConsoleError::protocol("response is not JSON"))?;
    let parsed: Mime = raw
        .parse()
        .map_err(|_| ConsoleError::protocol(format!("invalid content type `{raw}`")))?;

    let is_json = parsed.type_() == mime::APPLICATION
        && (parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON));
    if is_json {
        Ok(())
    } else {
        Err(ConsoleError::protocol(format!(
            "response is not JSON (content type `{raw}`)"
        )))
    }
}

/// Validate the content type, parse the body, and unwrap the envelope.
pub fn open(content_type: Option<&str>, body: &[u8]) -> ConsoleResult<Payload> {
    ensure_json(content_type)?;
    let raw: RawEnvelope = serde_json::from_slice(body)
        .map_err(|e| ConsoleError::protocol(format!("malformed envelope: {e}")))?;

    match raw.status.as_deref() {
        Some("success") => Ok(Payload {
            message: raw.message,
            fields: raw.rest,
        }),
        Some("error") => Err(ConsoleError::Application(
            raw.error
                .or(raw.message)
                .unwrap_or_else(|| "the server reported an error".to_string()),
        )),
        Some(other) => Err(ConsoleError::protocol(format!(
            "unknown envelope status `{other}`"
        ))),
        None => Err(ConsoleError::protocol("envelope has no status")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DropdownItem;

    const JSON: Option<&str> = Some("application/json");

    #[test]
    fn success_exposes_the_payload_field() {
        let payload = open(
            JSON,
            br#"{"status": "success", "clients": [{"id": 1, "name": "Acme"}]}"#,
        )
        .unwrap();
        let clients: Vec<DropdownItem> = payload.into_field("clients").unwrap();
        assert_eq!(clients, vec![DropdownItem::new(1, "Acme")]);
    }

    #[test]
    fn error_status_becomes_an_application_error() {
        let err = open(JSON, br#"{"status": "error", "error": "duplicate email"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::Application(ref m) if m == "duplicate email"));

        let err = open(JSON, br#"{"status": "error", "message": "Client not found"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::Application(ref m) if m == "Client not found"));
    }

    #[test]
    fn non_json_content_is_a_protocol_error() {
        let err = open(Some("text/html; charset=utf-8"), b"<html></html>").unwrap_err();
        assert!(matches!(err, ConsoleError::Protocol(_)));

        let err = open(None, br#"{"status": "success"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::Protocol(_)));
    }

    #[test]
    fn charset_and_json_suffix_are_accepted() {
        assert!(ensure_json(Some("application/json; charset=utf-8")).is_ok());
        assert!(ensure_json(Some("application/problem+json")).is_ok());
    }

    #[test]
    fn missing_status_or_field_is_a_protocol_error() {
        let err = open(JSON, br#"{"clients": []}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::Protocol(_)));

        let payload = open(JSON, br#"{"status": "success"}"#).unwrap();
        let err = payload.into_field::<Vec<DropdownItem>>("clients").unwrap_err();
        assert!(matches!(err, ConsoleError::Protocol(_)));
    }

    #[test]
    fn created_ids_and_messages_are_kept() {
        let payload = open(
            JSON,
            br#"{"status": "success", "message": "Payment created successfully", "payment_id": 42}"#,
        )
        .unwrap();
        assert_eq!(payload.created_id("payment_id"), Some(42));
        assert_eq!(payload.created_id("id"), None);
        assert_eq!(payload.message(), Some("Payment created successfully"));
    }
}
