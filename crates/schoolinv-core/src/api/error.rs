//! API error type and decoding of the server's `detail` payloads.
//!
//! The server reports failures as `{"detail": "message"}` or, for request
//! validation, `{"detail": [{"loc": ["body", "email"], "msg": "..."}]}`.
//! The latter is mapped to one message per field.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Location prefixes that name where a field lives, not the field itself.
const LOC_PREFIXES: &[&str] = &["body", "query", "path", "header"];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("not signed in or session expired (run `schoolinv login`)")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("offline: {0}")]
    Offline(String),
    #[error("background task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = parse_detail(body);
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(detail.message_or("permission denied")),
            404 => ApiError::NotFound(detail.message_or("resource does not exist")),
            422 => ApiError::Validation(detail.into_field_errors()),
            400 if detail.has_fields() => ApiError::Validation(detail.into_field_errors()),
            _ => ApiError::Status {
                status,
                message: detail.message_or_else(|| fallback_message(status, body)),
            },
        }
    }

    /// Per-field messages when this is a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(f) => Some(f),
            _ => None,
        }
    }
}

/// Validation failure mapped to form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Field name → first message reported for it.
    pub fields: BTreeMap<String, String>,
    /// Messages not tied to a field.
    pub general: Vec<String>,
}

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for msg in &self.general {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", msg)?;
            first = false;
        }
        for (field, msg) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, msg)?;
            first = false;
        }
        if first {
            write!(f, "request rejected")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Items(Vec<DetailItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    #[serde(default)]
    msg: Option<String>,
}

/// What could be read from an error body.
#[derive(Debug, Default)]
struct ParsedDetail {
    message: Option<String>,
    errors: FieldErrors,
}

impl ParsedDetail {
    fn has_fields(&self) -> bool {
        !self.errors.fields.is_empty()
    }

    fn message_or(self, default: &str) -> String {
        self.message_or_else(|| default.to_string())
    }

    fn message_or_else(self, default: impl FnOnce() -> String) -> String {
        match self.message {
            Some(m) => m,
            None if !self.errors.is_empty() => self.errors.to_string(),
            None => default(),
        }
    }

    fn into_field_errors(mut self) -> FieldErrors {
        if let Some(m) = self.message.take() {
            self.errors.general.insert(0, m);
        }
        self.errors
    }
}

fn parse_detail(body: &[u8]) -> ParsedDetail {
    let parsed: ErrorBody = match serde_json::from_slice(body) {
        Ok(b) => b,
        Err(_) => return ParsedDetail::default(),
    };
    match parsed.detail {
        Some(Detail::Message(m)) => ParsedDetail {
            message: Some(m),
            errors: FieldErrors::default(),
        },
        Some(Detail::Items(items)) => ParsedDetail {
            message: None,
            errors: map_items(items),
        },
        Some(Detail::Other(v)) => ParsedDetail {
            message: Some(v.to_string()),
            errors: FieldErrors::default(),
        },
        None => ParsedDetail::default(),
    }
}

fn map_items(items: Vec<DetailItem>) -> FieldErrors {
    let mut out = FieldErrors::default();
    for item in items {
        let msg = match item.msg {
            Some(m) if !m.trim().is_empty() => m,
            _ => continue,
        };
        match field_name(&item.loc) {
            Some(field) => {
                out.fields.entry(field).or_insert(msg);
            }
            None => out.general.push(msg),
        }
    }
    out
}

/// Last `loc` element, unless the location is only a prefix like `["body"]`.
fn field_name(loc: &[serde_json::Value]) -> Option<String> {
    let last = loc.last()?;
    let name = match last {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if loc.len() == 1 && LOC_PREFIXES.contains(&name.as_str()) {
        return None;
    }
    Some(name)
}

fn fallback_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() || text.starts_with('<') {
        return format!("server returned status {}", status);
    }
    text.chars().take(200).collect()
}
