//! Map API failures onto retry [`ErrorKind`]s.

use crate::api::ApiError;
use crate::retry::policy::ErrorKind;

pub fn classify_http_status(code: u16) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code),
        _ => ErrorKind::Other,
    }
}

fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

pub fn classify(e: &ApiError) -> ErrorKind {
    match e {
        ApiError::Transport(ce) => classify_curl_error(ce),
        ApiError::Status { status, .. } => classify_http_status(*status),
        _ => ErrorKind::Other,
    }
}
