//! Advisory "are we online" check before login and registration.
//!
//! A plain TCP connect to the API host. It proves nothing about the API
//! itself; it only turns "no network" into a clear message instead of a
//! curl timeout.

use std::time::Duration;

use tokio::net::TcpStream;
use url::Url;

use crate::api::ApiError;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub async fn check_online(base_url: &Url, timeout: Duration) -> Result<(), ApiError> {
    let host = base_url
        .host_str()
        .ok_or_else(|| ApiError::Offline(format!("{} has no host", base_url)))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = base_url
        .port_or_known_default()
        .ok_or_else(|| ApiError::Offline(format!("{} has no port", base_url)))?;

    match tokio::time::timeout(timeout, TcpStream::connect((host.as_str(), port))).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            tracing::info!(host = %host, port, "connectivity probe failed: {}", e);
            Err(ApiError::Offline(format!("cannot reach {}:{} ({})", host, port, e)))
        }
        Err(_) => Err(ApiError::Offline(format!(
            "no answer from {}:{} within {}s",
            host,
            port,
            timeout.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listening_host_is_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/api", port)).unwrap();
        check_online(&url, DEFAULT_PROBE_TIMEOUT).await.unwrap();
    }

    #[tokio::test]
    async fn closed_port_is_offline() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let err = check_online(&url, DEFAULT_PROBE_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, ApiError::Offline(_)));
    }
}
