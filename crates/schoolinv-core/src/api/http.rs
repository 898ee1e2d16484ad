//! Blocking JSON request/response over libcurl.
//!
//! Runs in the current thread; [`super::ApiClient`] calls it from
//! `spawn_blocking`.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    /// Already-encoded JSON body.
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn perform(req: &HttpRequest, opts: HttpOptions) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(5)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    match req.method {
        Method::Get => easy.get(true)?,
        Method::Post => {
            easy.post(true)?;
            // libcurl would otherwise wait on a read callback for the body.
            easy.post_fields_copy(req.body.as_deref().unwrap_or(b""))?;
        }
        Method::Put | Method::Delete => {
            easy.custom_request(req.method.as_str())?;
            if let Some(body) = &req.body {
                easy.post_fields_copy(body)?;
            }
        }
    }

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    if req.body.is_some() {
        list.append("Content-Type: application/json")?;
    }
    if let Some(token) = &req.bearer {
        list.append(&format!("Authorization: Bearer {}", token.trim()))?;
    }
    easy.http_headers(list)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()? as u16;
    Ok(HttpResponse { status, body })
}
