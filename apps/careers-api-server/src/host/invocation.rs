//! Serverless host: each proxy event becomes one in-process request through
//! the same router the listener serves.

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request, Response};
use http_body_util::BodyExt;
use lambda_runtime::{LambdaEvent, service_fn};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use url::Url;

use jobs::api::rest::middleware::request_id;

const PATH_BASE: &str = "http://invocation.local/";

/// API Gateway REST proxy event (the subset the router needs).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub http_method: String,
    pub path: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub body: Option<String>,
    pub is_base64_encoded: Option<bool>,
    pub request_context: Option<ProxyRequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequestContext {
    pub request_id: Option<String>,
}

/// API Gateway REST proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid request target {target}: {reason}")]
    InvalidUri { target: String, reason: String },
    #[error("invalid header {name}")]
    InvalidHeader { name: String },
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error("request body is not valid base64: {0}")]
    InvalidBody(String),
    #[error("failed to read response body: {0}")]
    ResponseBody(String),
}

/// Run the invocation loop until the runtime stops delivering events.
///
/// # Errors
/// Returns an error if the runtime client fails.
pub async fn serve(router: Router) -> anyhow::Result<()> {
    tracing::info!("Starting invocation host");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let router = router.clone();
        async move {
            let (request, context) = event.into_parts();
            tracing::debug!(invocation_id = %context.request_id, "Invocation received");
            dispatch(&router, request)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

/// Translate one proxy event, run it through `router`, and translate the
/// response back.
///
/// # Errors
/// Returns [`InvocationError`] if the event cannot be turned into a request
/// or the response body cannot be read.
pub async fn dispatch(router: &Router, event: ProxyRequest) -> Result<ProxyResponse, InvocationError> {
    let request = to_http_request(event)?;
    let Ok(response) = router.clone().oneshot(request).await;
    from_http_response(response).await
}

fn to_http_request(event: ProxyRequest) -> Result<Request<Body>, InvocationError> {
    let method = if event.http_method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(event.http_method.as_bytes())
            .map_err(|_| InvocationError::InvalidMethod(event.http_method.clone()))?
    };

    let target = request_target(
        event.path.as_deref(),
        event.query_string_parameters.as_ref(),
        event.multi_value_query_string_parameters.as_ref(),
    )?;

    let mut headers = build_headers(
        event.headers.as_ref(),
        event.multi_value_headers.as_ref(),
    )?;
    let invocation_request_id = event.request_context.and_then(|c| c.request_id);
    if let Some(id) = invocation_request_id.filter(|id| !id.is_empty())
        && !headers.contains_key(request_id::X_REQUEST_ID)
        && let Ok(value) = HeaderValue::from_str(&id)
    {
        headers.insert(request_id::header(), value);
    }

    let body = match event.body {
        None => Vec::new(),
        Some(b) if event.is_base64_encoded.unwrap_or(false) => STANDARD
            .decode(b.as_bytes())
            .map_err(|e| InvocationError::InvalidBody(e.to_string()))?,
        Some(b) => b.into_bytes(),
    };

    let mut request = Request::builder()
        .method(method)
        .uri(&target)
        .body(Body::from(body))
        .map_err(|e| InvocationError::InvalidUri {
            target,
            reason: e.to_string(),
        })?;
    *request.headers_mut() = headers;
    Ok(request)
}

fn request_target(
    path: Option<&str>,
    single: Option<&HashMap<String, String>>,
    multi: Option<&HashMap<String, Vec<String>>>,
) -> Result<String, InvocationError> {
    let path = match path {
        Some(p) if !p.is_empty() => encode_path(p)?,
        _ => "/".to_owned(),
    };

    let mut pairs: Vec<(&str, &str)> = match (multi, single) {
        (Some(m), _) if !m.is_empty() => m
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
            .collect(),
        (_, Some(s)) => s.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
        _ => Vec::new(),
    };
    if pairs.is_empty() {
        return Ok(path);
    }
    pairs.sort_unstable();

    let query = serde_urlencoded::to_string(&pairs)
        .map_err(|e| InvocationError::InvalidQuery(e.to_string()))?;
    Ok(format!("{path}?{query}"))
}

/// Gateway paths arrive decoded; re-encode them so spaces and non-ASCII
/// reach the router as a valid request target.
fn encode_path(path: &str) -> Result<String, InvocationError> {
    let mut url = Url::parse(PATH_BASE).map_err(|e| InvocationError::InvalidUri {
        target: path.to_owned(),
        reason: e.to_string(),
    })?;
    url.set_path(path);
    Ok(url.path().to_owned())
}

fn build_headers(
    single: Option<&HashMap<String, String>>,
    multi: Option<&HashMap<String, Vec<String>>>,
) -> Result<HeaderMap, InvocationError> {
    let mut headers = HeaderMap::new();

    for (name, values) in multi.into_iter().flatten() {
        let header = parse_name(name)?;
        for value in values {
            headers.append(header.clone(), parse_value(name, value)?);
        }
    }
    for (name, value) in single.into_iter().flatten() {
        let header = parse_name(name)?;
        if !headers.contains_key(&header) {
            headers.insert(header, parse_value(name, value)?);
        }
    }

    Ok(headers)
}

fn parse_name(name: &str) -> Result<HeaderName, InvocationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| InvocationError::InvalidHeader {
        name: name.to_owned(),
    })
}

fn parse_value(name: &str, value: &str) -> Result<HeaderValue, InvocationError> {
    HeaderValue::from_str(value).map_err(|_| InvocationError::InvalidHeader {
        name: name.to_owned(),
    })
}

async fn from_http_response(response: Response<Body>) -> Result<ProxyResponse, InvocationError> {
    let (parts, body) = response.into_parts();

    let mut headers = HashMap::new();
    let mut multi_value_headers: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in &parts.headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers.insert(name.as_str().to_owned(), value.clone());
        multi_value_headers
            .entry(name.as_str().to_owned())
            .or_default()
            .push(value);
    }

    let bytes = body
        .collect()
        .await
        .map_err(|e| InvocationError::ResponseBody(e.to_string()))?
        .to_bytes();
    let (body, is_base64_encoded) = match std::str::from_utf8(&bytes) {
        Ok(text) => (text.to_owned(), false),
        Err(_) => (STANDARD.encode(&bytes), true),
    };

    Ok(ProxyResponse {
        status_code: parts.status.as_u16(),
        headers,
        multi_value_headers,
        body,
        is_base64_encoded,
    })
}
