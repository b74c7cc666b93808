use axum::{
    body::Body,
    http::{header, Request, Response},
};
use percent_encoding::percent_decode_str;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower::{Layer, Service};

use super::client_ip;
use crate::models::{AuditEntry, AuditPayload, AuditSink};

/// Records an audit entry for every request passing through, after the
/// handler has produced its response. The outcome stored with it comes from
/// the response's [`AuditPayload`] extension. Write failures are logged and
/// never affect the response.
#[derive(Clone)]
pub struct AuditLayer {
    sink: Arc<dyn AuditSink>,
    action: &'static str,
}

impl AuditLayer {
    pub fn new(sink: Arc<dyn AuditSink>, action: &'static str) -> Self {
        Self { sink, action }
    }
}

impl<S> Layer<S> for AuditLayer {
    type Service = AuditService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuditService {
            inner,
            sink: self.sink.clone(),
            action: self.action,
        }
    }
}

#[derive(Clone)]
pub struct AuditService<S> {
    inner: S,
    sink: Arc<dyn AuditSink>,
    action: &'static str,
}

impl<S> Service<Request<Body>> for AuditService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();
        let ip = client_ip(&req);
        let user_agent = header_str(&req, header::USER_AGENT).unwrap_or("unknown").to_string();
        let body = json!({
            "method": req.method().as_str(),
            "url": req.uri().to_string(),
            "query": decode_query(req.uri().query()),
            "headers": {
                "user-agent": user_agent,
                "content-type": header_str(&req, header::CONTENT_TYPE),
            }
        });

        let sink = self.sink.clone();
        let action = self.action;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(req).await?;
            let status = response.status();
            let new_data = response
                .extensions()
                .get::<AuditPayload>()
                .map(|payload| payload.0.clone());

            let entry = AuditEntry {
                action: if status.is_client_error() || status.is_server_error() {
                    format!("{}_ERROR", action)
                } else {
                    action.to_string()
                },
                table_name: table_name(&path),
                record_id: record_id(&path),
                http_status: i32::from(status.as_u16()),
                ip,
                user_agent,
                moment: chrono::Utc::now(),
                body,
                new_data,
            };

            if let Err(e) = sink.record(entry).await {
                tracing::warn!(error = %e, path = %path, "Failed to write audit entry");
            }

            Ok(response)
        })
    }
}

fn header_str(req: &Request<Body>, name: header::HeaderName) -> Option<&str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// First path segment, e.g. `/results/12/groups` -> `results`.
pub fn table_name(path: &str) -> Option<String> {
    path.split('/')
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// First positive integer path segment, or 0 when there is none.
pub fn record_id(path: &str) -> i32 {
    path.split('/')
        .filter_map(|s| s.parse::<i32>().ok())
        .find(|id| *id > 0)
        .unwrap_or(0)
}

/// Decode `a=1&b=x%20y` into a JSON object. Repeated keys keep the last value.
pub fn decode_query(query: Option<&str>) -> Value {
    let mut map = Map::new();

    for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let decode = |raw: &str| {
            let with_spaces = raw.replace('+', " ");
            percent_decode_str(&with_spaces)
                .decode_utf8_lossy()
                .into_owned()
        };
        map.insert(decode(key), Value::String(decode(value)));
    }

    Value::Object(map)
}
