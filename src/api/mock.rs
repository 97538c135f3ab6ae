//! # Mock Transport
//!
//! Scripted [`Transport`] for testing controllers and [`ApiService`](super::ApiService)
//! without a backend.
//!
//! Queue the requests you expect, in order, together with the response each
//! one should get. Requests that arrive out of order, or with nothing queued,
//! panic. Every request is recorded so tests can also assert that *nothing*
//! was sent.
//!
//! ```ignore
//! let mock = MockTransport::new();
//! mock.expect_post("/auth/login").return_ok(json!({"token": "t"}));
//!
//! let api = ApiService::new("http://test", Arc::new(mock.clone()), tokens);
//! api.login(&form).await?;
//!
//! mock.verify();
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::{ApiError, ApiRequest, ApiResponse, Transport};

struct Expectation {
    method: Method,
    path: String,
    response: Result<ApiResponse, ApiError>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::GET, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::POST, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::PUT, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::DELETE, path)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<String> = exps
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, _base_url: &str, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.path => exp.response,
            Some(exp) => panic!(
                "Expected {} {}, got {} {}",
                exp.method, exp.path, request.method, request.path
            ),
            None => panic!("Unexpected request {} {}", request.method, request.path),
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answers with `200` and `body`.
    pub fn return_ok(self, body: Value) {
        self.return_status(200, body);
    }

    pub fn return_status(self, status: u16, body: Value) {
        self.push(Ok(ApiResponse::new(status, body)));
    }

    /// Fails before any HTTP response, like a dropped connection.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ApiResponse, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: Method, path: &str) -> ApiRequest {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let mock = MockTransport::new();
        mock.expect_get("/data").return_ok(json!({"productos": []}));
        mock.expect_delete("/productos/1").return_status(404, json!({"message": "No existe"}));

        let first = mock.send("http://test", request(Method::GET, "/data")).await.unwrap();
        assert_eq!(first.status, 200);

        let second = mock
            .send("http://test", request(Method::DELETE, "/productos/1"))
            .await
            .unwrap();
        assert_eq!(second.status, 404);

        assert_eq!(mock.requests().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Expected GET /data")]
    async fn test_mock_transport_rejects_wrong_request() {
        let mock = MockTransport::new();
        mock.expect_get("/data").return_ok(Value::Null);
        let _ = mock.send("http://test", request(Method::POST, "/ventas")).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_pending() {
        let mock = MockTransport::new();
        mock.expect_get("/data").return_ok(Value::Null);
        mock.verify();
    }
}
