//! Blocking HTTP executor for core-built requests.
//!
//! # Design
//! The core crate builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; this module is the host side of
//! that split. `UreqTransport` executes one attempt per request with a
//! global timeout — no retry, no backoff. Status-as-error is disabled so
//! 4xx/5xx come back as data and the core's parse methods do the status
//! interpretation.

use std::time::Duration;

use taskboard_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP round-trip for a core-built request.
///
/// Transport-level failures (connection refused, timeout) surface as
/// `ApiError::Transport`; any response that arrived, whatever the status,
/// is returned as data.
pub trait Transport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// ureq-backed transport with a fixed request timeout.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(&req.path).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Scripted transport for unit tests: pops pre-queued responses and logs
/// every executed request for later inspection.
#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use taskboard_core::{ApiError, HttpRequest, HttpResponse};

    use super::Transport;

    pub type RequestLog = Rc<RefCell<Vec<HttpRequest>>>;

    pub struct FakeTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        log: RequestLog,
    }

    impl FakeTransport {
        pub fn new() -> (Self, RequestLog) {
            let log: RequestLog = Rc::new(RefCell::new(Vec::new()));
            let transport = Self {
                responses: RefCell::new(VecDeque::new()),
                log: Rc::clone(&log),
            };
            (transport, log)
        }

        /// Queue a successful response with a JSON body.
        pub fn respond_json(&self, status: u16, body: serde_json::Value) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
        }

        /// Queue a transport-level failure.
        pub fn fail(&self, message: &str) {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Transport(message.to_string())));
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.log.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }
}
