//! Mock data sources, transports and caches for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::api::{GraphQlRequest, GraphQlResponse, GraphQlTransport, QueryInvalidator};
use crate::errors::{InvocationError, TransportError};
use crate::pipeline::DataSource;

/// A data source that records payloads and replays scripted results.
///
/// Without a script it echoes the payload it receives.
#[derive(Debug)]
pub struct RecordingDataSource {
    name: String,
    script: Mutex<VecDeque<Result<serde_json::Value, InvocationError>>>,
    fallback: Mutex<Option<Result<serde_json::Value, InvocationError>>>,
    payloads: Mutex<Vec<serde_json::Value>>,
}

impl RecordingDataSource {
    /// Creates an echoing data source.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(None),
            payloads: Mutex::new(Vec::new()),
        }
    }

    /// Creates a data source that always returns `value`.
    #[must_use]
    pub fn returning(name: impl Into<String>, value: serde_json::Value) -> Self {
        let source = Self::new(name);
        *source.fallback.lock() = Some(Ok(value));
        source
    }

    /// Creates a data source that always fails with `error`.
    #[must_use]
    pub fn failing(name: impl Into<String>, error: InvocationError) -> Self {
        let source = Self::new(name);
        *source.fallback.lock() = Some(Err(error));
        source
    }

    /// Queues a result for the next unscripted call.
    pub fn push_result(&self, result: Result<serde_json::Value, InvocationError>) {
        self.script.lock().push_back(result);
    }

    /// Returns the number of invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.payloads.lock().len()
    }

    /// Returns every payload received, in order.
    #[must_use]
    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.lock().clone()
    }

    /// Returns the most recent payload.
    #[must_use]
    pub fn last_payload(&self) -> Option<serde_json::Value> {
        self.payloads.lock().last().cloned()
    }
}

#[async_trait]
impl DataSource for RecordingDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, payload: serde_json::Value) -> Result<serde_json::Value, InvocationError> {
        self.payloads.lock().push(payload.clone());

        if let Some(result) = self.script.lock().pop_front() {
            return result;
        }
        match &*self.fallback.lock() {
            Some(result) => result.clone(),
            None => Ok(payload),
        }
    }
}

/// A GraphQL transport that replays scripted responses in order.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<GraphQlResponse, TransportError>>>,
    requests: Mutex<Vec<GraphQlRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a response to the script.
    #[must_use]
    pub fn respond(self, response: GraphQlResponse) -> Self {
        self.responses.lock().push_back(Ok(response));
        self
    }

    /// Appends a transport failure to the script.
    #[must_use]
    pub fn fail(self, error: TransportError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Returns every request sent, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GraphQlTransport for ScriptedTransport {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let operation = request.operation_name.clone();
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new(format!("No scripted response for {operation}"))))
    }
}

/// A query cache that records invalidated keys.
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    keys: Mutex<Vec<Vec<String>>>,
}

impl RecordingInvalidator {
    /// Creates an empty invalidator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every invalidated key, in order.
    #[must_use]
    pub fn keys(&self) -> Vec<Vec<String>> {
        self.keys.lock().clone()
    }
}

impl QueryInvalidator for RecordingInvalidator {
    fn invalidate(&self, key: &[String]) {
        self.keys.lock().push(key.to_vec());
    }
}
