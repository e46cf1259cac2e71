//! Scripted [`HttpClient`] for tests: per-URL replies, call log, in-flight high-water mark.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Body(String),
    Status(u16),
    Timeout,
}

/// Replies are consumed front to back; the last reply of a URL repeats forever.
/// Unscripted URLs answer 404.
#[derive(Default)]
pub struct MockHttpClient {
    routes: Mutex<HashMap<String, VecDeque<MockReply>>>,
    requests: Mutex<Vec<HttpRequest>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_sequence(url, vec![MockReply::Body(body.into())])
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_sequence(url, vec![MockReply::Status(status)])
    }

    pub fn with_sequence(self, url: impl Into<String>, replies: Vec<MockReply>) -> Self {
        lock(&self.routes).insert(url.into(), replies.into());
        self
    }

    /// Each call sleeps this long while counted as in flight.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        lock(&self.requests).iter().filter(|r| r.url == url).count()
    }

    /// Largest number of `get` calls observed executing at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, url: &str) -> MockReply {
        let mut routes = lock(&self.routes);
        match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(MockReply::Status(404)),
            Some(queue) => queue.front().cloned().unwrap_or(MockReply::Status(404)),
            None => MockReply::Status(404),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.next_reply(&request.url);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match reply {
            MockReply::Body(body) => Ok(HttpResponse::ok(body)),
            MockReply::Status(status) => Ok(HttpResponse::status(status)),
            MockReply::Timeout => Err(TransportError::Timeout),
        }
    }
}
