//! Test doubles shared by the client tests.

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use super::protocol::{BoxFuture, HttpResponse, HttpTransport};
use crate::report::Reporter;

#[derive(Debug, Clone)]
enum FakeReply {
    Http { status: u16, body: String },
    Fail(String),
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<(String, String)>,
    replies: VecDeque<FakeReply>,
}

/// Scripted transport. Replies are consumed in order; the last one repeats.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    fn with_reply(reply: FakeReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                replies: VecDeque::from([reply]),
            })),
        }
    }

    pub(crate) fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(FakeReply::Http {
            status,
            body: body.into(),
        })
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(FakeReply::Fail(message.into()))
    }

    pub(crate) fn then_reply(self, status: u16, body: impl Into<String>) -> Self {
        self.push(FakeReply::Http {
            status,
            body: body.into(),
        })
    }

    pub(crate) fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(FakeReply::Fail(message.into()))
    }

    fn push(self, reply: FakeReply) -> Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Recorded `(url, parsed JSON body)` pairs.
    pub(crate) fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .map(|(url, body)| (url.clone(), serde_json::from_str(body).unwrap()))
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let reply = {
                let mut state = self.state.lock().unwrap();
                state.requests.push((url.to_owned(), body));
                if state.replies.len() > 1 {
                    state.replies.pop_front().unwrap()
                } else {
                    state.replies.front().cloned().unwrap()
                }
            };
            match reply {
                FakeReply::Http { status, body } => Ok(HttpResponse { status, body }),
                FakeReply::Fail(message) => Err(std::io::Error::other(message).into()),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Success,
    Diagnostic,
}

/// Reporter that keeps every line for later assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl RecordingReporter {
    fn collect(&self, stream: Stream) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(it, _)| *it == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub(crate) fn successes(&self) -> Vec<String> {
        self.collect(Stream::Success)
    }

    pub(crate) fn diagnostics(&self) -> Vec<String> {
        self.collect(Stream::Diagnostic)
    }
}

impl Reporter for RecordingReporter {
    fn success(&self, line: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((Stream::Success, line.to_owned()));
    }

    fn diagnostic(&self, line: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((Stream::Diagnostic, line.to_owned()));
    }
}
