use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::source::{EverythingQuery, HeadlinesQuery, NewsSource};
use crate::types::UpstreamResponse;
use crate::{Error, Result};

/// A call recorded by [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Everything(EverythingQuery),
    TopHeadlines(HeadlinesQuery),
}

/// A scripted reply. `Unreachable` stands in for a transport failure.
#[derive(Debug, Clone)]
pub enum Reply {
    Response(UpstreamResponse),
    Status(u16),
    Unreachable,
}

/// A [`NewsSource`] that answers from per-endpoint queues and records every call.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    everything: Mutex<VecDeque<Reply>>,
    headlines: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_everything(self, reply: Reply) -> Self {
        lock(&self.everything).push_back(reply);
        self
    }

    pub fn with_headlines(self, reply: Reply) -> Self {
        lock(&self.headlines).push_back(reply);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    fn answer(queue: &Mutex<VecDeque<Reply>>) -> Result<UpstreamResponse> {
        match lock(queue).pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Status(code)) => Err(Error::Status(code)),
            Some(Reply::Unreachable) => Err(Error::Upstream("upstream unreachable".to_string())),
            None => Err(Error::Upstream("no scripted reply".to_string())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl NewsSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn everything(&self, query: &EverythingQuery) -> Result<UpstreamResponse> {
        lock(&self.calls).push(Call::Everything(query.clone()));
        Self::answer(&self.everything)
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<UpstreamResponse> {
        lock(&self.calls).push(Call::TopHeadlines(query.clone()));
        Self::answer(&self.headlines)
    }
}
