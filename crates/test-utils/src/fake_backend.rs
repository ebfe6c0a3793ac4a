use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use agentdag::exec::{AgentBackend, InvokeResult};
use agentdag::types::BackendKind;

/// One recorded `invoke` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub backend: BackendKind,
    pub prompt: String,
}

/// A fake agent backend that:
/// - records every invocation (backend kind + prompt)
/// - serves queued per-backend results, then a sticky per-backend default,
///   then a generic success.
#[derive(Default)]
pub struct FakeBackend {
    queues: Mutex<HashMap<BackendKind, VecDeque<InvokeResult>>>,
    defaults: Mutex<HashMap<BackendKind, InvokeResult>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake that answers the planning call with the given plan JSON and
    /// succeeds on everything else.
    pub fn with_plan(plan_json: &str) -> Self {
        let fake = Self::new();
        fake.enqueue(BackendKind::Codex, InvokeResult::success(plan_json));
        fake
    }

    /// Queue a result for the next invocation of `backend`.
    pub fn enqueue(&self, backend: BackendKind, result: InvokeResult) {
        self.queues
            .lock()
            .unwrap()
            .entry(backend)
            .or_default()
            .push_back(result);
    }

    /// Result served for `backend` once its queue is empty.
    pub fn set_default(&self, backend: BackendKind, result: InvokeResult) {
        self.defaults.lock().unwrap().insert(backend, result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, backend: BackendKind) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.backend == backend)
            .collect()
    }
}

impl AgentBackend for FakeBackend {
    fn invoke(
        &self,
        backend: BackendKind,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = InvokeResult> + Send + '_>> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { backend, prompt });

        let queued = self
            .queues
            .lock()
            .unwrap()
            .get_mut(&backend)
            .and_then(|q| q.pop_front());

        let result = queued
            .or_else(|| self.defaults.lock().unwrap().get(&backend).cloned())
            .unwrap_or_else(|| InvokeResult::success("done"));

        Box::pin(async move { result })
    }
}
