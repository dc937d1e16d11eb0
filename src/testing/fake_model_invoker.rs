use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::InvocationError;
use crate::ports::ModelInvoker;

/// Scripted model: replays queued replies and records every prompt.
#[derive(Clone, Default)]
pub struct FakeModelInvoker {
    pub prompts: Arc<Mutex<Vec<String>>>,
    replies: Arc<Mutex<VecDeque<Result<String, InvocationError>>>>,
}

impl FakeModelInvoker {
    pub fn replying(text: impl Into<String>) -> Self {
        let fake = Self::default();
        fake.push_reply(text);
        fake
    }

    pub fn failing(error: InvocationError) -> Self {
        let fake = Self::default();
        fake.replies.lock().unwrap().push_back(Err(error));
        fake
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ModelInvoker for FakeModelInvoker {
    fn invoke(&self, prompt: &str) -> Result<String, InvocationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(InvocationError::EmptyResponse))
    }
}
