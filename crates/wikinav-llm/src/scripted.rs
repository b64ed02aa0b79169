//! Scripted model for exercising the evaluation loop without a network

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{ModelError, ModelResult};
use crate::traits::ModelClient;

/// Replays queued answers in order, recording every request it receives
pub struct ScriptedModel {
    name: String,
    answers: Mutex<VecDeque<ModelResult<String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answers: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn answer(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()))
    }

    /// Queue a failure
    pub fn fail(self, err: ModelError) -> Self {
        self.push(Err(err))
    }

    fn push(self, outcome: ModelResult<String>) -> Self {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(outcome);
        }
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _context: &str, request: &str) -> ModelResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.to_string());
        }
        let next = self
            .answers
            .lock()
            .map_err(|e| ModelError::Config(format!("Lock error: {}", e)))?
            .pop_front();
        next.unwrap_or_else(|| Err(ModelError::Config(format!("{} has no answers left", self.name))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let model = ScriptedModel::new("fixture")
            .answer("###\nA -> B")
            .fail(ModelError::MissingChoices);

        assert_eq!(model.complete("ctx", "first").await.unwrap(), "###\nA -> B");
        assert!(matches!(
            model.complete("ctx", "second").await,
            Err(ModelError::MissingChoices)
        ));
        assert!(model.complete("ctx", "third").await.is_err());
        assert_eq!(model.requests(), vec!["first", "second", "third"]);
    }
}
