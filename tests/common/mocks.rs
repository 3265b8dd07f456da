use async_trait::async_trait;
use product_ner::{
    Error, Result,
    model::{NerBackend, RawEntity},
};
use std::sync::{Arc, Mutex};

/// Mock NER backend for testing. Returns queued span lists in order, or a
/// configured error; records every input it was called with.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub spans: Arc<Mutex<Vec<Vec<RawEntity>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub error: Option<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            spans: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_spans(self, spans: Vec<RawEntity>) -> Self {
        self.spans.lock().unwrap().push(spans);
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NerBackend for MockBackend {
    async fn extract(
        &self,
        text: &str,
        _labels: &[&str],
        _threshold: f32,
    ) -> Result<Vec<RawEntity>> {
        self.calls.lock().unwrap().push(text.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::prediction(error.clone()));
        }

        let mut spans = self.spans.lock().unwrap();
        if spans.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(spans.remove(0))
        }
    }
}

pub fn span(start: usize, end: usize, label: &str) -> RawEntity {
    RawEntity {
        start,
        end,
        label: label.to_string(),
    }
}
