use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use runscript::exec::BoxFuture;
use runscript::upload::{OutputUploader, UploadRequest};

/// A fake uploader that records every request and fails on demand.
#[derive(Default)]
pub struct FakeUploader {
    failures: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<UploadRequest>>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `message` as an upload error for the document with remote id `id`.
    pub fn failing_for(mut self, id: &str, message: &str) -> Self {
        self.failures
            .entry(id.to_string())
            .or_default()
            .push(message.to_string());
        self
    }

    /// Sleep before recording each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<UploadRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_handle(&self) -> Arc<Mutex<Vec<UploadRequest>>> {
        Arc::clone(&self.calls)
    }
}

impl OutputUploader for FakeUploader {
    fn upload_output<'a>(&'a self, request: UploadRequest) -> BoxFuture<'a, Vec<anyhow::Error>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let errors = self
                .failures
                .get(&request.id)
                .map(|msgs| msgs.iter().map(|m| anyhow::anyhow!(m.clone())).collect())
                .unwrap_or_default();

            self.calls.lock().unwrap().push(request);
            errors
        })
    }
}
