use super::GenerationService;
use crate::models::{GenerateRequest, GenerateResponse, HealthStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted reply for one mock call.
#[derive(Debug, Clone)]
enum MockReply {
    Response(GenerateResponse),
    Failure { status: u16, message: String },
}

#[derive(Clone)]
pub struct MockGenerationClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: GenerateResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Response(response));
        self
    }

    pub fn with_failure(self, status: u16, message: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Failure { status, message });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn default_response(request: &GenerateRequest) -> GenerateResponse {
        let context: String = (1..=request.top_k)
            .map(|i| format!("\n### Example {}\nSample reference lyrics {}\n", i, i))
            .collect();

        GenerateResponse {
            lyrics: format!("Verse 1\nA song about {}", request.query),
            reasoning: Some("Offline preview, no model was called".to_string()),
            context,
            prompt: None,
        }
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.requests.lock().unwrap().push(request.clone());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(Self::default_response(request));
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Failure { status, message } => Err(Error::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: "Mock server running".to_string(),
        })
    }
}
