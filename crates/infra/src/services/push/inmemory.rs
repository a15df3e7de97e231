use super::{classify_response, IPushSender, PushError};
use dashmap::DashMap;
use push_reminder_domain::{NotificationPayload, PushSubscription};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct PushAttempt {
    pub endpoint: String,
    pub payload: NotificationPayload,
}

/// Records pushes instead of sending them. Push services answer `201`
/// unless another status has been scripted for the endpoint.
pub struct InMemoryPushSender {
    attempts: Mutex<Vec<PushAttempt>>,
    responses: DashMap<String, u16>,
}

impl InMemoryPushSender {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            responses: DashMap::new(),
        }
    }

    /// Makes every following push to `endpoint` answer with `status`
    pub fn respond_with(&self, endpoint: &str, status: u16) {
        self.responses.insert(endpoint.to_string(), status);
    }

    pub async fn attempts(&self) -> Vec<PushAttempt> {
        self.attempts.lock().await.clone()
    }

    pub async fn attempts_to(&self, endpoint: &str) -> Vec<PushAttempt> {
        self.attempts
            .lock()
            .await
            .iter()
            .filter(|a| a.endpoint == endpoint)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryPushSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushSender for InMemoryPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushError> {
        let endpoint = subscription
            .endpoint()
            .ok_or_else(|| PushError::InvalidSubscription("Missing endpoint".into()))?;
        if subscription.keys().is_none() {
            return Err(PushError::InvalidSubscription("Missing keys".into()));
        }
        info!("Recording push of: {:?} to: {}", payload, endpoint);
        self.attempts.lock().await.push(PushAttempt {
            endpoint: endpoint.to_string(),
            payload: payload.clone(),
        });
        let status = self.responses.get(endpoint).map(|s| *s).unwrap_or(201);
        classify_response(status, String::new())
    }
}
