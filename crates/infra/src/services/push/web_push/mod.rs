mod encryption;
mod vapid;

use super::{classify_response, IPushSender, PushError};
use crate::{config::VapidConfig, system::ISys};
use push_reminder_domain::{NotificationPayload, PushSubscription};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE},
    Client,
};
use std::{sync::Arc, time::Duration};
use tracing::debug;
use url::Url;
use vapid::{decode_base64url, VapidSigner};

pub use vapid::VapidKeyError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends encrypted notifications to push services with the Web Push protocol
pub struct WebPushSender {
    client: Client,
    vapid: VapidSigner,
    ttl_secs: u32,
    sys: Arc<dyn ISys>,
}

impl WebPushSender {
    pub fn new(
        config: &VapidConfig,
        ttl_secs: u32,
        sys: Arc<dyn ISys>,
    ) -> Result<Self, VapidKeyError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VapidKeyError::Client(e.to_string()))?;
        Ok(Self {
            client,
            vapid: VapidSigner::new(config)?,
            ttl_secs,
            sys,
        })
    }
}

#[async_trait::async_trait]
impl IPushSender for WebPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushError> {
        let endpoint = subscription
            .endpoint()
            .ok_or_else(|| PushError::InvalidSubscription("Missing endpoint".into()))?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PushError::InvalidSubscription(format!("Invalid endpoint: {}", e)))?;
        let keys = subscription
            .keys()
            .ok_or_else(|| PushError::InvalidSubscription("Missing keys".into()))?;
        let ua_public = decode_base64url(keys.p256dh)
            .map_err(|e| PushError::InvalidSubscription(format!("Invalid p256dh key: {}", e)))?;
        let auth_secret = decode_base64url(keys.auth)
            .map_err(|e| PushError::InvalidSubscription(format!("Invalid auth secret: {}", e)))?;

        let plaintext = payload
            .to_bytes()
            .map_err(|e| PushError::Encryption(e.to_string()))?;
        let body = encryption::encrypt(&ua_public, &auth_secret, &plaintext)?;
        let now_secs = self.sys.get_timestamp_millis() / 1000;
        let authorization = self.vapid.authorization(&endpoint, now_secs)?;

        debug!("Pushing {} bytes to: {}", body.len(), endpoint);
        let res = self
            .client
            .post(endpoint)
            .header("TTL", self.ttl_secs.to_string())
            .header(CONTENT_ENCODING, "aes128gcm")
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(AUTHORIZATION, authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = res.status();
        let body = if status.is_success() {
            String::new()
        } else {
            res.text().await.unwrap_or_default()
        };
        classify_response(status.as_u16(), body)
    }
}
