use actix_web::rt::time::sleep;
use push_reminder_sdk::PushSubscription;
use serde_json::json;
use std::{future::Future, time::Duration};

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn test_subscription(endpoint: &str) -> PushSubscription {
    PushSubscription::new(json!({
        "endpoint": endpoint,
        "expirationTime": null,
        "keys": {
            "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM",
            "auth": "tBHItJI5svbpez7KI4CCXg"
        }
    }))
}

/// Polls `check` until it holds or five seconds have passed
pub async fn wait_until<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}
