use push_reminder_api::Application;
use push_reminder_infra::{InMemoryPushSender, PushReminderContext};
use push_reminder_sdk::PushReminderSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: PushReminderContext,
    pub push: Arc<InMemoryPushSender>,
}

/// In memory stores and a push sender that only records what it is asked to send
pub fn setup_test_context() -> (PushReminderContext, Arc<InMemoryPushSender>) {
    let push = Arc::new(InMemoryPushSender::new());
    let ctx = PushReminderContext::create_inmemory_with_push(push.clone());
    (ctx, push)
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, PushReminderSDK, String) {
    let (ctx, push) = setup_test_context();
    let (sdk, address) = spawn_app_with_context(ctx.clone()).await;
    (TestApp { ctx, push }, sdk, address)
}

pub async fn spawn_app_with_context(mut ctx: PushReminderContext) -> (PushReminderSDK, String) {
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = PushReminderSDK::new(address.clone());
    (sdk, address)
}
