mod config;
mod delivery;
mod repos;
mod services;
mod system;
mod timers;

use anyhow::Context;
pub use config::{Config, VapidConfig};
pub use delivery::{delivery_queue, DeliveryInbox, DeliveryMessage, DeliveryOutbox};
pub use repos::{
    CancelReminderError, CreateReminderError, IDocumentStore, InMemoryDocumentStore,
    JsonFileStore, ReminderRepo, RemindersDocument, Repos, StoreError, SubscriptionRepo,
};
pub use services::*;
use std::sync::{Arc, Mutex};
pub use system::{ISys, RealSys};
pub use timers::ReminderTimers;
use tracing::warn;

#[derive(Clone)]
pub struct PushReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: Arc<dyn IPushSender>,
    pub timers: Arc<ReminderTimers>,
    pub outbox: DeliveryOutbox,
    inbox: Arc<Mutex<Option<DeliveryInbox>>>,
}

impl PushReminderContext {
    pub fn create(
        repos: Repos,
        config: Config,
        sys: Arc<dyn ISys>,
        push: Arc<dyn IPushSender>,
    ) -> Self {
        let (outbox, inbox) = delivery_queue();
        Self {
            repos,
            config,
            timers: Arc::new(ReminderTimers::new(outbox.clone(), sys.clone())),
            sys,
            push,
            outbox,
            inbox: Arc::new(Mutex::new(Some(inbox))),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with_push(Arc::new(InMemoryPushSender::new()))
    }

    pub fn create_inmemory_with_push(push: Arc<dyn IPushSender>) -> Self {
        Self::create(
            Repos::create_inmemory(),
            Config::new(),
            Arc::new(RealSys {}),
            push,
        )
    }

    /// Hands out the receiving end of the delivery queue. There is only one,
    /// so this returns `None` once it has been taken.
    pub fn take_delivery_inbox(&self) -> Option<DeliveryInbox> {
        self.inbox.lock().ok()?.take()
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PushReminderContext> {
    let config = Config::new();
    let sys: Arc<dyn ISys> = Arc::new(RealSys {});
    let push: Arc<dyn IPushSender> = match &config.vapid {
        Some(vapid) => Arc::new(
            WebPushSender::new(vapid, config.push_ttl_secs, sys.clone())
                .context("The VAPID keys could not be used")?,
        ),
        None => {
            warn!("No VAPID keys are configured, notifications will only be recorded in memory and not be sent to any push service.");
            Arc::new(InMemoryPushSender::new())
        }
    };
    let repos = Repos::create_file(&config).await;
    Ok(PushReminderContext::create(repos, config, sys, push))
}
