use crate::shared::usecase::UseCase;
use push_reminder_domain::PushSubscription;
use push_reminder_infra::PushReminderContext;
use tracing::info;

/// Forgets a subscription a push service reported as gone
#[derive(Debug)]
pub struct RemoveSubscriptionUseCase {
    pub subscription: PushSubscription,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemoveSubscriptionUseCase {
    /// `false` if the subscription was already removed
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "RemoveSubscription";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        let removed = ctx
            .repos
            .subscriptions
            .remove(&self.subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if removed {
            info!("Removed subscription: {:?}", self.subscription.endpoint());
        }
        Ok(removed)
    }
}
