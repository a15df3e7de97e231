use crate::error::PushReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use push_reminder_api_structs::subscribe::*;
use push_reminder_domain::PushSubscription;
use push_reminder_infra::PushReminderContext;

pub async fn subscribe_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PushReminderContext>,
) -> Result<HttpResponse, PushReminderError> {
    let usecase = SubscribeUseCase {
        subscription: body_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse::new()))
        .map_err(PushReminderError::from)
}

#[derive(Debug)]
pub struct SubscribeUseCase {
    pub subscription: PushSubscription,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PushReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubscribeUseCase {
    /// `true` if the subscription was not registered before
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "Subscribe";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .subscriptions
            .register(self.subscription.clone())
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
