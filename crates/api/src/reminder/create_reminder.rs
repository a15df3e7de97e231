use super::subscribers::ArmTimerOnReminderCreated;
use crate::error::PushReminderError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use push_reminder_api_structs::create_reminder::*;
use push_reminder_domain::{
    validate_reminder_input, NotificationPayload, ReminderValidationError, ScheduledReminder,
    MAX_PAYLOAD_BYTES,
};
use push_reminder_infra::{CreateReminderError, PushReminderContext};
use tracing::debug;

pub async fn create_reminder_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PushReminderContext>,
) -> Result<HttpResponse, PushReminderError> {
    let body = body_params.0;
    let usecase = CreateReminderUseCase {
        text: body.text,
        timestamp: body.timestamp,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(PushReminderError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub text: Option<String>,
    pub timestamp: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(ReminderValidationError),
    StorageError,
}

impl From<UseCaseError> for PushReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = ScheduledReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        // Rejected requests must leave the table untouched, so validate before compacting
        validate_reminder_input(self.text.as_deref(), self.timestamp)
            .map_err(UseCaseError::InvalidReminder)?;
        let text = self.text.as_deref().unwrap_or_default();
        if !NotificationPayload::new(&ctx.config.notification_title, text).fits_push_record() {
            return Err(UseCaseError::InvalidReminder(
                ReminderValidationError::TextTooLong {
                    max: MAX_PAYLOAD_BYTES,
                },
            ));
        }

        let dropped = ctx.repos.reminders.compact().await;
        if dropped > 0 {
            debug!("Dropped {} sent or cancelled reminders", dropped);
        }

        let now = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminders
            .create(self.text.take(), self.timestamp, now)
            .await
            .map_err(|e| match e {
                CreateReminderError::Invalid(e) => UseCaseError::InvalidReminder(e),
                CreateReminderError::Store(_) => UseCaseError::StorageError,
            })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ArmTimerOnReminderCreated)]
    }
}
