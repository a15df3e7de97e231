use super::subscribers::DisarmTimerOnReminderCancelled;
use crate::error::PushReminderError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use push_reminder_api_structs::cancel_reminder::*;
use push_reminder_domain::ID;
use push_reminder_infra::{CancelReminderError, PushReminderContext};

pub async fn cancel_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PushReminderContext>,
) -> Result<HttpResponse, PushReminderError> {
    // An id that can not be parsed can not belong to any reminder
    let reminder_id = path_params.reminder_id.parse::<ID>().map_err(|_| {
        PushReminderError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            path_params.reminder_id
        ))
    })?;
    let usecase = CancelReminderUseCase { reminder_id };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse::new()))
        .map_err(PushReminderError::from)
}

#[derive(Debug)]
pub struct CancelReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder_id: ID,
    /// `false` when the reminder had already been sent or cancelled
    pub cancelled: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PushReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelReminder";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.cancel(&self.reminder_id).await {
            Ok(cancelled) => Ok(UseCaseRes {
                reminder_id: self.reminder_id.clone(),
                cancelled,
            }),
            Err(CancelReminderError::NotFound(id)) => Err(UseCaseError::NotFound(id)),
            Err(CancelReminderError::Store(_)) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DisarmTimerOnReminderCancelled)]
    }
}
