use crate::error::PushReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use push_reminder_api_structs::get_reminders::*;
use push_reminder_domain::ScheduledReminder;
use push_reminder_infra::PushReminderContext;

pub async fn get_reminders_controller(
    ctx: web::Data<PushReminderContext>,
) -> Result<HttpResponse, PushReminderError> {
    execute(GetRemindersUseCase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|_| PushReminderError::InternalError)
}

#[derive(Debug)]
pub struct GetRemindersUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<ScheduledReminder>;

    type Error = ();

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminders.find_all().await)
    }
}
