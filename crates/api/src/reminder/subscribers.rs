use super::{
    cancel_reminder::{CancelReminderUseCase, UseCaseRes},
    create_reminder::CreateReminderUseCase,
};
use crate::shared::usecase::Subscriber;
use push_reminder_domain::ScheduledReminder;
use push_reminder_infra::PushReminderContext;

pub struct ArmTimerOnReminderCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReminderUseCase> for ArmTimerOnReminderCreated {
    async fn notify(&self, e: &ScheduledReminder, ctx: &PushReminderContext) {
        ctx.timers.arm(e);
    }
}

pub struct DisarmTimerOnReminderCancelled;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelReminderUseCase> for DisarmTimerOnReminderCancelled {
    async fn notify(&self, e: &UseCaseRes, ctx: &PushReminderContext) {
        // Sent reminders have no timer left, this is a no-op for them
        ctx.timers.cancel(&e.reminder_id);
    }
}
