mod cancel_reminder;
mod create_reminder;
mod get_reminders;
pub mod send_reminder;
mod subscribers;

use actix_web::web;
use cancel_reminder::cancel_reminder_controller;
use create_reminder::create_reminder_controller;
use get_reminders::get_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::post().to(create_reminder_controller));
    cfg.route("/scheduled", web::get().to(get_reminders_controller));
    cfg.route(
        "/scheduled/{reminder_id}",
        web::delete().to(cancel_reminder_controller),
    );
}
