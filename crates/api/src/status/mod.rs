use actix_web::{web, HttpResponse};
use push_reminder_api_structs::get_service_health::*;
use push_reminder_infra::PushReminderContext;

async fn status(ctx: web::Data<PushReminderContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        push_enabled: ctx.config.vapid.is_some(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
