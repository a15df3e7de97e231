pub mod remove_subscription;
mod subscribe;

use actix_web::web;
use subscribe::subscribe_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/subscribe", web::post().to(subscribe_controller));
}
