mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
mod subscription;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use error::PushReminderError;
use job_schedulers::{restore_reminder_timers, start_delivery_worker};
use push_reminder_infra::PushReminderContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    subscription::configure_routes(cfg);
}

fn cors(context: &PushReminderContext) -> Cors {
    let origins = &context.config.cors_allowed_origins;
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| PushReminderError::BadClientData(err.to_string()).into())
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: PushReminderContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context).await;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn start_job_schedulers(context: PushReminderContext) {
        start_delivery_worker(context.clone());
        restore_reminder_timers(&context).await;
    }

    async fn configure_server(
        context: PushReminderContext,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(cors(&ctx))
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(json_config())
                .app_data(web::Data::new(ctx))
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
