use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use slms::config::Config;
use slms::db::init_db;
use slms::docs::ApiDoc;
use slms::notify::{Notifier, SMS_QUEUE_CAPACITY, TwilioClient, run_sms_worker};
use slms::routes;

use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Student Leave Management System"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;

    let twilio = TwilioClient::new(&config);
    if !twilio.is_configured() {
        warn!("Twilio credentials missing, outbound SMS will be dropped");
    }

    // SMS delivery runs on its own task; handlers only push onto the queue.
    let (notifier, sms_rx) = Notifier::channel(SMS_QUEUE_CAPACITY);
    actix_web::rt::spawn(run_sms_worker(sms_rx, twilio));

    // Clone values for the closure (avoid move issues)
    let server_addr = config.server_addr.clone();
    let pool_for_shutdown = pool.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(notifier.clone()))
            .service(index)
            .configure(routes::configure)
    })
    .bind(server_addr)?
    .run()
    .await?;

    info!("Server stopped, closing database pool");
    pool_for_shutdown.close().await;

    Ok(())
}
