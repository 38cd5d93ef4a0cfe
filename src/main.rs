use actix_web::{App, HttpServer, middleware, web};

use seva_desk::config::Config;
use seva_desk::db;
use seva_desk::routes::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match db::init_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = db::run_migrations(&pool).await {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let state = AppState::postgres(&pool, config.auth.clone());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| routes::configure(cfg, &state))
            // Default 404 handler (must be registered last)
            .default_service(web::to(routes::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
