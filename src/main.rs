use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use taskboard::auth::AuthMiddleware;
use taskboard::config::Config;
use taskboard::routes;
use taskboard::store::{PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pg = PgStore::connect_with_retry(&config.database_url, &config.connect_retry)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    pg.migrate()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let store: web::Data<dyn Store> = web::Data::from(Arc::new(pg) as Arc<dyn Store>);
    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("Starting taskboard server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(web::Data::new(config.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(config.jwt_secret.clone()))
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
