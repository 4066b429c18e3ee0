use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizgen_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    config.validate();

    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialize application state");

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::generate_quiz)
            .service(handlers::get_history)
            .service(handlers::health_check)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
