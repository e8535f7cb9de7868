use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::{sqlite::SqliteConnectOptions, Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::keyword_service::KeywordService;
use crate::services::ollama_service::OllamaService;
use crate::services::operation_service::OperationService;
use crate::services::outline_service::OutlineService;
use crate::services::youtube_service::YoutubeService;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;
#[cfg(test)]
mod tests;

async fn setup_database() -> Pool<Sqlite> {
    // 1) Crear carpeta "data"
    std::fs::create_dir_all("data").expect("No se pudo crear directorio 'data'");

    // 2) Ruta final: ./data/operations.db
    let db_path = std::env::current_dir()
        .expect("No se pudo obtener el current_dir")
        .join("data")
        .join("operations.db");

    log::info!("Conectando a SQLite en {:?}", db_path);

    // 3) Conectarnos con SQLx
    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    Pool::<Sqlite>::connect_with(options)
        .await
        .expect("No se pudo conectar a la base de datos SQLite.")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env();
    if config.youtube_api_key.is_none() {
        log::warn!("YOUTUBE_API_KEY no está configurada; /api/videos fallará hasta definirla");
    }

    // Conectarnos a la DB
    let db_pool = setup_database().await;

    // OperationService
    let operation_service = OperationService::new(db_pool.clone());
    if let Err(e) = operation_service.run_migrations().await {
        panic!("Fallo en migraciones de 'operations': {:?}", e);
    }

    // Daemon de Ollama: se intenta dejar listo al arrancar; si falla,
    // queda el endpoint /api/ollama/init para reintentar desde la UI.
    let ollama_service = OllamaService::new(&config.ollama_host);
    match ollama_service.ensure_running().await {
        Ok(true) => {
            if let Err(e) = ollama_service
                .pull_model_if_needed(&config.default_model)
                .await
            {
                log::warn!(
                    "No se pudo preparar el modelo {}: {:?}",
                    config.default_model,
                    e
                );
            }
        }
        Ok(false) => {
            log::warn!("Ollama no respondió; ejecuta `ollama serve` o usa POST /api/ollama/init");
        }
        Err(e) => {
            log::warn!("Error levantando Ollama: {:?}", e);
        }
    }

    let youtube_service = YoutubeService::new(config.youtube_api_key.clone(), &config.cache_dir);
    let keyword_service = KeywordService::new(ollama_service.clone(), &config.cache_dir);
    let outline_service = OutlineService::new(ollama_service.clone(), &config.outlines_dir);

    // Levantar servidor
    let bind_addr = config.bind_addr.clone();
    log::info!("Levantando servidor en {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(ollama_service.clone()))
            .app_data(web::Data::new(youtube_service.clone()))
            .app_data(web::Data::new(keyword_service.clone()))
            .app_data(web::Data::new(outline_service.clone()))
            .app_data(web::Data::new(operation_service.clone()))
            .configure(app::init_app)
    })
    .workers(1)
    .bind(bind_addr)?
    .run()
    .await
}
