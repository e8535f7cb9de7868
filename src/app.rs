//! app.rs
use crate::handlers::{
    keyword_handler, ollama_handler, operation_handler, outline_handler, video_handler,
};
use actix_files::Files;
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/ollama")
                    .route("/status", web::get().to(ollama_handler::ollama_status_endpoint))
                    .route("/init", web::post().to(ollama_handler::ollama_init_endpoint))
                    .route("/models", web::get().to(ollama_handler::list_models_endpoint)),
            )
            .service(
                web::scope("/videos")
                    .route("", web::post().to(video_handler::fetch_videos_endpoint)),
            )
            .service(
                web::scope("/keywords")
                    .route("", web::post().to(keyword_handler::generate_keywords_endpoint)),
            )
            .service(
                web::scope("/outlines")
                    .route("", web::post().to(outline_handler::compose_outline_endpoint))
                    .route(
                        "/files/{filename}",
                        web::get().to(outline_handler::serve_outline_file),
                    ),
            )
            .service(
                web::scope("/operations")
                    .route(
                        "",
                        web::post().to(operation_handler::create_operation_endpoint),
                    )
                    .route(
                        "",
                        web::get().to(operation_handler::list_operations_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::get().to(operation_handler::get_operation_endpoint),
                    ),
            ),
    )
    // La UI local; se registra al final para que /api gane el match
    .service(Files::new("/", "./static").index_file("index.html"));
}
