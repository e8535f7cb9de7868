//! handlers/outline_handler.rs
//! Endpoints para componer borradores y servir los archivos guardados.

use std::path::Path;

use actix_files::NamedFile;
use actix_web::{web, HttpResponse};
use log::error;

use crate::config::app_config::AppConfig;
use crate::models::operation_model::OperationStatus;
use crate::models::outline_model::ComposeRequest;
use crate::services::operation_service::OperationService;
use crate::services::outline_service::OutlineService;

/// POST /api/outlines
/// Compone un borrador para un keyword elegido y lo guarda en disco.
pub async fn compose_outline_endpoint(
    outline_service: web::Data<OutlineService>,
    op_service: web::Data<OperationService>,
    config: web::Data<AppConfig>,
    body: web::Json<ComposeRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let model = req
        .model
        .clone()
        .unwrap_or_else(|| config.default_model.clone());

    let metadata = serde_json::json!({
        "base_keyword": &req.base_keyword,
        "suggestion": &req.suggestion,
    })
    .to_string();
    let op_id = match op_service.begin("compose_outline", Some(metadata)).await {
        Ok(id) => id,
        Err(e) => {
            error!("Error registrando la operación: {:?}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo registrar la operación",
                "details": format!("{:?}", e)
            }));
        }
    };

    match outline_service.compose(&model, &req).await {
        Ok(draft) => {
            if let Err(e) = op_service
                .update_operation_status(&op_id, OperationStatus::Done, None)
                .await
            {
                error!("Error cerrando la operación {}: {:?}", op_id, e);
            }
            HttpResponse::Ok().json(draft)
        }
        Err(e) => {
            error!("Error componiendo el borrador: {:?}", e);
            let _ = op_service
                .mark_operation_failed(&op_id, format!("{e:?}"))
                .await;
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo componer el borrador",
                "details": format!("{:?}", e)
            }))
        }
    }
}

/// GET /api/outlines/files/{filename}
/// Sirve un borrador que haya sido guardado en disco.
///
/// Ejemplo de URL: http://localhost:8501/api/outlines/files/rust_async_20250101_120000.md
pub async fn serve_outline_file(
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<NamedFile, std::io::Error> {
    let filename = path.into_inner();
    let file_path = Path::new(&config.outlines_dir).join(filename);

    // Actix Files gestiona los headers de Content-Type apropiados.
    // Retorna 404 si no existe.
    Ok(NamedFile::open(file_path)?)
}
