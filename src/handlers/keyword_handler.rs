//! handlers/keyword_handler.rs
//! Endpoint para generar keywords sugeridos con el modelo.

use actix_web::{web, HttpResponse};
use log::error;

use crate::config::app_config::AppConfig;
use crate::models::keyword_model::{GenerateKeywordsRequest, GenerateKeywordsResponse};
use crate::models::operation_model::OperationStatus;
use crate::services::keyword_service::{parse_trends_csv, KeywordService};
use crate::services::operation_service::OperationService;
use crate::services::youtube_service::YoutubeService;

/// Keywords a pedir si el cliente no manda cantidad
const DEFAULT_NUM_KEYWORDS: usize = 10;

/// POST /api/keywords
pub async fn generate_keywords_endpoint(
    youtube_service: web::Data<YoutubeService>,
    keyword_service: web::Data<KeywordService>,
    op_service: web::Data<OperationService>,
    config: web::Data<AppConfig>,
    body: web::Json<GenerateKeywordsRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let num = req.num.unwrap_or(DEFAULT_NUM_KEYWORDS);
    let model = req
        .model
        .clone()
        .unwrap_or_else(|| config.default_model.clone());

    // Los títulos de muestra salen del caché que dejó /api/videos
    let videos = match youtube_service.load_cached(&req.query) {
        Ok(Some(videos)) => videos,
        Ok(None) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!(
                    "No hay datos de YouTube para \"{}\"; llama primero a /api/videos",
                    req.query
                )
            }));
        }
        Err(e) => {
            error!("Error leyendo el caché de videos: {:?}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo leer el caché de videos",
                "details": format!("{:?}", e)
            }));
        }
    };

    let trends = req
        .trends_csv
        .as_deref()
        .map(parse_trends_csv)
        .unwrap_or_default();

    let metadata = serde_json::json!({ "query": &req.query, "num": num }).to_string();
    let op_id = match op_service.begin("generate_keywords", Some(metadata)).await {
        Ok(id) => id,
        Err(e) => {
            error!("Error registrando la operación: {:?}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo registrar la operación",
                "details": format!("{:?}", e)
            }));
        }
    };

    match keyword_service
        .generate_suggestions(&model, &req.query, &videos, &trends, num)
        .await
    {
        Ok(batch) => {
            if let Err(e) = op_service
                .update_operation_status(&op_id, OperationStatus::Done, None)
                .await
            {
                error!("Error cerrando la operación {}: {:?}", op_id, e);
            }
            let saved_to = batch
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            HttpResponse::Ok().json(GenerateKeywordsResponse {
                saved_to,
                items: batch.suggestions,
            })
        }
        Err(e) => {
            error!("Error generando keywords: {:?}", e);
            let _ = op_service
                .mark_operation_failed(&op_id, format!("{e:?}"))
                .await;
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudieron generar keywords",
                "details": format!("{:?}", e)
            }))
        }
    }
}
