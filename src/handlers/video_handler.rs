//! handlers/video_handler.rs
//! Endpoint para obtener datos de YouTube (con caché en CSV).

use actix_web::{web, HttpResponse};
use log::error;

use crate::models::operation_model::OperationStatus;
use crate::models::video_model::{FetchVideosRequest, FetchVideosResponse};
use crate::services::operation_service::OperationService;
use crate::services::youtube_service::{YoutubeService, DEFAULT_MAX_RESULTS};

/// POST /api/videos
pub async fn fetch_videos_endpoint(
    youtube_service: web::Data<YoutubeService>,
    op_service: web::Data<OperationService>,
    body: web::Json<FetchVideosRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "El campo 'query' no puede estar vacío"
        }));
    }
    let max_results = req.max_results.unwrap_or(DEFAULT_MAX_RESULTS);

    let metadata = serde_json::json!({ "query": &query }).to_string();
    let op_id = match op_service.begin("fetch_videos", Some(metadata)).await {
        Ok(id) => id,
        Err(e) => {
            error!("Error registrando la operación: {:?}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo registrar la operación",
                "details": format!("{:?}", e)
            }));
        }
    };

    match youtube_service.fetch_videos_cached(&query, max_results).await {
        Ok(fetch) => {
            if let Err(e) = op_service
                .update_operation_status(&op_id, OperationStatus::Done, None)
                .await
            {
                error!("Error cerrando la operación {}: {:?}", op_id, e);
            }
            let cache_file = fetch
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            HttpResponse::Ok().json(FetchVideosResponse {
                total: fetch.videos.len(),
                from_cache: fetch.from_cache,
                cache_file,
                items: fetch.videos,
            })
        }
        Err(e) => {
            error!("Error obteniendo datos de YouTube: {:?}", e);
            let _ = op_service
                .mark_operation_failed(&op_id, format!("{e:?}"))
                .await;
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudieron obtener datos de YouTube",
                "details": format!("{:?}", e)
            }))
        }
    }
}
