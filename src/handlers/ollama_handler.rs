//! handlers/ollama_handler.rs
//! Endpoints de estado e inicialización del daemon de Ollama.

use actix_web::{web, HttpResponse};
use log::error;

use crate::config::app_config::AppConfig;
use crate::models::ollama_model::{InitRequest, InitResponse, OllamaStatusResponse};
use crate::services::ollama_service::OllamaService;

/// GET /api/ollama/status
pub async fn ollama_status_endpoint(
    ollama_service: web::Data<OllamaService>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    let running = ollama_service.check_status().await;
    HttpResponse::Ok().json(OllamaStatusResponse {
        running,
        current_model: config.default_model.clone(),
        model_options: config.model_options.clone(),
    })
}

/// POST /api/ollama/init
/// Levanta el daemon si hace falta y prepara el modelo solicitado.
pub async fn ollama_init_endpoint(
    ollama_service: web::Data<OllamaService>,
    config: web::Data<AppConfig>,
    body: web::Json<InitRequest>,
) -> HttpResponse {
    let model = body
        .model
        .clone()
        .unwrap_or_else(|| config.default_model.clone());

    match ollama_service.ensure_running().await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::ServiceUnavailable().json(InitResponse {
                success: false,
                message: "El daemon no respondió; ejecuta `ollama serve` en una terminal"
                    .to_string(),
            });
        }
        Err(e) => {
            error!("Error levantando Ollama: {:?}", e);
            return HttpResponse::InternalServerError().json(InitResponse {
                success: false,
                message: format!("No se pudo levantar Ollama: {:?}", e),
            });
        }
    }

    match ollama_service.pull_model_if_needed(&model).await {
        Ok(pulled) => HttpResponse::Ok().json(InitResponse {
            success: true,
            message: if pulled {
                format!("Modelo {} descargado", model)
            } else {
                format!("Modelo {} listo", model)
            },
        }),
        Err(e) => {
            error!("Error preparando el modelo {}: {:?}", model, e);
            HttpResponse::InternalServerError().json(InitResponse {
                success: false,
                message: format!("No se pudo preparar el modelo: {:?}", e),
            })
        }
    }
}

/// GET /api/ollama/models
pub async fn list_models_endpoint(ollama_service: web::Data<OllamaService>) -> HttpResponse {
    match ollama_service.list_models().await {
        Ok(models) => HttpResponse::Ok().json(models),
        Err(e) => {
            error!("Error listando modelos: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo consultar el daemon de Ollama",
                "details": format!("{:?}", e)
            }))
        }
    }
}
