//! handlers/operation_handler.rs
//! Consulta y alta manual del registro de operaciones.

use actix_web::{web, HttpResponse};
use log::error;
use serde::Deserialize;

use crate::models::operation_model::CreateOperationRequest;
use crate::services::operation_service::OperationService;

/// Tope de página para no volcar el registro completo de una vez
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Deserialize)]
pub struct PaginationQuery {
    page: Option<u64>,
    page_size: Option<u64>,
}

/// POST /api/operations
/// Alta manual; los endpoints de videos/keywords/outlines registran las suyas.
pub async fn create_operation_endpoint(
    op_service: web::Data<OperationService>,
    body: web::Json<CreateOperationRequest>,
) -> HttpResponse {
    match op_service.create_operation(body.into_inner()).await {
        Ok(created) => HttpResponse::Ok().json(created),
        Err(e) => {
            error!("Error creando la operación: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudo crear la operación",
                "details": format!("{:?}", e)
            }))
        }
    }
}

/// GET /api/operations?page=1&page_size=10
pub async fn list_operations_endpoint(
    op_service: web::Data<OperationService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);

    match op_service.list_operations(page, page_size).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => {
            error!("Error listando operaciones: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "No se pudieron listar las operaciones",
                "details": format!("{:?}", e)
            }))
        }
    }
}

/// GET /api/operations/{id}
pub async fn get_operation_endpoint(
    op_service: web::Data<OperationService>,
    path: web::Path<String>,
) -> HttpResponse {
    let op_id = path.into_inner();

    match op_service.get_operation(&op_id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Operación no encontrada",
            "details": format!("{:?}", e)
        })),
    }
}
