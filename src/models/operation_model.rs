//! models/operation_model.rs
//! Registro de operaciones (fetch de videos, generación de keywords, borradores).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estados por los que pasa una operación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
    Failed,
}

impl OperationStatus {
    /// Representación que se persiste en la columna `status`
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Pending => "pending",
            OperationStatus::Running => "running",
            OperationStatus::Done => "done",
            OperationStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: String,
    pub operation_type: String,
    pub status: String,
    pub error_message: Option<String>,
    pub is_async: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: Option<String>, // JSON adicional (query, keyword, etc.)
}

/// Request para crear una operación
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOperationRequest {
    // "fetch_videos", "generate_keywords", "compose_outline", ...
    pub operation_type: String,
    pub is_async: bool,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOperationResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationStatusResponse {
    pub id: String,
    pub operation_type: String,
    pub status: String,
    pub error_message: Option<String>,
    pub is_async: bool,
    pub created_at: String,
    pub updated_at: String,
    pub metadata: Option<String>,
}

/// Para listar operaciones con paginación
#[derive(Debug, Clone, Serialize)]
pub struct ListOperationsResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<OperationStatusResponse>,
}
