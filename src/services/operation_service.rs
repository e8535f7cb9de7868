//! services/operation_service.rs
//! Registro en SQLite de las operaciones que lanza la app.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use crate::models::operation_model::{
    CreateOperationRequest, CreateOperationResponse, ListOperationsResponse, OperationRecord,
    OperationStatus, OperationStatusResponse,
};

#[derive(Clone, Debug)]
pub struct OperationService {
    db_pool: Pool<Sqlite>,
}

impl OperationService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        OperationService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await?;
        Ok(())
    }

    /// Crea la operación en DB con estado "pending"
    pub async fn create_operation(
        &self,
        req: CreateOperationRequest,
    ) -> Result<CreateOperationResponse> {
        let op_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO operations (
                id, operation_type, status, error_message,
                is_async, created_at, updated_at, metadata
            )
            VALUES (?1, ?2, ?6, NULL, ?3, ?4, ?4, ?5)
            "#,
        )
        .bind(&op_id)
        .bind(&req.operation_type)
        .bind(req.is_async as i32)
        .bind(&now)
        .bind(&req.metadata)
        .bind(OperationStatus::Pending.as_str())
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar operation")?;

        Ok(CreateOperationResponse {
            id: op_id,
            message: "Operación creada".to_string(),
        })
    }

    /// Crea la operación y la deja ya en "running".
    /// Es el camino que usan los handlers para trabajos síncronos.
    pub async fn begin(&self, operation_type: &str, metadata: Option<String>) -> Result<String> {
        let created = self
            .create_operation(CreateOperationRequest {
                operation_type: operation_type.to_string(),
                is_async: false,
                metadata,
            })
            .await?;
        self.update_operation_status(&created.id, OperationStatus::Running, None)
            .await?;
        Ok(created.id)
    }

    /// Actualiza estado y error
    pub async fn update_operation_status(
        &self,
        op_id: &str,
        status: OperationStatus,
        error: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            UPDATE operations
            SET status = ?2,
                error_message = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(op_id)
        .bind(status.as_str())
        .bind(error)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al actualizar operación")?;

        Ok(())
    }

    pub async fn mark_operation_failed(&self, op_id: &str, error: String) -> Result<()> {
        self.update_operation_status(op_id, OperationStatus::Failed, Some(&error))
            .await
    }

    /// Obtiene la info de una operación
    pub async fn get_operation(&self, op_id: &str) -> Result<OperationRecord> {
        let row = sqlx::query(
            r#"
            SELECT
                id, operation_type, status, error_message,
                is_async, created_at, updated_at, metadata
            FROM operations
            WHERE id = ?1
            "#,
        )
        .bind(op_id)
        .fetch_one(&self.db_pool)
        .await
        .context("No se encontró operación con ese id")?;

        Ok(OperationRecord {
            id: row.get("id"),
            operation_type: row.get("operation_type"),
            status: row.get("status"),
            error_message: row.get("error_message"),
            is_async: row.get::<i64, _>("is_async") != 0,
            created_at: row.get::<String, _>("created_at").parse()?,
            updated_at: row.get::<String, _>("updated_at").parse()?,
            metadata: row.get("metadata"),
        })
    }

    /// Lista operaciones con paginación
    pub async fn list_operations(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<ListOperationsResponse> {
        let offset = (page.max(1) - 1) * page_size;

        let total_row = sqlx::query("SELECT COUNT(*) as cnt FROM operations")
            .fetch_one(&self.db_pool)
            .await?;
        let total = total_row.get::<i64, _>("cnt") as u64;

        let rows = sqlx::query(
            r#"
            SELECT
                id, operation_type, status, error_message,
                is_async, created_at, updated_at, metadata
            FROM operations
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page_size as i64)
        .bind(offset as i64)
        .fetch_all(&self.db_pool)
        .await?;

        let items: Vec<_> = rows
            .into_iter()
            .map(|row| OperationStatusResponse {
                id: row.get("id"),
                operation_type: row.get("operation_type"),
                status: row.get("status"),
                error_message: row.get("error_message"),
                is_async: row.get::<i64, _>("is_async") != 0,
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
                metadata: row.get("metadata"),
            })
            .collect();

        Ok(ListOperationsResponse {
            total,
            page,
            page_size,
            items,
        })
    }
}
