//! tests/operation_tests.rs
//! Pruebas del registro de operaciones sobre SQLite en memoria.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::models::operation_model::{CreateOperationRequest, OperationStatus};
    use crate::services::operation_service::OperationService;

    // Una sola conexión: con más, cada una vería su propia DB en memoria
    async fn create_test_service() -> OperationService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("no se pudo abrir la DB en memoria");

        let service = OperationService::new(pool);
        service
            .run_migrations()
            .await
            .expect("las migraciones fallaron");
        service
    }

    #[test]
    async fn test_create_and_get_operation() {
        let service = create_test_service().await;

        let created = service
            .create_operation(CreateOperationRequest {
                operation_type: "fetch_videos".to_string(),
                is_async: false,
                metadata: Some(r#"{"query":"rust"}"#.to_string()),
            })
            .await
            .expect("create falló");

        let record = service.get_operation(&created.id).await.expect("get falló");
        assert_eq!(record.id, created.id);
        assert_eq!(record.operation_type, "fetch_videos");
        assert_eq!(record.status, "pending");
        assert!(!record.is_async);
        assert_eq!(record.metadata.as_deref(), Some(r#"{"query":"rust"}"#));
    }

    #[test]
    async fn test_begin_leaves_operation_running() {
        let service = create_test_service().await;

        let op_id = service
            .begin("compose_outline", None)
            .await
            .expect("begin falló");

        let record = service.get_operation(&op_id).await.expect("get falló");
        assert_eq!(record.status, "running");
    }

    #[test]
    async fn test_done_operation_clears_error() {
        let service = create_test_service().await;
        let op_id = service.begin("fetch_videos", None).await.unwrap();

        service
            .update_operation_status(&op_id, OperationStatus::Done, None)
            .await
            .expect("update falló");

        let record = service.get_operation(&op_id).await.unwrap();
        assert_eq!(record.status, "done");
        assert!(record.error_message.is_none());
    }

    #[test]
    async fn test_failed_operation_keeps_error() {
        let service = create_test_service().await;
        let op_id = service.begin("generate_keywords", None).await.unwrap();

        service
            .mark_operation_failed(&op_id, "sin modelo disponible".to_string())
            .await
            .expect("update falló");

        let record = service.get_operation(&op_id).await.unwrap();
        assert_eq!(record.status, "failed");
        assert_eq!(record.error_message.as_deref(), Some("sin modelo disponible"));
    }

    #[test]
    async fn test_list_operations_pagination() {
        let service = create_test_service().await;
        for i in 0..3 {
            service
                .create_operation(CreateOperationRequest {
                    operation_type: format!("op_{}", i),
                    is_async: false,
                    metadata: None,
                })
                .await
                .unwrap();
        }

        let page1 = service.list_operations(1, 2).await.expect("list falló");
        assert_eq!(page1.total, 3);
        assert_eq!(page1.items.len(), 2);

        let page2 = service.list_operations(2, 2).await.expect("list falló");
        assert_eq!(page2.items.len(), 1);
    }

    #[test]
    async fn test_get_missing_operation_fails() {
        let service = create_test_service().await;
        assert!(service.get_operation("no-existe").await.is_err());
    }
}
