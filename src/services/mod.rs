//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod keyword_service;
pub mod ollama_service;
pub mod operation_service;
pub mod outline_service;
pub mod youtube_service;
