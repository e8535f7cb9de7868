//! models/ollama_model.rs
//! Estructuras para hablar con el daemon de Ollama (API HTTP local).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Opciones de generación que acepta /api/chat
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Cantidad máxima de tokens a generar
    pub num_predict: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Respuesta de GET /api/tags
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OllamaStatusResponse {
    pub running: bool,
    pub current_model: String,
    pub model_options: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitRequest {
    /// Modelo a preparar; si falta se usa el default de la config
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitResponse {
    pub success: bool,
    pub message: String,
}
