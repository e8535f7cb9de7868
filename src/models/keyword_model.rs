//! models/keyword_model.rs
//! Estructuras para la generación de keywords sugeridos.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
}

/// Keyword sacado de un CSV de Google Trends (secciones TOP / RISING)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendKeyword {
    pub keyword: String,
    /// Valor de la columna de importancia ("100", "+250%", "Breakout"...)
    pub importance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateKeywordsRequest {
    /// Keyword base; debe existir un caché de videos para él
    pub query: String,
    /// Cantidad de keywords a pedir (default 10)
    pub num: Option<usize>,
    pub model: Option<String>,
    /// Contenido crudo de un CSV de Google Trends, opcional
    pub trends_csv: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateKeywordsResponse {
    pub saved_to: String,
    pub items: Vec<KeywordSuggestion>,
}
