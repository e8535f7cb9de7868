//! models/video_model.rs
//! Estructuras de datos para los videos obtenidos de YouTube.

use serde::{Deserialize, Serialize};

/// Un video con sus estadísticas, tal como se guarda en el caché CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    #[serde(rename = "viewCount")]
    pub view_count: u64,
    #[serde(rename = "likeCount")]
    pub like_count: u64,
    /// Duración ya normalizada a "H:MM:SS"
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchVideosRequest {
    pub query: String,
    /// Tope de resultados a acumular entre páginas (default 200)
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchVideosResponse {
    pub total: usize,
    /// true si los datos salieron de un CSV previo en vez de la API
    pub from_cache: bool,
    pub cache_file: String,
    pub items: Vec<VideoRecord>,
}
