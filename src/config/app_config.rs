//! config/app_config.rs
//! Configuración global del servicio (daemon de modelos, rutas, credenciales).

use serde::{Deserialize, Serialize};

/// Configuración de la app, con valores por defecto
/// (los valores reales vienen del entorno / .env)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dirección donde escucha el servidor web local
    pub bind_addr: String,
    /// URL base del daemon de Ollama
    pub ollama_host: String,
    /// Modelo que se usa si el cliente no indica uno
    pub default_model: String,
    /// Modelos entre los que puede alternar la UI
    pub model_options: Vec<String>,
    /// API key de YouTube Data v3; sin ella /api/videos no funciona
    pub youtube_api_key: Option<String>,
    /// Carpeta donde se cachean los CSV de videos y sugerencias
    pub cache_dir: String,
    /// Carpeta donde se guardan los borradores generados
    pub outlines_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: "127.0.0.1:8501".to_string(),
            ollama_host: "http://localhost:11434".to_string(),
            default_model: "gemma3:4b".to_string(),
            model_options: vec!["gemma3:4b".to_string(), "gemma3:12b".to_string()],
            youtube_api_key: None,
            cache_dir: "data/cache".to_string(),
            outlines_dir: "outlines".to_string(),
        }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno, cayendo a los defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            ollama_host: env_or("OLLAMA_HOST", defaults.ollama_host),
            default_model: env_or("DEFAULT_MODEL", defaults.default_model),
            model_options: defaults.model_options,
            youtube_api_key: std::env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            cache_dir: env_or("CACHE_DIR", defaults.cache_dir),
            outlines_dir: env_or("OUTLINES_DIR", defaults.outlines_dir),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default)
}
