//! models/outline_model.rs
//! Estructuras para los borradores generados por el modelo.

use serde::{Deserialize, Serialize};

/// Tipo de borrador a componer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    /// Guion de video: resumen, hashtags, thumbnail y secciones con puntos
    Video,
    /// Artículo tipo columna: secciones con encabezado y cuerpo redactado
    Column,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComposeRequest {
    pub base_keyword: String,
    pub suggestion: String,
    pub kind: Option<DraftKind>,
    /// Cantidad de secciones (1 a 10, default 4)
    pub sections: Option<u32>,
    /// Minutos de video, o volumen de lectura para columnas
    pub duration_minutes: Option<u32>,
    pub target: Option<String>,
    pub purpose: Option<String>,
    pub model: Option<String>,
}

// Los structs siguientes deserializan el JSON que devuelve el modelo.
// Todos los campos llevan default: los modelos chicos omiten claves a veces.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSection {
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoOutline {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub thumbnail_text: String,
    #[serde(default)]
    pub outline: Vec<OutlineSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnArticle {
    #[serde(default)]
    pub title: String,
    /// El modelo a veces manda la categoría como lista; se normaliza a string
    #[serde(default, deserialize_with = "category_from_value")]
    pub category: String,
    #[serde(default)]
    pub sections: Vec<ColumnSection>,
}

fn category_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Resultado de componer un borrador: datos tipados + archivos guardados.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComposedDraft {
    Video {
        data: VideoOutline,
        markdown_file: String,
    },
    Column {
        data: ColumnArticle,
        markdown_file: String,
        json_file: String,
    },
}
