//! services/keyword_service.rs
//! Generación de keywords sugeridos a partir de títulos de videos
//! (y opcionalmente de un CSV de Google Trends).

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::PathBuf, sync::Arc};

use crate::models::keyword_model::{KeywordSuggestion, TrendKeyword};
use crate::models::ollama_model::GenerationOptions;
use crate::models::video_model::VideoRecord;
use crate::services::ollama_service::OllamaService;

/// Títulos de muestra que entran al prompt
const SAMPLE_TITLES: usize = 10;
/// Tokens máximos para la lista de keywords
const SUGGESTION_NUM_PREDICT: u32 = 500;

static CSV_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```csv\n(.*?)```").expect("regex de bloque csv válido"));

#[derive(Clone)]
pub struct KeywordService {
    ollama: OllamaService,
    cache_dir: Arc<PathBuf>,
}

impl KeywordService {
    pub fn new(ollama: OllamaService, cache_dir: &str) -> Self {
        Self {
            ollama,
            cache_dir: Arc::new(PathBuf::from(cache_dir)),
        }
    }

    /// Pide al modelo `num` topics nuevos y los persiste como CSV.
    pub async fn generate_suggestions(
        &self,
        model: &str,
        query: &str,
        videos: &[VideoRecord],
        trends: &[TrendKeyword],
        num: usize,
    ) -> Result<SuggestionBatch> {
        let prompt = build_suggestion_prompt(query, videos, trends, num);
        let options = GenerationOptions {
            temperature: 0.7,
            num_predict: SUGGESTION_NUM_PREDICT,
        };

        let reply = self
            .ollama
            .chat(model, &prompt, options)
            .await
            .context("Falló la generación de keywords")?;

        let csv_content = extract_csv_block(&reply)
            .ok_or_else(|| anyhow!("La respuesta del modelo no contiene un bloque CSV"))?;
        let suggestions = parse_suggestions_csv(&csv_content)?;
        if suggestions.is_empty() {
            return Err(anyhow!("El modelo no devolvió ningún keyword"));
        }

        let file = self.save_suggestions(&suggestions)?;
        Ok(SuggestionBatch { suggestions, file })
    }

    fn save_suggestions(&self, suggestions: &[KeywordSuggestion]) -> Result<PathBuf> {
        fs::create_dir_all(self.cache_dir.as_ref())
            .with_context(|| format!("No se pudo crear {:?}", self.cache_dir))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.cache_dir.join(format!("suggestions_{}.csv", stamp));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("No se pudo crear {:?}", path))?;
        for suggestion in suggestions {
            writer.serialize(suggestion)?;
        }
        writer.flush()?;

        log::info!("Keywords sugeridos guardados en {:?}", path);
        Ok(path)
    }
}

/// Resultado de una generación de keywords
pub struct SuggestionBatch {
    pub suggestions: Vec<KeywordSuggestion>,
    pub file: PathBuf,
}

pub(crate) fn build_suggestion_prompt(
    query: &str,
    videos: &[VideoRecord],
    trends: &[TrendKeyword],
    num: usize,
) -> String {
    let titles_text = videos
        .iter()
        .take(SAMPLE_TITLES)
        .map(|video| video.title.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut trend_text = String::new();
    if !trends.is_empty() {
        trend_text.push_str(
            "\n\nAdditionally, Google Trends reports the following related keywords.\n\
             These are queries that are currently popular or rising fast:\n\n",
        );
        for trend in trends {
            trend_text.push_str(&format!("{}: {}\n", trend.keyword, trend.importance));
        }
    }

    let trend_clause = if trends.is_empty() {
        ""
    } else {
        " and the keywords highlighted by Google Trends, which carry extra weight,"
    };

    format!(
        "You are a skilled copywriter.\n\
         Example video titles found for the search keyword \"{query}\":\n\n\
         {titles_text}\n\
         {trend_text}\n\
         Based on the themes these videos share{trend_clause} generate {num} new related topics.\n\
         Avoid proper nouns such as place names, product names or people, and keep the topics generic.\n\n\
         Output them in the following CSV format:\n\
         ```csv\n\
         keyword\n\
         topic 1\n\
         topic 2\n\
         ...\n\
         ```\n"
    )
}

/// Extrae el bloque ```csv de la respuesta; si el modelo no lo cerró bien,
/// cae a buscar la línea con "keyword" y tomar lo que sigue.
pub(crate) fn extract_csv_block(reply: &str) -> Option<String> {
    if let Some(caps) = CSV_BLOCK_RE.captures(reply) {
        return Some(caps[1].trim().to_string());
    }

    let mut lines = Vec::new();
    let mut in_csv = false;
    for line in reply.lines() {
        if line.to_lowercase().contains("keyword") {
            in_csv = true;
        }
        if in_csv && !line.trim().is_empty() {
            lines.push(line.trim());
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Parsea el CSV devuelto por el modelo. La cabecera se normaliza
/// (trim + minúsculas) y debe incluir una columna "keyword".
pub(crate) fn parse_suggestions_csv(content: &str) -> Result<Vec<KeywordSuggestion>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("CSV sin cabecera")?.clone();
    let keyword_idx = headers
        .iter()
        .position(|header| header.trim().to_lowercase() == "keyword")
        .ok_or_else(|| anyhow!("El CSV no contiene la columna 'keyword'"))?;

    let mut suggestions = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(value) = row.get(keyword_idx) {
            let value = value.trim();
            if !value.is_empty() {
                suggestions.push(KeywordSuggestion {
                    keyword: value.to_string(),
                });
            }
        }
    }
    Ok(suggestions)
}

/// Parsea el CSV exportado de Google Trends ("related queries"):
/// un preámbulo, una sección TOP y una sección RISING, ambas "keyword,valor".
pub(crate) fn parse_trends_csv(content: &str) -> Vec<TrendKeyword> {
    enum Section {
        Top,
        Rising,
    }

    let mut top = Vec::new();
    let mut rising = Vec::new();
    let mut section: Option<Section> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains("TOP") {
            section = Some(Section::Top);
            continue;
        }
        if line.contains("RISING") {
            section = Some(Section::Rising);
            continue;
        }
        let Some(current) = &section else {
            // preámbulo antes de la primera sección
            continue;
        };
        if line.contains("Category:") {
            continue;
        }
        let Some(comma) = line.find(',') else {
            continue;
        };

        let keyword = line[..comma].trim_matches('"').to_string();
        let importance = line[comma + 1..].trim_matches('"').to_string();
        let entry = TrendKeyword {
            keyword,
            importance,
        };
        match current {
            Section::Top => top.push(entry),
            Section::Rising => rising.push(entry),
        }
    }

    top.extend(rising);
    top
}
