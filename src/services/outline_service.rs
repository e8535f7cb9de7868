//! services/outline_service.rs
//! Composición de borradores (guiones de video y columnas) vía el modelo.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::PathBuf, sync::Arc};

use crate::models::ollama_model::GenerationOptions;
use crate::models::outline_model::{
    ColumnArticle, ComposeRequest, ComposedDraft, DraftKind, VideoOutline,
};
use crate::services::ollama_service::OllamaService;

const DEFAULT_SECTIONS: u32 = 4;
const DEFAULT_DURATION_MINUTES: u32 = 15;
/// Tokens máximos por tipo de borrador; las columnas llevan más texto
const VIDEO_NUM_PREDICT: u32 = 2000;
const COLUMN_NUM_PREDICT: u32 = 4000;
/// Caracteres estimados de lectura por minuto
const CHARS_PER_MINUTE: u32 = 400;
/// Largo máximo de cada componente del nombre de archivo
const FILENAME_COMPONENT_LEN: usize = 20;

static JSON_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").expect("regex de bloque json válido"));
static UNSAFE_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("regex de sanitización válido"));

#[derive(Clone)]
pub struct OutlineService {
    ollama: OllamaService,
    save_dir: Arc<PathBuf>,
}

impl OutlineService {
    pub fn new(ollama: OllamaService, save_dir: &str) -> Self {
        Self {
            ollama,
            save_dir: Arc::new(PathBuf::from(save_dir)),
        }
    }

    /// Compone un borrador para `base_keyword + suggestion`: arma el prompt,
    /// parsea el JSON de la respuesta y guarda el resultado en disco.
    pub async fn compose(&self, model: &str, req: &ComposeRequest) -> Result<ComposedDraft> {
        let kind = req.kind.unwrap_or(DraftKind::Video);
        let sections = req.sections.unwrap_or(DEFAULT_SECTIONS).clamp(1, 10);
        let duration = req.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        let full_topic = format!("{} {}", req.base_keyword, req.suggestion);

        let target = provided(&req.target);
        let purpose = provided(&req.purpose);

        let (prompt, num_predict) = match kind {
            DraftKind::Video => (
                build_video_prompt(&full_topic, sections, duration, target, purpose),
                VIDEO_NUM_PREDICT,
            ),
            DraftKind::Column => (
                build_column_prompt(&full_topic, sections, duration, target, purpose),
                COLUMN_NUM_PREDICT,
            ),
        };

        let options = GenerationOptions {
            temperature: 0.7,
            num_predict,
        };
        let reply = self
            .ollama
            .chat(model, &prompt, options)
            .await
            .context("Falló la composición del borrador")?;

        let json_str = extract_json_block(&reply)
            .ok_or_else(|| anyhow!("La respuesta del modelo no contiene JSON"))?;

        let stem = draft_stem(&req.base_keyword, &req.suggestion);
        match kind {
            DraftKind::Video => {
                let outline: VideoOutline = serde_json::from_str(&json_str).map_err(|e| {
                    anyhow!("JSON inválido del modelo ({}). Respuesta cruda:\n{}", e, reply)
                })?;

                let markdown = render_video_markdown(&outline);
                let markdown_file = self.save_file(&stem, "md", &markdown)?;
                Ok(ComposedDraft::Video {
                    data: outline,
                    markdown_file,
                })
            }
            DraftKind::Column => {
                let article: ColumnArticle = serde_json::from_str(&json_str).map_err(|e| {
                    anyhow!("JSON inválido del modelo ({}). Respuesta cruda:\n{}", e, reply)
                })?;

                let markdown = render_column_markdown(&article);
                let markdown_file = self.save_file(&stem, "md", &markdown)?;
                let json_file =
                    self.save_file(&stem, "json", &serde_json::to_string_pretty(&article)?)?;
                Ok(ComposedDraft::Column {
                    data: article,
                    markdown_file,
                    json_file,
                })
            }
        }
    }

    /// Escribe `{stem}.{extension}` en la carpeta de borradores
    /// y devuelve el nombre del archivo.
    fn save_file(&self, stem: &str, extension: &str, content: &str) -> Result<String> {
        fs::create_dir_all(self.save_dir.as_ref())
            .with_context(|| format!("No se pudo crear {:?}", self.save_dir))?;

        let file_name = format!("{}.{}", stem, extension);
        let path = self.save_dir.join(&file_name);
        fs::write(&path, content)
            .with_context(|| format!("No se pudo guardar el borrador en {:?}", path))?;

        log::info!("Borrador guardado en {:?}", path);
        Ok(file_name)
    }
}

/// Un valor de target/purpose cuenta solo si viene con contenido real.
pub(crate) fn provided(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty() && !text.eq_ignore_ascii_case("none"))
}

pub(crate) fn build_video_prompt(
    topic: &str,
    sections: u32,
    duration_minutes: u32,
    target: Option<&str>,
    purpose: Option<&str>,
) -> String {
    let mut conditions = vec![
        format!("- split into {} sections", sections),
        format!("- video length: {} minutes", duration_minutes),
    ];
    if let Some(target) = target {
        conditions.push(format!("- target audience: {}", target));
    }
    if let Some(purpose) = purpose {
        conditions.push(format!("- purpose of the video: {}", purpose));
    }
    conditions.push("- a structure that beginners can follow easily".to_string());

    format!(
        "Create a YouTube explainer description, hashtags and keywords, copy for the \
         thumbnail image, and the outline of the video.\n\n\
         Theme: \"{topic}\"\n\n\
         Conditions:\n\
         {conditions}\n\n\
         Output JSON with the following keys.\n\
         - \"title\": \"proposed video title\"\n\
         - \"summary\": \"video summary for the description box\"\n\
         - \"hashtags\": [\"hashtag 1\", \"hashtag 2\", ...]\n\
         - \"keywords\": [\"related keyword 1\", \"related keyword 2\", ...]\n\
         - \"thumbnail_text\": \"short thumbnail copy that invites clicks\"\n\
         - \"outline\": [\n\
         \x20   {{\n\
         \x20       \"section_title\": \"section 1 title plus its time range (0:00~0:00)\",\n\
         \x20       \"points\": [\"key point 1 of this section\", \"key point 2\", ...]\n\
         \x20   }},\n\
         \x20   {{\n\
         \x20       \"section_title\": \"section 2 title plus its time range (0:00~0:00)\",\n\
         \x20       \"points\": [\"key point 1 of this section\", \"key point 2\", ...]\n\
         \x20   }}\n\
         ]\n\n\
         ```json\n\
         {{\n\
         // generate the JSON object here\n\
         }}\n\
         ```\n",
        topic = topic,
        conditions = conditions.join("\n"),
    )
}

pub(crate) fn build_column_prompt(
    topic: &str,
    sections: u32,
    duration_minutes: u32,
    target: Option<&str>,
    purpose: Option<&str>,
) -> String {
    let estimated_chars = duration_minutes * CHARS_PER_MINUTE;

    let mut conditions = vec![
        format!("- split into {} sections (heading and body)", sections),
        format!("- around {} characters in total", estimated_chars),
    ];
    if let Some(target) = target {
        conditions.push(format!("- target reader: {}", target));
    }
    if let Some(purpose) = purpose {
        conditions.push(format!("- purpose of the article: {}", purpose));
    }
    conditions.push("- avoid jargon and keep the text easy for beginners".to_string());

    format!(
        "You are an experienced content writer.\n\
         Based on the given theme and conditions, write a high-quality column article \
         that satisfies the reader's curiosity.\n\n\
         ## Theme: \"{topic}\"\n\n\
         ## Conditions:\n\
         {conditions}\n\n\
         ## Output format:\n\
         Output JSON with the following keys. Each \"body_text\" should address the \
         reader directly in 200-300 characters, telling a story rather than listing facts.\n\n\
         ```json\n\
         {{\n\
         \x20   \"title\": \"proposed article title\",\n\
         \x20   \"category\": \"about three concise keywords describing the article\",\n\
         \x20   \"sections\": [\n\
         \x20       {{\n\
         \x20           \"heading\": \"section 1 heading\",\n\
         \x20           \"body_text\": \"(section 1 body, 200-300 characters)\"\n\
         \x20       }},\n\
         \x20       {{\n\
         \x20           \"heading\": \"section 2 heading\",\n\
         \x20           \"body_text\": \"(section 2 body, 200-300 characters)\"\n\
         \x20       }}\n\
         \x20   ]\n\
         }}\n\
         ```\n",
        topic = topic,
        conditions = conditions.join("\n"),
    )
}

/// Extrae el bloque ```json; sin bloque, toma del primer `{` al último `}`.
pub(crate) fn extract_json_block(reply: &str) -> Option<String> {
    if let Some(caps) = JSON_BLOCK_RE.captures(reply) {
        return Some(caps[1].to_string());
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(reply[start..=end].to_string())
}

pub(crate) fn render_video_markdown(outline: &VideoOutline) -> String {
    let title = non_empty(&outline.title, "No Title");
    let mut md = format!("# {}\n\n", title);
    md.push_str(&format!("## Summary\n{}\n\n", outline.summary));

    let hashtags = outline
        .hashtags
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ");
    md.push_str(&format!("## Hashtags\n{}\n\n", hashtags));
    md.push_str(&format!("## Keywords\n{}\n\n", outline.keywords.join(", ")));
    md.push_str(&format!("## Thumbnail copy\n> {}\n\n", outline.thumbnail_text));

    md.push_str("## Outline\n");
    for (index, section) in outline.outline.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n", index + 1, section.section_title));
        for point in &section.points {
            md.push_str(&format!("- {}\n", point));
        }
        md.push('\n');
    }
    md
}

pub(crate) fn render_column_markdown(article: &ColumnArticle) -> String {
    let title = non_empty(&article.title, "No Title");
    let category = non_empty(&article.category, "N/A");

    let mut md = format!("# {}\n\n", title);
    md.push_str(&format!("Category: {}\n\n", category));
    for section in &article.sections {
        md.push_str(&format!("## {}\n\n", non_empty(&section.heading, "No Heading")));
        md.push_str(&format!("{}\n\n", section.body_text));
    }
    md
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Nombre base del borrador: componentes sanitizados + timestamp.
pub(crate) fn draft_stem(base_keyword: &str, suggestion: &str) -> String {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    format!(
        "{}_{}_{}",
        sanitize_component(base_keyword),
        sanitize_component(suggestion),
        stamp
    )
}

/// Deja solo caracteres de palabra, espacios y guiones, y recorta el largo.
/// Nunca produce separadores de ruta.
pub(crate) fn sanitize_component(raw: &str) -> String {
    let cleaned = UNSAFE_FILENAME_RE.replace_all(raw, "");
    cleaned.chars().take(FILENAME_COMPONENT_LEN).collect()
}
