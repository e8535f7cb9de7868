//! services/youtube_service.rs
//! Cliente de YouTube Data API v3 con caché local en CSV.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::models::video_model::VideoRecord;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
/// Máximo que acepta la API por página
const PAGE_SIZE: usize = 50;
pub const DEFAULT_MAX_RESULTS: usize = 200;

static ISO_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("regex de duración válido")
});

#[derive(Clone)]
pub struct YoutubeService {
    http_client: Client,
    api_key: Option<Arc<String>>,
    cache_dir: Arc<PathBuf>,
}

impl YoutubeService {
    pub fn new(api_key: Option<String>, cache_dir: &str) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.map(Arc::new),
            cache_dir: Arc::new(PathBuf::from(cache_dir)),
        }
    }

    /// Busca videos y junta estadísticas, paginando hasta `max_results`.
    pub async fn fetch_videos(&self, query: &str, max_results: usize) -> Result<Vec<VideoRecord>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Falta configurar YOUTUBE_API_KEY"))?;

        let mut videos: Vec<VideoRecord> = Vec::new();
        let mut next_page_token: Option<String> = None;

        while videos.len() < max_results {
            let remaining = max_results - videos.len();
            let page_size = remaining.min(PAGE_SIZE);

            let mut params: Vec<(&str, String)> = vec![
                ("q", query.to_string()),
                ("part", "id,snippet".to_string()),
                ("maxResults", page_size.to_string()),
                ("type", "video".to_string()),
                ("key", api_key.as_str().to_string()),
            ];
            if let Some(token) = &next_page_token {
                params.push(("pageToken", token.clone()));
            }

            let search: SearchResponse = self
                .http_client
                .get(SEARCH_URL)
                .query(&params)
                .send()
                .await
                .context("Falló la búsqueda en YouTube")?
                .error_for_status()
                .context("YouTube rechazó la búsqueda")?
                .json()
                .await
                .context("Respuesta de search.list inválida")?;

            let video_ids: Vec<String> = search
                .items
                .into_iter()
                .filter_map(|item| item.id.video_id)
                .collect();
            if video_ids.is_empty() {
                break;
            }

            let details: VideoListResponse = self
                .http_client
                .get(VIDEOS_URL)
                .query(&[
                    ("id", video_ids.join(",")),
                    ("part", "snippet,statistics,contentDetails".to_string()),
                    ("key", api_key.as_str().to_string()),
                ])
                .send()
                .await
                .context("Falló videos.list")?
                .error_for_status()
                .context("YouTube rechazó videos.list")?
                .json()
                .await
                .context("Respuesta de videos.list inválida")?;

            for item in details.items {
                videos.push(VideoRecord {
                    video_id: item.id,
                    title: item.snippet.title,
                    view_count: parse_count(item.statistics.view_count.as_deref()),
                    like_count: parse_count(item.statistics.like_count.as_deref()),
                    duration: format_iso_duration(&item.content_details.duration),
                    description: item.snippet.description,
                });
            }

            next_page_token = search.next_page_token;
            if next_page_token.is_none() {
                break;
            }
        }

        Ok(videos)
    }

    /// Variante con caché: reutiliza el CSV más reciente del query si existe,
    /// y si no, busca en la API y persiste el resultado.
    pub async fn fetch_videos_cached(&self, query: &str, max_results: usize) -> Result<CachedFetch> {
        if let Some(path) = self.latest_cache_file(query)? {
            let videos = read_cache(&path)?;
            log::info!("Usando caché de YouTube: {:?} ({} videos)", path, videos.len());
            return Ok(CachedFetch {
                videos,
                from_cache: true,
                file: path,
            });
        }

        let videos = self.fetch_videos(query, max_results).await?;
        if videos.is_empty() {
            return Err(anyhow!("No se obtuvieron datos de YouTube para \"{}\"", query));
        }

        let path = self.save_cache(query, &videos)?;
        Ok(CachedFetch {
            videos,
            from_cache: false,
            file: path,
        })
    }

    /// Devuelve los videos cacheados para el query, si los hay.
    pub fn load_cached(&self, query: &str) -> Result<Option<Vec<VideoRecord>>> {
        match self.latest_cache_file(query)? {
            Some(path) => Ok(Some(read_cache(&path)?)),
            None => Ok(None),
        }
    }

    /// El archivo `{query}_*.csv` más reciente (por mtime) del caché.
    pub(crate) fn latest_cache_file(&self, query: &str) -> Result<Option<PathBuf>> {
        let prefix = format!("{}_", query);
        let entries = match fs::read_dir(self.cache_dir.as_ref()) {
            Ok(entries) => entries,
            Err(_) => return Ok(None),
        };

        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(&prefix) || !name.ends_with(".csv") {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            if newest.as_ref().map_or(true, |(stamp, _)| modified > *stamp) {
                newest = Some((modified, entry.path()));
            }
        }
        Ok(newest.map(|(_, path)| path))
    }

    pub(crate) fn save_cache(&self, query: &str, videos: &[VideoRecord]) -> Result<PathBuf> {
        fs::create_dir_all(self.cache_dir.as_ref())
            .with_context(|| format!("No se pudo crear {:?}", self.cache_dir))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.cache_dir.join(format!("{}_{}.csv", query, stamp));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("No se pudo crear {:?}", path))?;
        for video in videos {
            writer.serialize(video)?;
        }
        writer.flush()?;

        log::info!("Datos de YouTube guardados en {:?}", path);
        Ok(path)
    }
}

pub(crate) fn read_cache(path: &Path) -> Result<Vec<VideoRecord>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("No se pudo leer {:?}", path))?;
    let mut videos = Vec::new();
    for row in reader.deserialize() {
        videos.push(row?);
    }
    Ok(videos)
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0)
}

/// Normaliza una duración ISO-8601 ("PT1H2M3S") a "H:MM:SS".
/// Una entrada no parseable produce "0:00".
pub(crate) fn format_iso_duration(raw: &str) -> String {
    let fallback = "0:00".to_string();
    let Some(caps) = ISO_DURATION_RE.captures(raw.trim()) else {
        return fallback;
    };
    if (1..=4).all(|group| caps.get(group).is_none()) {
        return fallback;
    }

    let value = |group: usize| {
        caps.get(group)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let hours = value(1) * 24 + value(2);
    format!("{}:{:02}:{:02}", hours, value(3), value(4))
}

/// Resultado de un fetch con caché
pub struct CachedFetch {
    pub videos: Vec<VideoRecord>,
    pub from_cache: bool,
    pub file: PathBuf,
}

// --------------------------------------------------------------------------------
// Estructuras de deserialización de la API
// --------------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
    #[serde(rename = "contentDetails")]
    content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(default)]
    description: String,
}

// La API manda los contadores como strings
#[derive(Debug, Default, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
    #[serde(rename = "likeCount", default)]
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    #[serde(default)]
    duration: String,
}
