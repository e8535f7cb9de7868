//! services/ollama_service.rs
//! Cliente del daemon local de Ollama: salud, arranque, modelos y generación.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{
    process::Command,
    sync::{Semaphore, SemaphorePermit},
    time::timeout,
};

use crate::models::ollama_model::{
    ChatMessage, ChatRequest, ChatResponse, GenerationOptions, ModelTag, TagsResponse,
};

/// Cantidad máxima de generaciones simultáneas contra el daemon
const MAX_CONCURRENT_GENERATIONS: usize = 2;
/// Tiempo máximo de espera por una generación
const CHAT_TIMEOUT: Duration = Duration::from_secs(300);
/// Tiempo máximo para descargar un modelo con `ollama pull`
const PULL_TIMEOUT: Duration = Duration::from_secs(300);
/// Timeout corto del probe de salud
const STATUS_TIMEOUT: Duration = Duration::from_secs(2);
/// Lo que tarda el daemon en aceptar conexiones tras el spawn
const SERVE_WARMUP: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct OllamaService {
    http_client: Client,
    host: Arc<String>,
    binary_path: Option<Arc<PathBuf>>,
    semaphore: Arc<Semaphore>,
}

impl OllamaService {
    pub fn new(host: &str) -> Self {
        let binary_path = which::which("ollama").ok().map(Arc::new);
        if binary_path.is_none() {
            log::warn!(
                "No se encontró el binario `ollama` en PATH; \
                 solo se podrá usar un daemon ya levantado"
            );
        }

        Self {
            http_client: Client::new(),
            host: Arc::new(host.trim_end_matches('/').to_string()),
            binary_path,
            semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_GENERATIONS)),
        }
    }

    /// Probe de salud contra /api/tags. Cualquier fallo cuenta como "caído".
    pub async fn check_status(&self) -> bool {
        let url = format!("{}/api/tags", self.host);
        match self
            .http_client
            .get(&url)
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Lanza `ollama serve` en background con stdio descartado.
    pub async fn start_service(&self) -> Result<()> {
        let binary = self.binary()?;
        Command::new(binary)
            .arg("serve")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("No se pudo lanzar `ollama serve`")?;

        tokio::time::sleep(SERVE_WARMUP).await;
        Ok(())
    }

    /// Garantiza que el daemon esté arriba; si no responde lo levanta
    /// y espera hasta 10 segundos a que acepte conexiones.
    pub async fn ensure_running(&self) -> Result<bool> {
        if self.check_status().await {
            return Ok(true);
        }

        log::info!("Ollama no responde, levantando el daemon...");
        self.start_service().await?;

        for _ in 0..10 {
            if self.check_status().await {
                log::info!("Daemon de Ollama levantado");
                return Ok(true);
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        Ok(false)
    }

    /// Lista los modelos instalados según /api/tags.
    pub async fn list_models(&self) -> Result<Vec<ModelTag>> {
        let url = format!("{}/api/tags", self.host);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("No se pudo consultar /api/tags")?;
        let tags: TagsResponse = response
            .json()
            .await
            .context("Respuesta inválida de /api/tags")?;
        Ok(tags.models)
    }

    /// Chequea si el modelo ya está instalado (comparación por nombre base).
    pub async fn model_exists(&self, model_name: &str) -> Result<bool> {
        let installed = self.list_models().await?;
        Ok(installed
            .iter()
            .any(|tag| tag_matches(&tag.name, model_name)))
    }

    /// Descarga el modelo con `ollama pull` si todavía no está instalado.
    /// Devuelve true si hubo que descargarlo.
    pub async fn pull_model_if_needed(&self, model_name: &str) -> Result<bool> {
        if self.model_exists(model_name).await.unwrap_or(false) {
            return Ok(false);
        }

        let binary = self.binary()?;
        log::info!("Descargando modelo {}...", model_name);

        let mut cmd = Command::new(binary);
        cmd.arg("pull").arg(model_name);
        cmd.stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        let output = timeout(PULL_TIMEOUT, cmd.output())
            .await
            .context("Timeout descargando el modelo")?
            .context("No se pudo ejecutar `ollama pull`")?;

        if !output.status.success() {
            let stderr_msg = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("`ollama pull` falló: {}", stderr_msg));
        }

        log::info!("Modelo {} descargado", model_name);
        Ok(true)
    }

    /// Manda un prompt de un solo turno a /api/chat y devuelve el texto
    /// de la respuesta. La concurrencia se limita con el semaphore.
    pub async fn chat(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String> {
        let _guard = self.acquire_permit().await?;

        let url = format!("{}/api/chat", self.host);
        let body = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
            options,
        };

        let response = timeout(CHAT_TIMEOUT, self.http_client.post(&url).json(&body).send())
            .await
            .context("Timeout esperando la respuesta del modelo")?
            .context("No se pudo contactar al daemon de Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Ollama respondió {}: {}", status, body_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Respuesta de /api/chat inválida")?;
        Ok(parsed.message.content)
    }

    async fn acquire_permit(&self) -> Result<SemaphorePermit<'_>> {
        timeout(Duration::from_secs(5), self.semaphore.acquire())
            .await
            .context("Timeout esperando turno de generación")?
            .map_err(|_| anyhow!("No se pudo adquirir el semaphore"))
    }

    fn binary(&self) -> Result<&PathBuf> {
        self.binary_path
            .as_deref()
            .ok_or_else(|| anyhow!("No se encontró `ollama` en el sistema"))
    }
}

/// Nombre base de un tag de modelo: "gemma3:4b" -> "gemma3"
pub(crate) fn base_name(tag: &str) -> &str {
    tag.split(':').next().unwrap_or(tag)
}

/// Un tag instalado satisface al pedido si comparte el nombre base;
/// "gemma3:4b" instalado cubre un pedido de "gemma3:12b".
pub(crate) fn tag_matches(installed: &str, requested: &str) -> bool {
    installed.starts_with(base_name(requested))
}
