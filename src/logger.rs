//! logger.rs
//! Configuración del logger usando env_logger.

/// Nivel por defecto cuando RUST_LOG no está definido
const DEFAULT_LEVEL: &str = "info";

pub fn init_logger() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LEVEL),
    )
    .format_timestamp_secs()
    .init();
}
