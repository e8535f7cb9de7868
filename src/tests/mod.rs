//! tests/mod.rs
//! Pruebas unitarias del servicio.

mod keyword_tests;
mod ollama_tests;
mod operation_tests;
mod outline_tests;
mod youtube_tests;
