//! tests/ollama_tests.rs
//! Pruebas del matching de tags de modelo.

#[cfg(test)]
mod tests {
    use crate::services::ollama_service::{base_name, tag_matches};

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("gemma3:4b"), "gemma3");
        assert_eq!(base_name("gemma3"), "gemma3");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_tag_matches_by_base() {
        assert!(tag_matches("gemma3:4b", "gemma3:4b"));
        // basta con compartir el nombre base
        assert!(tag_matches("gemma3:4b", "gemma3:12b"));
        assert!(tag_matches("gemma3:latest", "gemma3"));
        assert!(!tag_matches("llama3:8b", "gemma3:4b"));
    }
}
