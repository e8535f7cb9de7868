//! tests/keyword_tests.rs
//! Pruebas del prompt de sugerencias y del parseo de CSVs (modelo y Trends).

#[cfg(test)]
mod tests {
    use crate::models::keyword_model::TrendKeyword;
    use crate::models::video_model::VideoRecord;
    use crate::services::keyword_service::{
        build_suggestion_prompt, extract_csv_block, parse_suggestions_csv, parse_trends_csv,
    };

    fn video(title: &str) -> VideoRecord {
        VideoRecord {
            video_id: "abc123".to_string(),
            title: title.to_string(),
            view_count: 1000,
            like_count: 50,
            duration: "0:05:00".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_extract_csv_block_fenced() {
        let reply = "Sure, here you go:\n```csv\nkeyword\nasync basics\nborrow checker\n```\nEnjoy!";
        let block = extract_csv_block(reply).expect("debería encontrar el bloque");
        assert_eq!(block, "keyword\nasync basics\nborrow checker");
    }

    #[test]
    fn test_extract_csv_block_fallback() {
        let reply = "No fences today.\n\nkeyword\ntopic a\ntopic b";
        let block = extract_csv_block(reply).expect("el fallback debería funcionar");
        assert!(block.starts_with("keyword"));
        assert!(block.contains("topic b"));
    }

    #[test]
    fn test_extract_csv_block_none() {
        assert!(extract_csv_block("I cannot help with that.").is_none());
    }

    #[test]
    fn test_parse_suggestions_normalizes_header() {
        let parsed = parse_suggestions_csv("  Keyword \nrust macros\nrust testing\n")
            .expect("el parseo falló");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].keyword, "rust macros");
        assert_eq!(parsed[1].keyword, "rust testing");
    }

    #[test]
    fn test_parse_suggestions_missing_column() {
        assert!(parse_suggestions_csv("topic\nuno\ndos\n").is_err());
    }

    #[test]
    fn test_parse_trends_csv_sections() {
        let content = "Category: All categories\n\nTOP\nrust tutorial,100\n\"rust basics\",75\nRISING\nrust 2024,+250%\nasync rust,Breakout\n";
        let trends = parse_trends_csv(content);

        assert_eq!(trends.len(), 4);
        assert_eq!(
            trends[0],
            TrendKeyword {
                keyword: "rust tutorial".to_string(),
                importance: "100".to_string(),
            }
        );
        assert_eq!(trends[1].keyword, "rust basics");
        // TOP primero, RISING después
        assert_eq!(trends[2].importance, "+250%");
        assert_eq!(trends[3].importance, "Breakout");
    }

    #[test]
    fn test_parse_trends_csv_skips_preamble_and_bad_lines() {
        let content = "some export header\nwithout sections\nTOP\nsin coma\nok,1\n";
        let trends = parse_trends_csv(content);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].keyword, "ok");
    }

    #[test]
    fn test_suggestion_prompt_contents() {
        let videos = vec![video("Rust in 10 minutes"), video("Ownership, explained")];
        let prompt = build_suggestion_prompt("rust", &videos, &[], 5);

        assert!(prompt.contains("\"rust\""));
        assert!(prompt.contains("Rust in 10 minutes"));
        assert!(prompt.contains("generate 5 new related topics"));
        assert!(prompt.contains("```csv"));
        assert!(!prompt.contains("Google Trends"));
    }

    #[test]
    fn test_suggestion_prompt_includes_trends() {
        let trends = vec![TrendKeyword {
            keyword: "rust 2024".to_string(),
            importance: "Breakout".to_string(),
        }];
        let prompt = build_suggestion_prompt("rust", &[video("t")], &trends, 5);

        assert!(prompt.contains("Google Trends"));
        assert!(prompt.contains("rust 2024: Breakout"));
    }

    #[test]
    fn test_suggestion_prompt_caps_titles() {
        let videos: Vec<_> = (0..12).map(|i| video(&format!("title-{}", i))).collect();
        let prompt = build_suggestion_prompt("q", &videos, &[], 5);

        assert!(prompt.contains("title-9"));
        assert!(!prompt.contains("title-10"));
    }
}
