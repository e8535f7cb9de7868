//! tests/outline_tests.rs
//! Pruebas de los prompts de borradores, la extracción de JSON
//! y el renderizado a Markdown.

#[cfg(test)]
mod tests {
    use crate::models::outline_model::{ColumnArticle, OutlineSection, VideoOutline};
    use crate::services::outline_service::{
        build_column_prompt, build_video_prompt, draft_stem, extract_json_block, provided,
        render_column_markdown, render_video_markdown, sanitize_component,
    };

    fn sample_outline() -> VideoOutline {
        VideoOutline {
            title: "Channels in practice".to_string(),
            summary: "What channels are and when to use them.".to_string(),
            hashtags: vec!["rust".to_string(), "async".to_string()],
            keywords: vec!["mpsc".to_string(), "backpressure".to_string()],
            thumbnail_text: "STOP sharing state".to_string(),
            outline: vec![
                OutlineSection {
                    section_title: "Intro (0:00~1:30)".to_string(),
                    points: vec!["why channels".to_string(), "the plan".to_string()],
                },
                OutlineSection {
                    section_title: "Demo (1:30~9:00)".to_string(),
                    points: vec!["a worker pool".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_extract_json_block_fenced() {
        let reply = "Here it is:\n```json\n{\"title\": \"Demo\"}\n```\nDone.";
        assert_eq!(extract_json_block(reply).unwrap(), "{\"title\": \"Demo\"}");
    }

    #[test]
    fn test_extract_json_block_brace_fallback() {
        let reply = "Sure thing {\"title\": \"Demo\"} hope it helps";
        assert_eq!(extract_json_block(reply).unwrap(), "{\"title\": \"Demo\"}");
    }

    #[test]
    fn test_extract_json_block_none() {
        assert!(extract_json_block("no structured output here").is_none());
    }

    #[test]
    fn test_video_outline_defaults_on_missing_keys() {
        let outline: VideoOutline = serde_json::from_str("{\"title\": \"Demo\"}").unwrap();
        assert_eq!(outline.title, "Demo");
        assert!(outline.hashtags.is_empty());
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_column_category_accepts_list() {
        let article: ColumnArticle =
            serde_json::from_str(r#"{"title":"T","category":["a","b","c"],"sections":[]}"#)
                .unwrap();
        assert_eq!(article.category, "a, b, c");
    }

    #[test]
    fn test_render_video_markdown() {
        let md = render_video_markdown(&sample_outline());

        assert!(md.starts_with("# Channels in practice\n"));
        assert!(md.contains("## Hashtags\n#rust #async\n"));
        assert!(md.contains("## Keywords\nmpsc, backpressure\n"));
        assert!(md.contains("## Thumbnail copy\n> STOP sharing state\n"));
        assert!(md.contains("### 1. Intro (0:00~1:30)\n"));
        assert!(md.contains("- why channels\n"));
        assert!(md.contains("### 2. Demo (1:30~9:00)\n"));
    }

    #[test]
    fn test_render_video_markdown_empty_title() {
        let outline = VideoOutline {
            title: String::new(),
            ..sample_outline()
        };
        assert!(render_video_markdown(&outline).starts_with("# No Title\n"));
    }

    #[test]
    fn test_render_column_markdown() {
        let article: ColumnArticle = serde_json::from_str(
            r#"{
                "title": "Why queues matter",
                "category": "infra, basics",
                "sections": [
                    {"heading": "The problem", "body_text": "Imagine a burst of traffic..."},
                    {"heading": "The fix", "body_text": "A queue absorbs the spike..."}
                ]
            }"#,
        )
        .unwrap();

        let md = render_column_markdown(&article);
        assert!(md.starts_with("# Why queues matter\n"));
        assert!(md.contains("Category: infra, basics\n"));
        assert!(md.contains("## The problem\n\nImagine a burst of traffic...\n"));
        assert!(md.contains("## The fix\n"));
    }

    #[test]
    fn test_render_column_markdown_category_fallback() {
        let article: ColumnArticle = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert!(render_column_markdown(&article).contains("Category: N/A\n"));
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Rust! (2024)"), "Rust 2024");
        assert_eq!(sanitize_component("a/b\\c"), "abc");
        assert_eq!(sanitize_component("../etc/passwd"), "etcpasswd");

        let long = "x".repeat(40);
        assert_eq!(sanitize_component(&long).chars().count(), 20);
    }

    #[test]
    fn test_draft_stem_shape() {
        let stem = draft_stem("rust async", "channels!");
        assert!(stem.starts_with("rust async_channels_"), "stem: {}", stem);
        assert!(!stem.contains('/'));
    }

    #[test]
    fn test_provided() {
        assert_eq!(provided(&Some("developers".to_string())), Some("developers"));
        assert!(provided(&Some("none".to_string())).is_none());
        assert!(provided(&Some("  ".to_string())).is_none());
        assert!(provided(&None).is_none());
    }

    #[test]
    fn test_video_prompt_conditions() {
        let prompt = build_video_prompt("rust channels", 4, 15, None, Some("teach the basics"));

        assert!(prompt.contains("Theme: \"rust channels\""));
        assert!(prompt.contains("- split into 4 sections"));
        assert!(prompt.contains("- video length: 15 minutes"));
        assert!(prompt.contains("- purpose of the video: teach the basics"));
        assert!(prompt.contains("\"thumbnail_text\""));
        assert!(!prompt.contains("target audience"));
    }

    #[test]
    fn test_column_prompt_volume() {
        let prompt = build_column_prompt("rust", 3, 5, Some("beginners"), None);

        assert!(prompt.contains("- split into 3 sections (heading and body)"));
        assert!(prompt.contains("- around 2000 characters in total"));
        assert!(prompt.contains("- target reader: beginners"));
        assert!(prompt.contains("\"body_text\""));
        assert!(!prompt.contains("purpose of the article"));
    }
}
