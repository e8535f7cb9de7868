//! tests/youtube_tests.rs
//! Pruebas del parseo de duraciones y del caché CSV de videos.

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::models::video_model::VideoRecord;
    use crate::services::youtube_service::{format_iso_duration, read_cache, YoutubeService};

    fn sample_videos() -> Vec<VideoRecord> {
        vec![
            VideoRecord {
                video_id: "abc123".to_string(),
                title: "Rust in 10 minutes".to_string(),
                view_count: 15340,
                like_count: 812,
                duration: "0:09:58".to_string(),
                description: "A quick tour of the language".to_string(),
            },
            VideoRecord {
                video_id: "def456".to_string(),
                title: "Ownership, explained".to_string(),
                view_count: 980,
                like_count: 40,
                duration: "0:21:05".to_string(),
                description: String::new(),
            },
        ]
    }

    #[test]
    fn test_format_iso_duration() {
        assert_eq!(format_iso_duration("PT5M17S"), "0:05:17");
        assert_eq!(format_iso_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_iso_duration("PT45S"), "0:00:45");
        assert_eq!(format_iso_duration("PT10M"), "0:10:00");
        assert_eq!(format_iso_duration("P1DT1H"), "25:00:00");
    }

    #[test]
    fn test_format_iso_duration_invalid() {
        assert_eq!(format_iso_duration(""), "0:00");
        assert_eq!(format_iso_duration("garbage"), "0:00");
        assert_eq!(format_iso_duration("P"), "0:00");
        assert_eq!(format_iso_duration("PT"), "0:00");
    }

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().expect("no se pudo crear tempdir");
        let service = YoutubeService::new(None, dir.path().to_str().unwrap());
        let videos = sample_videos();

        let path = service.save_cache("rust", &videos).expect("save_cache falló");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("rust_"), "nombre inesperado: {}", name);
        assert!(name.ends_with(".csv"));

        let loaded = read_cache(&path).expect("read_cache falló");
        assert_eq!(loaded, videos);
    }

    #[test]
    fn test_latest_cache_file_picks_newest() {
        let dir = tempfile::tempdir().expect("no se pudo crear tempdir");
        let service = YoutubeService::new(None, dir.path().to_str().unwrap());
        let header = "videoId,title,viewCount,likeCount,duration,description\n";

        let old = dir.path().join("rust_20240101_000000.csv");
        fs::write(&old, header).unwrap();
        // mtime con resolución de segundos en algunos filesystems
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let newer = dir.path().join("rust_20240102_000000.csv");
        fs::write(&newer, header).unwrap();

        let found = service
            .latest_cache_file("rust")
            .expect("scan falló")
            .expect("no encontró el caché");
        assert_eq!(found, newer);
    }

    #[test]
    fn test_cache_ignores_other_queries() {
        let dir = tempfile::tempdir().expect("no se pudo crear tempdir");
        let service = YoutubeService::new(None, dir.path().to_str().unwrap());

        fs::write(
            dir.path().join("python_20240101_000000.csv"),
            "videoId,title,viewCount,likeCount,duration,description\n",
        )
        .unwrap();

        assert!(service.latest_cache_file("rust").expect("scan falló").is_none());
    }

    #[test]
    fn test_load_cached_missing_query() {
        let dir = tempfile::tempdir().expect("no se pudo crear tempdir");
        let service = YoutubeService::new(None, dir.path().to_str().unwrap());
        assert!(service.load_cached("nada").expect("scan falló").is_none());
    }
}
