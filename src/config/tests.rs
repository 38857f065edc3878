#[cfg(test)]
mod tests {
    use crate::config::{
        Config, ConfigError, CropThresholds, KnowledgeConfig, ReportFormat, SoilProfile, SoilRange,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.crop, "corn");
        assert_eq!(config.zones, 4);
        assert!(config.seed.is_none());
        assert!(config.readings_path.is_none());
        assert!(config.output_path.is_none());
        assert_eq!(config.format, ReportFormat::Text);
        assert!(!config.verbose);
        assert_eq!(config.soil_profiles.len(), 3);
    }

    #[test]
    fn test_knowledge_config_default() {
        let config = KnowledgeConfig::default();

        assert_eq!(config.max_results, 3);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.latency_ms, 0);
        assert!(config.fallback_on_miss);
        assert!(config.corpus_path.is_none());
    }

    #[test]
    fn test_corn_thresholds() {
        let config = Config::default();
        let thresholds = config.thresholds_for("corn").unwrap();

        assert_eq!(thresholds.nitrogen_min, 120.0);
        assert_eq!(thresholds.moisture_max, 40.0);
        assert_eq!(config.thresholds_for("Corn").unwrap(), thresholds);
    }

    #[test]
    fn test_unknown_crop_thresholds() {
        let config = Config::default();

        assert_eq!(
            config.thresholds_for("rice"),
            Err(ConfigError::UnknownCrop("rice".to_string()))
        );
    }

    #[test]
    fn test_soil_profile_fallback_to_corn() {
        let config = Config::default();

        assert_eq!(config.soil_profile_for("wheat"), SoilProfile::WHEAT);
        assert_eq!(config.soil_profile_for("barley"), SoilProfile::CORN);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_crop() {
        let config = Config {
            crop: "soybean".to_string(),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::UnknownCrop(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut config = Config::default();
        let mut profile = SoilProfile::CORN;
        profile.moisture = SoilRange::new(80.0, 60.0);
        config.soil_profiles.insert("corn".to_string(), profile);

        match config.validate() {
            Err(ConfigError::InvalidSoilRange { crop, field, .. }) => {
                assert_eq!(crop, "corn");
                assert_eq!(field, "moisture");
            }
            other => panic!("unexpected validation result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_max_results() {
        let mut config = Config::default();
        config.knowledge.max_results = 0;

        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxResults));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.knowledge.timeout_seconds = 0;
        config.knowledge.latency_ms = 50;

        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_rejects_non_finite_thresholds() {
        let mut config = Config::default();
        config.thresholds.insert(
            "corn".to_string(),
            CropThresholds {
                nitrogen_min: f64::NAN,
                moisture_max: 40.0,
            },
        );

        match config.validate() {
            Err(ConfigError::InvalidThreshold { crop, field, .. }) => {
                assert_eq!(crop, "corn");
                assert_eq!(field, "nitrogen_min");
            }
            other => panic!("unexpected validation result: {:?}", other),
        }

        config.thresholds.insert(
            "corn".to_string(),
            CropThresholds {
                nitrogen_min: 120.0,
                moisture_max: f64::INFINITY,
            },
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { field: "moisture_max", .. })
        ));
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("yaml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("agrinexus.toml");
        let content = r#"
crop = "wheat"
zones = 9
seed = 42
format = "json"

[thresholds.wheat]
nitrogen_min = 90.0
moisture_max = 55.0

[knowledge]
max_results = 5
fallback_on_miss = false
"#;
        fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.crop, "wheat");
        assert_eq!(config.zones, 9);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(
            config.thresholds_for("wheat").unwrap(),
            CropThresholds {
                nitrogen_min: 90.0,
                moisture_max: 55.0,
            }
        );
        assert_eq!(config.knowledge.max_results, 5);
        assert!(!config.knowledge.fallback_on_miss);
        // 未出现在文件中的字段保持默认值
        assert_eq!(config.knowledge.timeout_seconds, 10);
        assert_eq!(config.soil_profiles.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/agrinexus.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "zones = \"many\"").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }
}
