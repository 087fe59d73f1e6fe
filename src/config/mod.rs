use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Artificial analysis latency (in milliseconds)
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// Seed for the mock analyzer (None for a fresh random seed)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Minimum number of recommendations attached to each analysis
    #[serde(default = "default_min_recommendations")]
    pub min_recommendations: usize,

    /// Accepted file extensions, compared case-insensitively
    #[serde(default = "default_supported_formats")]
    pub supported_formats: Vec<String>,

    /// Largest accepted recording (in bytes)
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Port of the web interface
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

fn default_analysis_delay_ms() -> u64 {
    2000
}

fn default_min_recommendations() -> usize {
    3
}

fn default_supported_formats() -> Vec<String> {
    ["WAV", "MP3", "M4A", "OGG", "FLAC", "AAC", "WEBM"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_web_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
            seed: None,
            min_recommendations: default_min_recommendations(),
            supported_formats: default_supported_formats(),
            max_file_size_bytes: default_max_file_size_bytes(),
            web_port: default_web_port(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_recommendations == 0 {
            anyhow::bail!("min_recommendations must be at least 1");
        }
        if self.supported_formats.is_empty() {
            anyhow::bail!("supported_formats must list at least one format");
        }
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("max_file_size_bytes must be non-zero");
        }
        if self.web_port == 0 {
            anyhow::bail!("web_port must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis_delay_ms, 2000);
        assert_eq!(config.min_recommendations, 3);
        assert_eq!(config.web_port, 3000);
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
        assert!(config.seed.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            seed: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.seed, Some(42));
        assert_eq!(deserialized.supported_formats, config.supported_formats);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"analysis_delay_ms": 0}"#).unwrap();
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.min_recommendations, 3);
        assert!(config.supported_formats.contains(&"WAV".to_string()));
    }

    #[test]
    fn test_config_validation_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid() {
        let config = Config {
            min_recommendations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            supported_formats: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_file_size_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            web_port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
