use serde::Deserialize;

fn default_cache_capacity() -> usize {
    128
}

fn default_cache_ttl_secs() -> u64 {
    86_400
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim-compatible search endpoint
    pub endpoint: String,
    /// Identifies this deployment to the geocoder (required by public instances)
    pub user_agent: String,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_with_cache_defaults() {
        let raw = r#"{
            "server": { "port": 3000 },
            "geocoding": {
                "endpoint": "https://nominatim.openstreetmap.org/search",
                "user_agent": "solar-sizing-api/0.1"
            }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.geocoding.cache_capacity, 128);
        assert_eq!(config.geocoding.cache_ttl_secs, 86_400);
    }
}
