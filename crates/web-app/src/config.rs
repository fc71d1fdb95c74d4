#[allow(async_fn_in_trait)]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, String>;
    async fn set_config(&self, config: Config) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait ConfigRepository {
    async fn read_config(&self) -> Result<Config, String>;
    async fn write_config(&self, config: Config) -> Result<(), String>;
}

/// Deployment settings of the client. Missing fields take their default value.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Prefix of every API endpoint, without trailing slash.
    pub api_base_url: String,
    pub login_path: String,
    pub home_path: String,
    pub toast_duration_ms: u32,
    pub toast_fade_ms: u32,
}

impl Config {
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "/api/v1".to_string(),
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            toast_duration_ms: 3000,
            toast_fade_ms: 300,
        }
    }
}
