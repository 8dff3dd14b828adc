use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "recipebox")]
#[command(about = "Recipe extraction API server", long_about = None)]
pub struct Config {
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout: u64,

    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
    pub fetch_timeout: u64,

    #[arg(long, env = "MAX_PAGE_BYTES", default_value = "5242880")]
    pub max_page_bytes: usize,

    #[arg(
        long,
        env = "FETCH_USER_AGENT",
        default_value = "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0"
    )]
    pub user_agent: String,

    /// comma-separated; empty allows any origin
    #[arg(long, env = "CORS_ORIGINS", default_value = "")]
    pub cors_origins: String,

    #[arg(long, env = "ACCESS_PASSWORD")]
    pub access_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}
