use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::sync::Arc;

/// 服务配置（TOML 文件 + `APP_` 前缀环境变量）
///
/// 环境变量中段与字段之间用双下划线分隔，如 `APP_SYS__MD5_KEY`、`APP_SESSION__TTL_SECS`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    /// 未配置时使用内存存储
    pub database: Option<DatabaseConfig>,
    /// 未配置时会话保存在本地缓存
    pub redis: Option<RedisConfig>,
    pub sys: Option<SysConfig>,
    pub session: Option<SessionConfig>,
}

impl AppConfig {
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        Self::load(File::with_name(file).required(true), env_source())
    }

    /// 从 TOML 字符串构建（不读取环境变量）
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder().add_source(File::from_str(content, FileFormat::Toml)).build()?.try_deserialize::<AppConfig>()?;
        cfg.validate()
    }

    fn load(file: impl Source + Send + Sync + 'static, env: Environment) -> Result<Self, ConfigError> {
        let cfg = Config::builder().add_source(file).add_source(env).build()?.try_deserialize::<AppConfig>()?;
        cfg.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(session) = &self.session {
            if session.ttl_secs == 0 {
                return Err(ConfigError::Message("session.ttl_secs must be greater than 0".to_string()));
            }
        }
        Ok(self)
    }

    pub fn init(file: &str) -> anyhow::Result<()> {
        let instance = Self::new(file)?;
        INSTANCE.set(Arc::new(instance)).map_err(|_| anyhow::anyhow!("AppConfig already initialized"))
    }

    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
    pub fn get_session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    /// 获取单例
    ///
    /// # Panics
    /// 若未调用 `init` 则 panic
    pub fn get() -> Arc<Self> {
        INSTANCE.get().expect("AppConfig is not initialized").clone()
    }
}
static INSTANCE: OnceCell<Arc<AppConfig>> = OnceCell::new();

fn env_source() -> Environment {
    Environment::with_prefix("APP").prefix_separator("_").separator("__")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: String,
    pub db_name: String,
}
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisConfig {
    pub url: String,
}
#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    //全局日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    //密码 md5 混淆 key
    #[serde(default)]
    pub md5_key: String,
}
impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), md5_key: String::new() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// 登录 token 有效期（秒）
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: default_session_ttl() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_session_ttl() -> u64 {
    7 * 24 * 3600
}
