use anyhow::Result;
use deadpool_redis::{Config, Pool, PoolConfig, Runtime};

/// 创建 Redis 连接池
pub fn build_redis_pool(redis_url: &str) -> Result<Pool> {
    let mut cfg = Config::from_url(redis_url);
    cfg.pool = Some(PoolConfig::new(16)); // 最大连接数
    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}
