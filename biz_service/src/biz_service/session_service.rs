use crate::store::SessionStore;
use async_trait::async_trait;
use common::UserId;
use common::repository_util::RepoResult;
use deadpool_redis::Pool as RedisPool;
use deadpool_redis::redis::cmd;
use moka::sync::Cache;
use std::time::Duration;

const MAX_LOCAL_SESSIONS: u64 = 100_000;

/// 本地会话缓存（token -> user_id），过期由 moka 的 TTL 负责
pub struct LocalSessionService {
    cache: Cache<String, UserId>,
}

impl LocalSessionService {
    pub fn new(ttl_secs: u64) -> Self {
        let cache = Cache::builder().max_capacity(MAX_LOCAL_SESSIONS).time_to_live(Duration::from_secs(ttl_secs)).build();
        Self { cache }
    }
}

#[async_trait]
impl SessionStore for LocalSessionService {
    async fn put(&self, token: &str, user_id: &UserId) -> RepoResult<()> {
        self.cache.insert(token.to_string(), user_id.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> RepoResult<Option<UserId>> {
        Ok(self.cache.get(token))
    }

    async fn remove(&self, token: &str) -> RepoResult<()> {
        self.cache.invalidate(token);
        Ok(())
    }
}

/// Redis 会话（多实例部署时共享），key = `session:token:{token}`
pub struct RedisSessionService {
    pool: RedisPool,
    ttl_secs: u64,
}

impl RedisSessionService {
    pub fn new(pool: RedisPool, ttl_secs: u64) -> Self {
        Self { pool, ttl_secs }
    }

    fn token_key(token: &str) -> String {
        format!("session:token:{}", token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionService {
    async fn put(&self, token: &str, user_id: &UserId) -> RepoResult<()> {
        let mut conn = self.pool.get().await?;
        let _: () = cmd("SETEX").arg(Self::token_key(token)).arg(self.ttl_secs).arg(user_id).query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> RepoResult<Option<UserId>> {
        let mut conn = self.pool.get().await?;
        let uid: Option<String> = cmd("GET").arg(Self::token_key(token)).query_async(&mut conn).await?;
        Ok(uid)
    }

    async fn remove(&self, token: &str) -> RepoResult<()> {
        let mut conn = self.pool.get().await?;
        let _: i64 = cmd("DEL").arg(Self::token_key(token)).query_async(&mut conn).await?;
        Ok(())
    }
}
