use crate::biz_service::friendship_service::FriendshipService;
use crate::biz_service::session_service::{LocalSessionService, RedisSessionService};
use crate::biz_service::user_service::UserService;
use crate::manager::friend_ledger::FriendLedger;
use crate::manager::user_manager_auth::UserManagerAuth;
use crate::store::memory_store::MemoryStore;
use crate::store::{FriendshipStore, SessionStore, UserStore};
use common::config::AppConfig;
use common::db::init_db;
use common::redis::redis_pool::build_redis_pool;
use log::{info, warn};
use std::sync::Arc;

pub mod biz_service;
pub mod entitys;
pub mod manager;
pub mod store;

/// 业务服务集合，由启动代码构建后注入到 HTTP 层
#[derive(Clone)]
pub struct BizContext {
    pub ledger: Arc<FriendLedger>,
    pub auth: Arc<UserManagerAuth>,
}

impl BizContext {
    pub fn new(users: Arc<dyn UserStore>, friendships: Arc<dyn FriendshipStore>, sessions: Arc<dyn SessionStore>, md5_key: &str) -> Self {
        Self {
            ledger: Arc::new(FriendLedger::new(users.clone(), friendships)),
            auth: Arc::new(UserManagerAuth::new(users, sessions, md5_key)),
        }
    }

    /// 全部使用内存存储（测试 / 本地调试）
    pub fn in_memory(md5_key: &str, session_ttl_secs: u64) -> Self {
        let store = Arc::new(MemoryStore::new());
        let users: Arc<dyn UserStore> = store.clone();
        let friendships: Arc<dyn FriendshipStore> = store;
        let sessions: Arc<dyn SessionStore> = Arc::new(LocalSessionService::new(session_ttl_secs));
        Self::new(users, friendships, sessions, md5_key)
    }

    /// 按配置初始化：有 database 用 MongoDB，有 redis 则会话放 Redis
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let ttl = config.get_session().ttl_secs;
        let sessions: Arc<dyn SessionStore> = match &config.redis {
            Some(redis) => {
                info!("session store: redis");
                Arc::new(RedisSessionService::new(build_redis_pool(&redis.url)?, ttl))
            }
            None => Arc::new(LocalSessionService::new(ttl)),
        };

        let (users, friendships): (Arc<dyn UserStore>, Arc<dyn FriendshipStore>) = match &config.database {
            Some(db_config) => {
                let db = init_db(&db_config.url, &db_config.db_name).await?;
                let user_service = UserService::new(db.clone());
                user_service.init_indexes().await?;
                let friendship_service = FriendshipService::new(db);
                friendship_service.init_indexes().await?;
                info!("store: mongodb {}", db_config.db_name);
                let users: Arc<dyn UserStore> = Arc::new(user_service);
                let friendships: Arc<dyn FriendshipStore> = Arc::new(friendship_service);
                (users, friendships)
            }
            None => {
                warn!("no database configured, using in-memory store");
                let store = Arc::new(MemoryStore::new());
                let users: Arc<dyn UserStore> = store.clone();
                let friendships: Arc<dyn FriendshipStore> = store;
                (users, friendships)
            }
        };

        Ok(Self::new(users, friendships, sessions, &config.get_sys().md5_key))
    }
}
