use crate::entitys::user_entity::UserInfo;
use crate::store::UserStore;
use async_trait::async_trait;
use common::UserId;
use common::index_trait::ensure_indexes;
use common::query_builder::QueryBuilder;
use common::repository_util::{BaseRepository, RepoResult, Repository};
use mongodb::Database;
use mongodb::bson::doc;

/// 用户账号（MongoDB `user` 集合）
#[derive(Debug)]
pub struct UserService {
    pub dao: BaseRepository<UserInfo>,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        let collection = db.collection("user");
        Self { dao: BaseRepository::new(collection) }
    }

    /// 用户名唯一索引
    pub async fn init_indexes(&self) -> mongodb::error::Result<()> {
        ensure_indexes(&self.dao.collection).await
    }
}

#[async_trait]
impl UserStore for UserService {
    async fn insert_user(&self, user: &UserInfo) -> RepoResult<()> {
        self.dao.insert(user).await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserInfo>> {
        self.dao.find_one(doc! { "_id": id }).await
    }

    async fn find_by_name(&self, username: &str) -> RepoResult<Option<UserInfo>> {
        self.dao.find_one(doc! { "username": username }).await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<UserInfo>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let filter = QueryBuilder::new().in_array("_id", ids.to_vec()).build();
        self.dao.query(filter).await
    }
}
