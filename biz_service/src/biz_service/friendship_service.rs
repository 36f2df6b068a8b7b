use crate::entitys::friendship_entity::{FriendStatus, FriendshipEntity};
use crate::store::FriendshipStore;
use async_trait::async_trait;
use common::index_trait::ensure_indexes;
use common::query_builder::QueryBuilder;
use common::repository_util::{BaseRepository, RepoResult, Repository};
use common::util::date_util::now;
use mongodb::Database;
use mongodb::bson::doc;

/// 有向好友关系（MongoDB `friendship` 集合，(from_id, to_id) 唯一索引）
#[derive(Debug)]
pub struct FriendshipService {
    pub dao: BaseRepository<FriendshipEntity>,
}

impl FriendshipService {
    pub fn new(db: Database) -> Self {
        let collection = db.collection("friendship");
        Self { dao: BaseRepository::new(collection) }
    }

    pub async fn init_indexes(&self) -> mongodb::error::Result<()> {
        ensure_indexes(&self.dao.collection).await
    }
}

#[async_trait]
impl FriendshipStore for FriendshipService {
    async fn insert_edge(&self, edge: &FriendshipEntity) -> RepoResult<()> {
        self.dao.insert(edge).await
    }

    async fn find_edge(&self, from_id: &str, to_id: &str) -> RepoResult<Option<FriendshipEntity>> {
        self.dao.find_one(doc! { "from_id": from_id, "to_id": to_id }).await
    }

    async fn update_status(&self, from_id: &str, to_id: &str, expected: &[FriendStatus], status: FriendStatus) -> RepoResult<bool> {
        let expected: Vec<&str> = expected.iter().map(|s| s.as_str()).collect();
        let filter = QueryBuilder::new().eq("from_id", from_id).eq("to_id", to_id).in_array("status", expected).build();
        let update = doc! {
            "$set": { "status": status.as_str(), "updated_at": now() }
        };
        let matched = self.dao.update_one(filter, update).await?;
        Ok(matched > 0)
    }

    async fn delete_edge(&self, from_id: &str, to_id: &str) -> RepoResult<bool> {
        let deleted = self.dao.delete(doc! { "from_id": from_id, "to_id": to_id }).await?;
        Ok(deleted > 0)
    }

    async fn list_incoming(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        self.dao.query_sorted(doc! { "to_id": user }, doc! { "created_at": 1 }).await
    }

    async fn list_outgoing(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        self.dao.query_sorted(doc! { "from_id": user }, doc! { "created_at": 1 }).await
    }

    async fn list_accepted(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        let accepted = FriendStatus::Accepted.as_str();
        let filter = QueryBuilder::new()
            .eq("from_id", user)
            .eq("status", accepted)
            .or()
            .eq("to_id", user)
            .eq("status", accepted)
            .build();
        self.dao.query_sorted(filter, doc! { "created_at": 1 }).await
    }
}
