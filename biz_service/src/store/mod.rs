//! 存储抽象：账号、好友关系、登录会话。
//!
//! MongoDB / Redis 实现位于 `biz_service`，内存实现见 [`memory_store`]。

pub mod memory_store;

use crate::entitys::friendship_entity::{FriendStatus, FriendshipEntity};
use crate::entitys::user_entity::UserInfo;
use async_trait::async_trait;
use common::UserId;
use common::repository_util::RepoResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 用户名重复时返回 `RepoError::Duplicate`
    async fn insert_user(&self, user: &UserInfo) -> RepoResult<()>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserInfo>>;
    async fn find_by_name(&self, username: &str) -> RepoResult<Option<UserInfo>>;
    /// 批量查询，不存在的 id 直接忽略
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<UserInfo>>;
}

#[async_trait]
pub trait FriendshipStore: Send + Sync {
    /// 有序对 (from_id, to_id) 已存在时返回 `RepoError::Duplicate`
    async fn insert_edge(&self, edge: &FriendshipEntity) -> RepoResult<()>;
    async fn find_edge(&self, from_id: &str, to_id: &str) -> RepoResult<Option<FriendshipEntity>>;
    /// 仅当当前状态属于 `expected` 时改为 `status`，返回是否命中
    async fn update_status(&self, from_id: &str, to_id: &str, expected: &[FriendStatus], status: FriendStatus) -> RepoResult<bool>;
    /// 返回是否删除了记录
    async fn delete_edge(&self, from_id: &str, to_id: &str) -> RepoResult<bool>;
    /// to_id == user 的全部记录，按创建时间排序
    async fn list_incoming(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>>;
    /// from_id == user 的全部记录，按创建时间排序
    async fn list_outgoing(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>>;
    /// 任一方向包含 user 且状态为 accepted 的记录
    async fn list_accepted(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, token: &str, user_id: &UserId) -> RepoResult<()>;
    async fn get(&self, token: &str) -> RepoResult<Option<UserId>>;
    async fn remove(&self, token: &str) -> RepoResult<()>;
}
