use crate::entitys::friendship_entity::{FriendStatus, FriendshipEntity};
use crate::entitys::user_entity::UserInfo;
use crate::store::{FriendshipStore, UserStore};
use async_trait::async_trait;
use common::UserId;
use common::errors::RepoError;
use common::repository_util::RepoResult;
use common::util::date_util::now;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// 进程内存储，用于测试和未配置数据库时运行
///
/// 唯一约束通过 DashMap 的 entry 原子插入保证。
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, UserInfo>,
    /// username -> id
    user_names: DashMap<String, UserId>,
    /// (from_id, to_id) -> edge
    edges: DashMap<(UserId, UserId), FriendshipEntity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_edges(&self, pred: impl Fn(&FriendshipEntity) -> bool) -> Vec<FriendshipEntity> {
        let mut list: Vec<FriendshipEntity> = self.edges.iter().filter(|e| pred(e.value())).map(|e| e.value().clone()).collect();
        list.sort_by(|a, b| (a.created_at, &a.from_id, &a.to_id).cmp(&(b.created_at, &b.from_id, &b.to_id)));
        list
    }
}

fn edge_key(from_id: &str, to_id: &str) -> (UserId, UserId) {
    (from_id.to_string(), to_id.to_string())
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &UserInfo) -> RepoResult<()> {
        match self.user_names.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(RepoError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserInfo>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_by_name(&self, username: &str) -> RepoResult<Option<UserInfo>> {
        let id = self.user_names.get(username).map(|id| id.value().clone());
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.value().clone())))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<UserInfo>> {
        Ok(ids.iter().filter_map(|id| self.users.get(id).map(|u| u.value().clone())).collect())
    }
}

#[async_trait]
impl FriendshipStore for MemoryStore {
    async fn insert_edge(&self, edge: &FriendshipEntity) -> RepoResult<()> {
        match self.edges.entry(edge_key(&edge.from_id, &edge.to_id)) {
            Entry::Occupied(_) => Err(RepoError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(edge.clone());
                Ok(())
            }
        }
    }

    async fn find_edge(&self, from_id: &str, to_id: &str) -> RepoResult<Option<FriendshipEntity>> {
        Ok(self.edges.get(&edge_key(from_id, to_id)).map(|e| e.value().clone()))
    }

    async fn update_status(&self, from_id: &str, to_id: &str, expected: &[FriendStatus], status: FriendStatus) -> RepoResult<bool> {
        match self.edges.get_mut(&edge_key(from_id, to_id)) {
            Some(mut edge) if expected.contains(&edge.status) => {
                edge.status = status;
                edge.updated_at = now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_edge(&self, from_id: &str, to_id: &str) -> RepoResult<bool> {
        Ok(self.edges.remove(&edge_key(from_id, to_id)).is_some())
    }

    async fn list_incoming(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        Ok(self.collect_edges(|e| e.to_id == user))
    }

    async fn list_outgoing(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        Ok(self.collect_edges(|e| e.from_id == user))
    }

    async fn list_accepted(&self, user: &str) -> RepoResult<Vec<FriendshipEntity>> {
        Ok(self.collect_edges(|e| e.status == FriendStatus::Accepted && (e.from_id == user || e.to_id == user)))
    }
}
