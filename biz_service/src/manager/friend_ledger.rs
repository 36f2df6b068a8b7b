use crate::entitys::friendship_entity::{FriendStatus, FriendshipEntity};
use crate::entitys::user_entity::UserInfo;
use crate::manager::user_manager_auth::AuthUser;
use crate::store::{FriendshipStore, UserStore};
use common::UserId;
use common::errors::{AppError, RepoError};
use common::util::date_util::now;
use log::info;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("self request")]
    SelfRequest,
    #[error("unknown target user")]
    UnknownTarget,
    #[error("duplicate request")]
    DuplicateRequest,
    #[error("no such request")]
    NoSuchRequest,
    #[error("no relationship")]
    NoRelationship,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::SelfRequest => AppError::SelfRequest,
            LedgerError::UnknownTarget => AppError::UnknownTarget,
            LedgerError::DuplicateRequest => AppError::DuplicateRequest,
            LedgerError::NoSuchRequest => AppError::NoSuchRequest,
            LedgerError::NoRelationship => AppError::NoRelationship,
            LedgerError::Repo(e) => e.into(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// 好友信息
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct FriendView {
    pub id: UserId,
    pub username: String,
}

/// 申请记录（id / username 为对方）
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct RequestView {
    pub id: UserId,
    pub username: String,
    pub status: FriendStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct RequestLists {
    pub incoming_requests: Vec<RequestView>,
    pub outgoing_requests: Vec<RequestView>,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct StatusView {
    pub friend: UserId,
    pub status: FriendStatus,
}

/// 好友关系账本
///
/// 每条记录是一个有向申请 `from -> to`，两个用户之间最多两条，状态互相独立。
/// "是好友" 为任一方向存在 accepted 记录。
pub struct FriendLedger {
    users: Arc<dyn UserStore>,
    friendships: Arc<dyn FriendshipStore>,
}

impl FriendLedger {
    pub fn new(users: Arc<dyn UserStore>, friendships: Arc<dyn FriendshipStore>) -> Self {
        Self { users, friendships }
    }

    async fn require_user(&self, id: &str) -> LedgerResult<UserInfo> {
        self.users.find_by_id(id).await?.ok_or(LedgerError::UnknownTarget)
    }

    /// 发送好友申请
    ///
    /// 若对方已向自己发起 pending / accepted 申请，双方记录都直接变为 accepted。
    /// 重复检测依赖存储层唯一约束，插入失败即视为重复申请。
    pub async fn send_request(&self, actor: &AuthUser, target: &str) -> LedgerResult<()> {
        if actor.id == target {
            return Err(LedgerError::SelfRequest);
        }
        let target = self.require_user(target).await?;

        let edge = FriendshipEntity::pending(&actor.id, &target.id, now());
        match self.friendships.insert_edge(&edge).await {
            Ok(()) => {}
            Err(RepoError::Duplicate) => return Err(LedgerError::DuplicateRequest),
            Err(e) => return Err(e.into()),
        }

        let reciprocal = self.friendships.find_edge(&target.id, &actor.id).await?;
        match reciprocal {
            Some(back) if matches!(back.status, FriendStatus::Pending | FriendStatus::Accepted) => {
                self.friendships.update_status(&actor.id, &target.id, &[FriendStatus::Pending], FriendStatus::Accepted).await?;
                self.friendships.update_status(&target.id, &actor.id, &[FriendStatus::Pending], FriendStatus::Accepted).await?;
                info!("friend matched: {} <-> {}", actor.id, target.id);
            }
            _ => info!("friend request sent: {} -> {}", actor.id, target.id),
        }
        Ok(())
    }

    pub async fn accept_request(&self, actor: &AuthUser, requester: &str) -> LedgerResult<()> {
        self.answer_request(actor, requester, FriendStatus::Accepted).await
    }

    pub async fn reject_request(&self, actor: &AuthUser, requester: &str) -> LedgerResult<()> {
        self.answer_request(actor, requester, FriendStatus::Rejected).await
    }

    /// 处理 requester -> actor 的申请
    ///
    /// 只有 pending 可以流转；目标状态与当前一致时视为成功。
    async fn answer_request(&self, actor: &AuthUser, requester: &str, answer: FriendStatus) -> LedgerResult<()> {
        let requester = self.require_user(requester).await?;
        let edge = self.friendships.find_edge(&requester.id, &actor.id).await?.ok_or(LedgerError::NoSuchRequest)?;
        if edge.status == answer {
            return Ok(());
        }
        if edge.status != FriendStatus::Pending {
            return Err(LedgerError::NoSuchRequest);
        }
        let updated = self.friendships.update_status(&requester.id, &actor.id, &[FriendStatus::Pending, answer], answer).await?;
        if !updated {
            // 并发删除
            return Err(LedgerError::NoSuchRequest);
        }
        info!("friend request {}: {} -> {}", answer, requester.id, actor.id);
        Ok(())
    }

    /// 好友列表（按对方 id 去重，按用户名排序）
    pub async fn get_friends(&self, actor: &AuthUser) -> LedgerResult<Vec<FriendView>> {
        let edges = self.friendships.list_accepted(&actor.id).await?;
        let peers: BTreeSet<UserId> = edges.iter().map(|e| e.peer_of(&actor.id).clone()).collect();
        let ids: Vec<UserId> = peers.into_iter().collect();
        let mut friends: Vec<FriendView> =
            self.users.find_by_ids(&ids).await?.into_iter().map(|u| FriendView { id: u.id, username: u.username }).collect();
        friends.sort_by(|a, b| (&a.username, &a.id).cmp(&(&b.username, &b.id)));
        Ok(friends)
    }

    /// 收到的与发出的全部申请（包含所有状态）
    pub async fn get_requests(&self, actor: &AuthUser) -> LedgerResult<RequestLists> {
        let incoming = self.friendships.list_incoming(&actor.id).await?;
        let outgoing = self.friendships.list_outgoing(&actor.id).await?;

        let ids: Vec<UserId> = incoming
            .iter()
            .map(|e| e.from_id.clone())
            .chain(outgoing.iter().map(|e| e.to_id.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names: HashMap<UserId, String> = self.users.find_by_ids(&ids).await?.into_iter().map(|u| (u.id, u.username)).collect();

        let view = |peer: &UserId, status: FriendStatus| {
            names.get(peer).map(|username| RequestView { id: peer.clone(), username: username.clone(), status })
        };
        Ok(RequestLists {
            incoming_requests: incoming.iter().filter_map(|e| view(&e.from_id, e.status)).collect(),
            outgoing_requests: outgoing.iter().filter_map(|e| view(&e.to_id, e.status)).collect(),
        })
    }

    /// 查看与 peer 的关系状态，自己发出的记录优先
    pub async fn view_status(&self, actor: &AuthUser, peer: &str) -> LedgerResult<StatusView> {
        let peer = self.require_user(peer).await?;
        let edge = match self.friendships.find_edge(&actor.id, &peer.id).await? {
            Some(edge) => edge,
            None => self.friendships.find_edge(&peer.id, &actor.id).await?.ok_or(LedgerError::NoRelationship)?,
        };
        Ok(StatusView { friend: peer.id, status: edge.status })
    }

    /// 删除双方之间的全部记录
    pub async fn remove_friendship(&self, actor: &AuthUser, peer: &str) -> LedgerResult<()> {
        let peer = self.require_user(peer).await?;
        let outgoing = self.friendships.delete_edge(&actor.id, &peer.id).await?;
        let incoming = self.friendships.delete_edge(&peer.id, &actor.id).await?;
        if !outgoing && !incoming {
            return Err(LedgerError::NoRelationship);
        }
        info!("friendship removed: {} <-> {}", actor.id, peer.id);
        Ok(())
    }
}
