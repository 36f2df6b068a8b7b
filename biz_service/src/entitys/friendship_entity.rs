use common::UserId;
use common::index_trait::MongoIndexModelProvider;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// 有向好友关系状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, IntoStaticStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FriendStatus {
    #[default]
    Pending, // 待处理
    Accepted, // 已接受
    Rejected, // 已拒绝
}

impl FriendStatus {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// 有向好友关系：from_id 向 to_id 发起的申请，每个有序对最多一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendshipEntity {
    pub from_id: UserId,
    pub to_id: UserId,
    pub status: FriendStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl FriendshipEntity {
    pub fn pending(from_id: &UserId, to_id: &UserId, now: i64) -> Self {
        Self {
            from_id: from_id.clone(),
            to_id: to_id.clone(),
            status: FriendStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// 相对 `user` 的另一方
    pub fn peer_of(&self, user: &str) -> &UserId {
        if self.from_id == user { &self.to_id } else { &self.from_id }
    }
}

impl MongoIndexModelProvider for FriendshipEntity {
    fn index_models() -> Vec<IndexModel> {
        vec![
            IndexModel::builder()
                .keys(doc! { "from_id": 1, "to_id": 1 })
                .options(IndexOptions::builder().unique(true).name("uniq_from_to".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "to_id": 1 })
                .options(IndexOptions::builder().name("idx_to".to_string()).build())
                .build(),
        ]
    }
}
