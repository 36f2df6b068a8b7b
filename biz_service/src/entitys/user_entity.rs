use common::UserId;
use common::index_trait::MongoIndexModelProvider;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

/// ==========================
/// 👤 用户账号
/// ==========================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: UserId,
    /// 用户名（唯一，区分大小写）
    pub username: String,
    /// 密码摘要 md5(key:salt:password)
    pub password: String,
    pub salt: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl MongoIndexModelProvider for UserInfo {
    fn index_models() -> Vec<IndexModel> {
        let unique_name = IndexOptions::builder().unique(true).name("uniq_username".to_string()).build();
        vec![IndexModel::builder().keys(doc! { "username": 1 }).options(unique_name).build()]
    }
}
