use hex::encode;
use md5::{Digest, Md5};
use uuid::Uuid;

pub fn build_id() -> String {
    let uuid = Uuid::new_v4().simple();
    format!("{}", uuid)
}

pub fn build_md5(content: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    encode(hasher.finalize())
}

/// 带混淆 key 的 md5，用于密码摘要
pub fn build_md5_with_key(content: &str, key: &str) -> String {
    build_md5(&format!("{}:{}", key, content))
}
