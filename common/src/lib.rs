pub mod config;
pub mod db;
pub mod errors;
pub mod redis;
pub mod repository;
pub mod util;

pub use repository::*;

/// 用户 ID（字符串主键）
pub type UserId = String;
