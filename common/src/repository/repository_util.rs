use crate::errors::RepoError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::Document;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::FindOptions;
use mongodb::Collection;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// MongoDB 唯一索引冲突错误码
const DUPLICATE_KEY_CODE: i32 = 11000;

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait Repository<T> {
    /// 插入，唯一索引冲突时返回 `RepoError::Duplicate`
    async fn insert(&self, entity: &T) -> RepoResult<()>;
    async fn find_one(&self, filter: Document) -> RepoResult<Option<T>>;
    async fn query(&self, filter: Document) -> RepoResult<Vec<T>>;
    /// 按字段升序查询
    async fn query_sorted(&self, filter: Document, sort: Document) -> RepoResult<Vec<T>>;
    /// 更新单条，返回命中条数
    async fn update_one(&self, filter: Document, update: Document) -> RepoResult<u64>;
    async fn delete(&self, filter: Document) -> RepoResult<u64>;
}

#[allow(dead_code)]
#[derive(Debug)]
pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>, // 线程安全的数据库连接池
    _marker: PhantomData<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection, _marker: Default::default() }
    }
}

pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn insert(&self, entity: &T) -> RepoResult<()> {
        match self.collection.insert_one(entity).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(RepoError::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_one(&self, filter: Document) -> RepoResult<Option<T>> {
        let result = self.collection.find_one(filter).await?;
        Ok(result)
    }

    async fn query(&self, filter: Document) -> RepoResult<Vec<T>> {
        let cursor = self.collection.find(filter).await?;
        let result: Vec<T> = cursor.try_collect().await?;
        Ok(result)
    }

    async fn query_sorted(&self, filter: Document, sort: Document) -> RepoResult<Vec<T>> {
        let find_options = FindOptions::builder().sort(sort).build();
        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let result: Vec<T> = cursor.try_collect().await?;
        Ok(result)
    }

    async fn update_one(&self, filter: Document, update: Document) -> RepoResult<u64> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, filter: Document) -> RepoResult<u64> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}
