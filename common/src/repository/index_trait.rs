use log::info;
use mongodb::{Collection, IndexModel};

pub trait MongoIndexModelProvider {
    fn index_models() -> Vec<IndexModel>;
}

/// 创建实体声明的索引（已存在的同名同定义索引由 MongoDB 忽略）
pub async fn ensure_indexes<T>(coll: &Collection<T>) -> mongodb::error::Result<()>
where
    T: MongoIndexModelProvider + Send + Sync,
{
    let models = T::index_models();
    if models.is_empty() {
        return Ok(());
    }
    let result = coll.create_indexes(models).await?;
    info!("✅ 索引就绪 {}: {:?}", coll.name(), result.index_names);
    Ok(())
}
