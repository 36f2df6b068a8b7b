use mongodb::bson::{Bson, Document, doc};

/// 简单的 Mongo 过滤条件构建器
///
/// 同一分组内的条件为 AND，`or()` 开启新分组，分组之间为 OR。
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    clauses: Vec<Document>,
    current: Document,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.current.insert(field, value.into());
        self
    }

    pub fn in_array<T: Into<Bson>>(mut self, field: &str, values: Vec<T>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<Bson>>();
        self.current.insert(field, doc! { "$in": arr });
        self
    }

    pub fn or(mut self) -> Self {
        let current = std::mem::take(&mut self.current);
        self.clauses.push(current);
        self
    }

    pub fn build(mut self) -> Document {
        if !self.current.is_empty() {
            self.clauses.push(self.current);
        }
        self.clauses.retain(|clause| !clause.is_empty());
        match self.clauses.len() {
            0 => doc! {},
            1 => self.clauses.remove(0),
            _ => doc! { "$or": self.clauses },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group() {
        let filter = QueryBuilder::new().eq("from_id", "a").eq("to_id", "b").build();
        assert_eq!(filter, doc! { "from_id": "a", "to_id": "b" });
    }

    #[test]
    fn test_or_groups() {
        let filter = QueryBuilder::new()
            .eq("from_id", "a")
            .eq("status", "accepted")
            .or()
            .eq("to_id", "a")
            .eq("status", "accepted")
            .build();
        assert_eq!(
            filter,
            doc! { "$or": [
                { "from_id": "a", "status": "accepted" },
                { "to_id": "a", "status": "accepted" }
            ] }
        );
    }

    #[test]
    fn test_in_array() {
        let filter = QueryBuilder::new().in_array("_id", vec!["x", "y"]).build();
        assert_eq!(filter, doc! { "_id": { "$in": ["x", "y"] } });
    }

    #[test]
    fn test_empty() {
        assert_eq!(QueryBuilder::new().or().build(), doc! {});
    }
}
