use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    /// 每週固定上班的星期 (1 = 週一 .. 7 = 週日)，沒有則為 None
    pub fixed_days: Option<Vec<i32>>,
}
