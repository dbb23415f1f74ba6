pub mod employees;
#[cfg(test)]
pub mod memory;
pub mod planning;

use crate::{
    errors::StoreError,
    structs::{
        employees::Employee,
        planning::{Assignment, AssignmentDraft},
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// 排班資料的儲存層
///
/// 沒有 transaction 也沒有唯一性限制；先讀再寫之間若有其他管理者寫入，可能產生重複排班
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn fetch_week(&self, year: i32, week: i32) -> Result<Vec<Assignment>, StoreError>;

    async fn insert_many(&self, drafts: Vec<AssignmentDraft>)
        -> Result<Vec<Assignment>, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}

/// 員工名單，唯讀
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// 全部員工，依姓名排序
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// 在職員工，依姓名排序
    async fn list_active(&self) -> Result<Vec<Employee>, StoreError>;

    /// 在職且有設定固定班日的員工
    async fn list_active_with_fixed_days(&self) -> Result<Vec<Employee>, StoreError>;
}
