use crate::{errors::StoreError, repositories::EmployeeDirectory, structs::employees::Employee};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgEmployeeDirectory {
    pool: PgPool,
}

impl PgEmployeeDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for PgEmployeeDirectory {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
                SELECT id, name, active, fixed_days
                FROM employees
                ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn list_active(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
                SELECT id, name, active, fixed_days
                FROM employees
                WHERE active = TRUE
                ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn list_active_with_fixed_days(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
                SELECT id, name, active, fixed_days
                FROM employees
                WHERE active = TRUE AND fixed_days IS NOT NULL
                ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }
}
