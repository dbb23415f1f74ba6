use crate::{
    errors::StoreError,
    repositories::AssignmentStore,
    structs::planning::{Assignment, AssignmentDraft},
};
use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgAssignmentStore {
    pool: PgPool,
}

impl PgAssignmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for PgAssignmentStore {
    /// 取得某一週的所有排班
    async fn fetch_week(&self, year: i32, week: i32) -> Result<Vec<Assignment>, StoreError> {
        let shifts = sqlx::query_as::<_, Assignment>(
            r#"
                SELECT id, year, week_number, day_of_week, shift_date, employee_id, half_day
                FROM shifts
                WHERE year = $1 AND week_number = $2
                ORDER BY day_of_week, id
            "#,
        )
        .bind(year)
        .bind(week)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    // bulk insert
    async fn insert_many(
        &self,
        drafts: Vec<AssignmentDraft>,
    ) -> Result<Vec<Assignment>, StoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder = QueryBuilder::new(
            r#"
            INSERT INTO shifts (
                id, year, week_number, day_of_week, shift_date, employee_id, half_day
            )
            "#,
        );

        query_builder.push_values(drafts, |mut b, draft| {
            b.push_bind(Uuid::new_v4())
                .push_bind(draft.year)
                .push_bind(draft.week)
                .push_bind(draft.day_of_week)
                .push_bind(draft.date)
                .push_bind(draft.employee_id)
                .push_bind(draft.half_day);
        });

        query_builder.push(
            " RETURNING id, year, week_number, day_of_week, shift_date, employee_id, half_day",
        );

        let inserted = query_builder
            .build_query_as::<Assignment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(inserted)
    }

    /// 刪除特定排班，id 不存在也視為成功
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
                DELETE FROM shifts
                WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
