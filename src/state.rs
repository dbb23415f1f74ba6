use crate::{
    config::AppConfig,
    repositories::{
        employees::PgEmployeeDirectory, planning::PgAssignmentStore, AssignmentStore,
        EmployeeDirectory,
    },
    structs::planning::WeekRollover,
};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn AssignmentStore>,
    directory: Arc<dyn EmployeeDirectory>,
    rollover: WeekRollover,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>, rollover: WeekRollover) -> Self {
        Self {
            store: Arc::new(PgAssignmentStore::new(pool.clone())),
            directory: Arc::new(PgEmployeeDirectory::new(pool)),
            rollover,
        }
    }

    #[cfg(test)]
    pub fn with_backends(
        store: Arc<dyn AssignmentStore>,
        directory: Arc<dyn EmployeeDirectory>,
        rollover: WeekRollover,
    ) -> Self {
        Self {
            store,
            directory,
            rollover,
        }
    }

    pub fn get_store(&self) -> &dyn AssignmentStore {
        self.store.as_ref()
    }

    pub fn get_directory(&self) -> &dyn EmployeeDirectory {
        self.directory.as_ref()
    }

    pub fn get_rollover(&self) -> WeekRollover {
        self.rollover
    }
}

pub async fn get_connection(config: &AppConfig) -> Result<Pool<Postgres>, sqlx::Error> {
    // set up connection pool
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
}
