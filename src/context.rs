//! Application context
//!
//! Built once by the bootstrap operation and handed to every operation
//! body. Holds no interior state besides what its members already guard.

use tracing::info;

use crate::config::Config;
use crate::persistence::Database;
use crate::router::CallResult;
use crate::store::Connector;
use crate::tasks::{TaskRegistry, WorkerPool};

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub database: Database,
    /// Tracked tasks and the worker pool they run on
    pub tasks: TaskRegistry,
}

impl AppContext {
    pub fn new(config: Config, database: Database, tasks: TaskRegistry) -> Self {
        Self {
            config,
            database,
            tasks,
        }
    }

    /// Starts the worker pool, checks the database and installs the schema
    /// catalog
    pub fn open(config: Config) -> CallResult<Self> {
        let pool = WorkerPool::new(config.worker_threads)?;

        let connector = Connector::new(
            config.database.database_path(),
            config.database.busy_timeout(),
        );
        let database = Database::new(connector, config.update_reverts_soft_deletion);
        database.connect()?;
        let tables = database.describe_schema()?;

        info!(
            schema = %config.database.schema,
            user = %config.database.user,
            tables,
            workers = config.worker_threads,
            "context ready"
        );

        Ok(Self::new(config, database, TaskRegistry::new(pool)))
    }
}
