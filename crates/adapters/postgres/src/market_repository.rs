//! PostgreSQL 街市仓储实现
//!
//! 每次调用都是 prepare → execute → scan 三步，失败时按阶段分类、
//! 记录一次错误日志并直接返回，不重试。

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use feiras_common::Clock;
use feiras_domain::MarketValueObject;
use feiras_errors::{Operation, RepositoryError, RepositoryResult, Stage};
use feiras_ports::{Logger, MarketRepository};
use sqlx::PgPool;
use tracing::debug;

use crate::connection::PostgresConfig;
use crate::database::{DbHandle, SqlValue};
use crate::model::MarketModel;
use crate::statements::{INSERT_MARKET_SQL, SELECT_MARKET_BY_LONG_SQL};

pub struct PostgresMarketRepository<D: DbHandle = PgPool> {
    logger: Arc<dyn Logger>,
    db: D,
    clock: Arc<dyn Clock>,
    statement_timeout: Option<Duration>,
}

impl<D: DbHandle> PostgresMarketRepository<D> {
    pub fn new(logger: Arc<dyn Logger>, db: D, clock: Arc<dyn Clock>) -> Self {
        Self {
            logger,
            db,
            clock,
            statement_timeout: None,
        }
    }

    /// 按连接配置创建，沿用其中的语句超时
    pub fn from_config(
        logger: Arc<dyn Logger>,
        db: D,
        clock: Arc<dyn Clock>,
        config: &PostgresConfig,
    ) -> Self {
        Self {
            statement_timeout: config.statement_timeout,
            ..Self::new(logger, db, clock)
        }
    }

    /// 限制执行阶段的耗时，超时按执行错误处理
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    fn fail(&self, operation: Operation, stage: Stage, source: sqlx::Error) -> RepositoryError {
        self.logger.error(&operation.log_message(stage), &[]);
        RepositoryError::new(operation, stage, source)
    }

    async fn execute(
        &self,
        statement: &D::Statement,
        params: Vec<SqlValue>,
    ) -> Result<Option<D::Row>, sqlx::Error> {
        let query = self.db.query_row(statement, params);
        match self.statement_timeout {
            Some(timeout) => tokio::time::timeout(timeout, query).await.map_err(|_| {
                sqlx::Error::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("statement timed out after {:?}", timeout),
                ))
            })?,
            None => query.await,
        }
    }
}

#[async_trait]
impl<D: DbHandle> MarketRepository for PostgresMarketRepository<D> {
    async fn create(&self, market: MarketValueObject) -> RepositoryResult<MarketValueObject> {
        const OP: Operation = Operation::Create;

        let model = MarketModel::from_value_object(&market, self.clock.now());

        let statement = self
            .db
            .prepare(INSERT_MARKET_SQL)
            .await
            .map_err(|e| self.fail(OP, Stage::Prepare, e))?;

        let row = self
            .execute(&statement, model.insert_params())
            .await
            .map_err(|e| self.fail(OP, Stage::Execute, e))?
            .ok_or_else(|| self.fail(OP, Stage::Execute, sqlx::Error::RowNotFound))?;

        let persisted = MarketModel::scan(&row).map_err(|e| self.fail(OP, Stage::Decode, e))?;
        debug!(id = persisted.id, long = persisted.long, "Market created");

        Ok(market)
    }

    async fn find(&self, market: &MarketValueObject) -> RepositoryResult<Option<MarketValueObject>> {
        const OP: Operation = Operation::Find;

        let statement = self
            .db
            .prepare(SELECT_MARKET_BY_LONG_SQL)
            .await
            .map_err(|e| self.fail(OP, Stage::Prepare, e))?;

        let row = self
            .execute(&statement, vec![SqlValue::Float(market.long)])
            .await
            .map_err(|e| self.fail(OP, Stage::Execute, e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Find 的取行和解码属于同一步
        let model = MarketModel::scan(&row).map_err(|e| self.fail(OP, Stage::Execute, e))?;
        Ok(Some(model.into()))
    }
}
