//! 数据库句柄抽象
//!
//! 仓储只依赖 prepare / execute 两步和按位置读取列，单元测试使用内存替身实现。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow, PgStatement};
use sqlx::{Executor, Row as _, Statement as _};

/// 按位置绑定的语句参数
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Float(f64),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

/// 按列序号读取结果行
pub trait ScanRow {
    fn column_count(&self) -> usize;
    fn get_i64(&self, index: usize) -> Result<i64, sqlx::Error>;
    fn get_f64(&self, index: usize) -> Result<f64, sqlx::Error>;
    fn get_text(&self, index: usize) -> Result<String, sqlx::Error>;
    fn get_timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error>;
    fn get_optional_timestamp(&self, index: usize) -> Result<Option<DateTime<Utc>>, sqlx::Error>;
}

/// 支持预编译语句和单行查询的数据库句柄
#[async_trait]
pub trait DbHandle: Send + Sync {
    type Statement: Send + Sync;
    type Row: ScanRow + Send;

    /// 预编译语句
    async fn prepare(&self, sql: &'static str) -> Result<Self::Statement, sqlx::Error>;

    /// 执行语句并取第一行
    async fn query_row(
        &self,
        statement: &Self::Statement,
        params: Vec<SqlValue>,
    ) -> Result<Option<Self::Row>, sqlx::Error>;
}

#[async_trait]
impl<T: DbHandle> DbHandle for Arc<T> {
    type Statement = T::Statement;
    type Row = T::Row;

    async fn prepare(&self, sql: &'static str) -> Result<Self::Statement, sqlx::Error> {
        (**self).prepare(sql).await
    }

    async fn query_row(
        &self,
        statement: &Self::Statement,
        params: Vec<SqlValue>,
    ) -> Result<Option<Self::Row>, sqlx::Error> {
        (**self).query_row(statement, params).await
    }
}

#[async_trait]
impl DbHandle for PgPool {
    type Statement = PgStatement<'static>;
    type Row = PgRow;

    async fn prepare(&self, sql: &'static str) -> Result<PgStatement<'static>, sqlx::Error> {
        Executor::prepare(self, sql).await
    }

    async fn query_row(
        &self,
        statement: &PgStatement<'static>,
        params: Vec<SqlValue>,
    ) -> Result<Option<PgRow>, sqlx::Error> {
        let mut query = statement.query();
        for param in params {
            query = match param {
                SqlValue::Float(v) => query.bind(v),
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Timestamp(v) => query.bind(v),
            };
        }
        query.fetch_optional(self).await
    }
}

impl ScanRow for PgRow {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn get_i64(&self, index: usize) -> Result<i64, sqlx::Error> {
        self.try_get(index)
    }

    fn get_f64(&self, index: usize) -> Result<f64, sqlx::Error> {
        self.try_get(index)
    }

    fn get_text(&self, index: usize) -> Result<String, sqlx::Error> {
        self.try_get(index)
    }

    fn get_timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error> {
        self.try_get(index)
    }

    fn get_optional_timestamp(&self, index: usize) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
        self.try_get(index)
    }
}
