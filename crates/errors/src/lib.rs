//! feiras-errors - 统一错误处理
//!
//! 仓储层按阶段分类错误（prepare / execute / scan），应用层使用 `AppError`

use std::fmt;

use thiserror::Error;

/// 仓储操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Find,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Find => "Find",
        }
    }

    /// 失败时写入日志的消息
    pub fn log_message(&self, stage: Stage) -> String {
        match stage {
            Stage::Prepare => format!("[MarketRepository::{}] Error in prepare statement", self),
            Stage::Execute => format!("[MarketRepository::{}] query execution error", self),
            Stage::Decode => format!("[MarketRepository::{}] - scanning the result failure", self),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 语句处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// 预编译语句
    Prepare,
    /// 执行语句
    Execute,
    /// 解码结果行
    Decode,
}

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("[MarketRepository::{operation}] statement preparation failed: {source}")]
    PrepareStatement {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },

    #[error("[MarketRepository::{operation}] query execution failed: {source}")]
    QueryExecution {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },

    #[error("[MarketRepository::{operation}] result decoding failed: {source}")]
    ResultDecoding {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    pub fn new(operation: Operation, stage: Stage, source: sqlx::Error) -> Self {
        match stage {
            Stage::Prepare => Self::PrepareStatement { operation, source },
            Stage::Execute => Self::QueryExecution { operation, source },
            Stage::Decode => Self::ResultDecoding { operation, source },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::PrepareStatement { operation, .. }
            | Self::QueryExecution { operation, .. }
            | Self::ResultDecoding { operation, .. } => *operation,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::PrepareStatement { .. } => Stage::Prepare,
            Self::QueryExecution { .. } => Stage::Execute,
            Self::ResultDecoding { .. } => Stage::Decode,
        }
    }

    /// 底层驱动错误
    pub fn driver_error(&self) -> &sqlx::Error {
        match self {
            Self::PrepareStatement { source, .. }
            | Self::QueryExecution { source, .. }
            | Self::ResultDecoding { source, .. } => source,
        }
    }
}

/// 仓储 Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AppError {
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) => 500,
            Self::Repository(err) => match err.driver_error() {
                sqlx::Error::PoolTimedOut => 503,
                _ => 500,
            },
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
