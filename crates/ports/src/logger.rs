//! 错误日志接收端

/// 结构化日志字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogField {
    pub key: &'static str,
    pub value: String,
}

impl LogField {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// 仓储写错误日志用的接口
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Logger: Send + Sync {
    fn error(&self, message: &str, fields: &[LogField]);
}
