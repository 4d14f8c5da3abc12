//! Repository trait 定义

use async_trait::async_trait;
use feiras_domain::MarketValueObject;
use feiras_errors::RepositoryResult;

/// 街市仓储
///
/// 只有两个操作：写入一条街市记录，以及按经度查找未删除的记录。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MarketRepository: Send + Sync {
    /// 写入新记录，成功时原样返回输入
    async fn create(&self, market: MarketValueObject) -> RepositoryResult<MarketValueObject>;

    /// 按 `market.long` 查找，未找到返回 `Ok(None)`
    async fn find(&self, market: &MarketValueObject) -> RepositoryResult<Option<MarketValueObject>>;
}
