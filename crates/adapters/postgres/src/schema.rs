//! `feiras` 表结构
//!
//! 没有外部迁移工具的部署和集成测试用 `ensure_schema` 建表

use feiras_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::info;

/// 建表语句，列顺序与 `MARKET_COLUMNS` 一致
pub const CREATE_FEIRAS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS feiras (
    id BIGSERIAL PRIMARY KEY,
    long DOUBLE PRECISION NOT NULL,
    lat DOUBLE PRECISION NOT NULL,
    setcens TEXT NOT NULL,
    areap TEXT NOT NULL,
    coddist BIGINT NOT NULL,
    distrito TEXT NOT NULL,
    codsubpref BIGINT NOT NULL,
    subpref TEXT NOT NULL,
    regiao5 TEXT NOT NULL,
    regiao8 TEXT NOT NULL,
    nome_feira TEXT NOT NULL,
    registro TEXT NOT NULL,
    logradouro TEXT NOT NULL,
    numero TEXT NOT NULL,
    bairro TEXT NOT NULL,
    referencia TEXT NOT NULL,
    criado_em TIMESTAMPTZ NOT NULL,
    atualizado_em TIMESTAMPTZ NOT NULL,
    deletado_em TIMESTAMPTZ NULL
)
"#;

/// 按经度查询的部分索引，只覆盖未删除的记录
pub const CREATE_FEIRAS_LONG_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_feiras_long_active ON feiras (long) WHERE deletado_em IS NULL";

/// 创建 `feiras` 表（已存在则跳过）
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(CREATE_FEIRAS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create feiras table: {}", e)))?;

    sqlx::query(CREATE_FEIRAS_LONG_INDEX_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create feiras index: {}", e)))?;

    info!(table = "feiras", "Schema ensured");
    Ok(())
}
