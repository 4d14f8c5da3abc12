//! 街市值对象

use serde::{Deserialize, Serialize};

/// 街市（feira）的业务字段
///
/// 应用边界上传递的值对象，不包含审计时间戳和软删除标记。
/// `id` 由数据库生成，写入时忽略。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketValueObject {
    pub id: i64,
    pub long: f64,
    pub lat: f64,
    pub setcens: String,
    pub areap: String,
    pub coddist: i64,
    pub distrito: String,
    pub codsubpref: i64,
    pub subpref: String,
    pub regiao5: String,
    pub regiao8: String,
    pub nome_feira: String,
    pub registro: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub referencia: String,
}

impl MarketValueObject {
    /// 仅用于按经度查询的值对象
    pub fn with_long(long: f64) -> Self {
        Self {
            long,
            ..Default::default()
        }
    }

    /// 比较除 `id` 以外的全部业务字段
    pub fn same_business_fields(&self, other: &Self) -> bool {
        Self { id: 0, ..self.clone() } == Self { id: 0, ..other.clone() }
    }
}
