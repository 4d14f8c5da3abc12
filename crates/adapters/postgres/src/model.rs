//! `feiras` 表的存储模型和行映射

use chrono::{DateTime, Utc};
use feiras_domain::MarketValueObject;

use crate::database::{ScanRow, SqlValue};

/// `feiras` 表的列，顺序即 `RETURNING *` 和查询结果的列序
pub const MARKET_COLUMNS: [&str; 20] = [
    "id",
    "long",
    "lat",
    "setcens",
    "areap",
    "coddist",
    "distrito",
    "codsubpref",
    "subpref",
    "regiao5",
    "regiao8",
    "nome_feira",
    "registro",
    "logradouro",
    "numero",
    "bairro",
    "referencia",
    "criado_em",
    "atualizado_em",
    "deletado_em",
];

/// 写入时绑定的列：去掉 `id` 和 `deletado_em`
pub const INSERT_COLUMNS: &[&str] = &[
    "long",
    "lat",
    "setcens",
    "areap",
    "coddist",
    "distrito",
    "codsubpref",
    "subpref",
    "regiao5",
    "regiao8",
    "nome_feira",
    "registro",
    "logradouro",
    "numero",
    "bairro",
    "referencia",
    "criado_em",
    "atualizado_em",
];

/// 存储模型
///
/// `deletado_em` 为 `None` 表示记录有效，非空即软删除时间。
#[derive(Debug, Clone, PartialEq)]
pub struct MarketModel {
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
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
    pub deletado_em: Option<DateTime<Utc>>,
}

impl MarketModel {
    /// 新记录：创建和更新时间相同，未删除
    pub fn from_value_object(market: &MarketValueObject, now: DateTime<Utc>) -> Self {
        Self {
            id: market.id,
            long: market.long,
            lat: market.lat,
            setcens: market.setcens.clone(),
            areap: market.areap.clone(),
            coddist: market.coddist,
            distrito: market.distrito.clone(),
            codsubpref: market.codsubpref,
            subpref: market.subpref.clone(),
            regiao5: market.regiao5.clone(),
            regiao8: market.regiao8.clone(),
            nome_feira: market.nome_feira.clone(),
            registro: market.registro.clone(),
            logradouro: market.logradouro.clone(),
            numero: market.numero.clone(),
            bairro: market.bairro.clone(),
            referencia: market.referencia.clone(),
            criado_em: now,
            atualizado_em: now,
            deletado_em: None,
        }
    }

    /// INSERT 的参数，顺序与 `INSERT_COLUMNS` 一致
    pub fn insert_params(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Float(self.long),
            SqlValue::Float(self.lat),
            SqlValue::Text(self.setcens.clone()),
            SqlValue::Text(self.areap.clone()),
            SqlValue::Int(self.coddist),
            SqlValue::Text(self.distrito.clone()),
            SqlValue::Int(self.codsubpref),
            SqlValue::Text(self.subpref.clone()),
            SqlValue::Text(self.regiao5.clone()),
            SqlValue::Text(self.regiao8.clone()),
            SqlValue::Text(self.nome_feira.clone()),
            SqlValue::Text(self.registro.clone()),
            SqlValue::Text(self.logradouro.clone()),
            SqlValue::Text(self.numero.clone()),
            SqlValue::Text(self.bairro.clone()),
            SqlValue::Text(self.referencia.clone()),
            SqlValue::Timestamp(self.criado_em),
            SqlValue::Timestamp(self.atualizado_em),
        ]
    }

    /// 按 `MARKET_COLUMNS` 的位置读取一行
    ///
    /// 查询语句里的别名在 PostgreSQL 中会被转成小写，所以不按列名读取。
    pub fn scan<R: ScanRow + ?Sized>(row: &R) -> Result<Self, sqlx::Error> {
        if row.column_count() != MARKET_COLUMNS.len() {
            return Err(sqlx::Error::Decode(
                format!(
                    "expected {} columns, row has {}",
                    MARKET_COLUMNS.len(),
                    row.column_count()
                )
                .into(),
            ));
        }

        Ok(Self {
            id: row.get_i64(0)?,
            long: row.get_f64(1)?,
            lat: row.get_f64(2)?,
            setcens: row.get_text(3)?,
            areap: row.get_text(4)?,
            coddist: row.get_i64(5)?,
            distrito: row.get_text(6)?,
            codsubpref: row.get_i64(7)?,
            subpref: row.get_text(8)?,
            regiao5: row.get_text(9)?,
            regiao8: row.get_text(10)?,
            nome_feira: row.get_text(11)?,
            registro: row.get_text(12)?,
            logradouro: row.get_text(13)?,
            numero: row.get_text(14)?,
            bairro: row.get_text(15)?,
            referencia: row.get_text(16)?,
            criado_em: row.get_timestamp(17)?,
            atualizado_em: row.get_timestamp(18)?,
            deletado_em: row.get_optional_timestamp(19)?,
        })
    }
}

impl From<MarketModel> for MarketValueObject {
    fn from(model: MarketModel) -> Self {
        Self {
            id: model.id,
            long: model.long,
            lat: model.lat,
            setcens: model.setcens,
            areap: model.areap,
            coddist: model.coddist,
            distrito: model.distrito,
            codsubpref: model.codsubpref,
            subpref: model.subpref,
            regiao5: model.regiao5,
            regiao8: model.regiao8,
            nome_feira: model.nome_feira,
            registro: model.registro,
            logradouro: model.logradouro,
            numero: model.numero,
            bairro: model.bairro,
            referencia: model.referencia,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRow, sample_market, sample_time};

    #[test]
    fn test_insert_columns() {
        let columns = INSERT_COLUMNS;
        assert_eq!(columns, &MARKET_COLUMNS[1..MARKET_COLUMNS.len() - 1]);
        assert_eq!(columns.len(), 18);
        assert_eq!(columns.first(), Some(&"long"));
        assert_eq!(columns.last(), Some(&"atualizado_em"));
        assert!(!columns.contains(&"id"));
        assert!(!columns.contains(&"deletado_em"));
    }

    #[test]
    fn test_from_value_object_sets_audit_fields() {
        let now = sample_time();
        let model = MarketModel::from_value_object(&sample_market(), now);
        assert_eq!(model.criado_em, now);
        assert_eq!(model.atualizado_em, now);
        assert_eq!(model.deletado_em, None);
    }

    #[test]
    fn test_insert_params_follow_column_order() {
        let now = sample_time();
        let market = sample_market();
        let params = MarketModel::from_value_object(&market, now).insert_params();

        assert_eq!(params.len(), INSERT_COLUMNS.len());
        assert_eq!(params[0], SqlValue::Float(market.long));
        assert_eq!(params[4], SqlValue::Int(market.coddist));
        assert_eq!(params[6], SqlValue::Int(market.codsubpref));
        assert_eq!(params[10], SqlValue::Text(market.nome_feira.clone()));
        assert_eq!(params[15], SqlValue::Text(market.referencia.clone()));
        assert_eq!(params[16], SqlValue::Timestamp(now));
        assert_eq!(params[17], SqlValue::Timestamp(now));
    }

    #[test]
    fn test_scan_round_trips_model() {
        let model = MarketModel {
            id: 7,
            ..MarketModel::from_value_object(&sample_market(), sample_time())
        };
        let scanned = MarketModel::scan(&FakeRow::from_model(&model)).unwrap();
        assert_eq!(scanned, model);

        let value: MarketValueObject = scanned.into();
        assert_eq!(value.id, 7);
        assert!(value.same_business_fields(&sample_market()));
    }

    #[test]
    fn test_scan_keeps_soft_delete_timestamp() {
        let model = MarketModel {
            deletado_em: Some(sample_time()),
            ..MarketModel::from_value_object(&sample_market(), sample_time())
        };
        let scanned = MarketModel::scan(&FakeRow::from_model(&model)).unwrap();
        assert_eq!(scanned.deletado_em, Some(sample_time()));
    }

    #[test]
    fn test_scan_rejects_wrong_shape() {
        let err = MarketModel::scan(&FakeRow::new(vec![None])).unwrap_err();
        assert!(matches!(err, sqlx::Error::Decode(_)));
    }

    #[test]
    fn test_scan_rejects_transposed_columns() {
        let model = MarketModel::from_value_object(&sample_market(), sample_time());
        let mut row = FakeRow::from_model(&model);
        row.swap(1, 3);
        let err = MarketModel::scan(&row).unwrap_err();
        assert!(matches!(err, sqlx::Error::ColumnDecode { .. }));
    }
}
