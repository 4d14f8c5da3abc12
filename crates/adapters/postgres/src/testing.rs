//! 单元测试用的数据库替身和样例数据

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use feiras_domain::MarketValueObject;

use crate::database::{DbHandle, ScanRow, SqlValue};
use crate::model::MarketModel;

pub fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

pub fn sample_market() -> MarketValueObject {
    MarketValueObject {
        id: 1,
        long: -100.0,
        lat: -100.0,
        setcens: "setcens".to_string(),
        areap: "areap".to_string(),
        coddist: 10,
        distrito: "distrito".to_string(),
        codsubpref: 10,
        subpref: "subpref".to_string(),
        regiao5: "regiao5".to_string(),
        regiao8: "regiao8".to_string(),
        nome_feira: "nomefeira".to_string(),
        registro: "registro".to_string(),
        logradouro: "logradouro".to_string(),
        numero: "numero".to_string(),
        bairro: "bairro".to_string(),
        referencia: "referencia".to_string(),
    }
}

/// 内存中的结果行，`None` 表示 NULL
#[derive(Debug, Clone)]
pub struct FakeRow(Vec<Option<SqlValue>>);

impl FakeRow {
    pub fn new(values: Vec<Option<SqlValue>>) -> Self {
        Self(values)
    }

    pub fn from_model(model: &MarketModel) -> Self {
        let mut values = vec![Some(SqlValue::Int(model.id))];
        values.extend(model.insert_params().into_iter().map(Some));
        values.push(model.deletado_em.map(SqlValue::Timestamp));
        Self(values)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    fn value(&self, index: usize) -> Result<&Option<SqlValue>, sqlx::Error> {
        self.0.get(index).ok_or(sqlx::Error::ColumnIndexOutOfBounds {
            index,
            len: self.0.len(),
        })
    }

    fn mismatch(index: usize, expected: &str) -> sqlx::Error {
        sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: format!("expected {}", expected).into(),
        }
    }
}

impl ScanRow for FakeRow {
    fn column_count(&self) -> usize {
        self.0.len()
    }

    fn get_i64(&self, index: usize) -> Result<i64, sqlx::Error> {
        match self.value(index)? {
            Some(SqlValue::Int(v)) => Ok(*v),
            _ => Err(Self::mismatch(index, "BIGINT")),
        }
    }

    fn get_f64(&self, index: usize) -> Result<f64, sqlx::Error> {
        match self.value(index)? {
            Some(SqlValue::Float(v)) => Ok(*v),
            _ => Err(Self::mismatch(index, "DOUBLE PRECISION")),
        }
    }

    fn get_text(&self, index: usize) -> Result<String, sqlx::Error> {
        match self.value(index)? {
            Some(SqlValue::Text(v)) => Ok(v.clone()),
            _ => Err(Self::mismatch(index, "TEXT")),
        }
    }

    fn get_timestamp(&self, index: usize) -> Result<DateTime<Utc>, sqlx::Error> {
        match self.value(index)? {
            Some(SqlValue::Timestamp(v)) => Ok(*v),
            _ => Err(Self::mismatch(index, "TIMESTAMPTZ")),
        }
    }

    fn get_optional_timestamp(&self, index: usize) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
        match self.value(index)? {
            None => Ok(None),
            Some(SqlValue::Timestamp(v)) => Ok(Some(*v)),
            Some(_) => Err(Self::mismatch(index, "TIMESTAMPTZ")),
        }
    }
}

/// 记录调用的数据库替身
#[derive(Debug, Default)]
pub struct FakeDb {
    pub fail_prepare: bool,
    pub fail_execute: bool,
    pub delay: Option<Duration>,
    pub row: Option<FakeRow>,
    pub prepared: Mutex<Vec<String>>,
    pub executed: Mutex<Vec<Vec<SqlValue>>>,
}

impl FakeDb {
    pub fn returning(row: FakeRow) -> Self {
        Self {
            row: Some(row),
            ..Default::default()
        }
    }

    pub fn prepared(&self) -> Vec<String> {
        self.prepared.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<Vec<SqlValue>> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DbHandle for FakeDb {
    type Statement = String;
    type Row = FakeRow;

    async fn prepare(&self, sql: &'static str) -> Result<String, sqlx::Error> {
        if self.fail_prepare {
            return Err(sqlx::Error::Protocol("syntax error at or near \"feiras\"".into()));
        }
        self.prepared.lock().unwrap().push(sql.to_string());
        Ok(sql.to_string())
    }

    async fn query_row(
        &self,
        _statement: &String,
        params: Vec<SqlValue>,
    ) -> Result<Option<FakeRow>, sqlx::Error> {
        self.executed.lock().unwrap().push(params);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_execute {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(self.row.clone())
    }
}
