//! 仓储使用的 SQL 语句

/// 写入一条记录并返回整行，18 个位置参数
pub const INSERT_MARKET_SQL: &str = "INSERT INTO feiras (long, lat, setcens, areap, coddist, distrito, codsubpref, subpref, regiao5, regiao8, nome_feira, registro, logradouro, numero, bairro, referencia, criado_em, atualizado_em) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) RETURNING *";

/// 按经度查找未删除的记录，1 个位置参数
pub const SELECT_MARKET_BY_LONG_SQL: &str = "SELECT id AS ID, long AS Long, lat AS Lat, setcens AS Setcens, areap AS Areap, coddist AS Coddist, distrito AS Distrito, codsubpref AS Codsubpref, subpref AS Subpref, regiao5 AS Regiao5, regiao8 AS Regiao8, nome_feira AS NomeFeira, registro AS Registro, logradouro AS Logradouro, numero AS Numero, bairro AS Bairro, referencia AS Referencia, criado_em AS CriadoEm, atualizado_em AS AtualizadoEm, deletado_em AS DeletadoEm FROM feiras WHERE deletado_em IS NULL AND long = $1";
