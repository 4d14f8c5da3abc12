//! domain-core - 街市领域核心类型

mod market;

pub use market::*;
