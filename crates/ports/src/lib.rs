//! ports - 抽象 trait 层
//!
//! 定义仓储及其协作者的抽象接口

mod logger;
mod repository;

pub use logger::*;
pub use repository::*;
