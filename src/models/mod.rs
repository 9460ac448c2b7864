//! # 数据模型模块
//!
//! 定义化学组成、氧化态分配以及结构汇总表记录。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `oxidation/` 和 `commands/` 使用
//! - 子模块: composition, record

pub mod composition;
pub mod record;

pub use composition::{Assignment, Composition};
pub use record::{NeutralRecord, TableRow};
