//! # 解析器模块
//!
//! 提供化学式和结构汇总表的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: formula, table

pub mod formula;
pub mod table;
