//! # 氧化态分析模块
//!
//! 判断化学式能否通过某组氧化态实现电荷中性。
//!
//! ## 子模块
//! - `tables`: 氧化态、排序偏好、常见态与单质特例参考数据
//! - `solver`: 有界组合搜索
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/composition.rs`

pub mod solver;
pub mod tables;

pub use solver::{unknown_elements, NeutralResult, NeutralitySolver, NeutralityReport, SearchConfig};
