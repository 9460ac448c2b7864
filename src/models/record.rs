//! # 结构搜索结果表格行
//!
//! 结构搜索汇总表（空格分隔，每行一个结构）中与中性筛选有关的字段。
//!
//! ## 依赖关系
//! - 被 `parsers/table.rs` 生成
//! - 被 `commands/filter.rs` 使用

use super::composition::Assignment;
use serde::{Deserialize, Serialize};

/// 从表格中提取的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// 来源文件
    pub source: String,

    /// 行号（从 1 开始）
    pub line: u64,

    /// 结构文件名
    pub filename: String,

    /// 化学式
    pub formula: String,

    /// 原子数（原样保留）
    pub num_atoms: String,

    /// 空间群（原样保留）
    pub space_group: String,
}

/// 通过中性筛选的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralRecord {
    pub filename: String,
    pub formula: String,
    pub num_atoms: String,
    pub space_group: String,

    /// 见证分配的文本形式，`N/A` 表示单质特例（没有数值分配）
    pub oxidation_states: String,
}

impl NeutralRecord {
    pub fn new(row: &TableRow, assignment: Option<&Assignment>) -> Self {
        let oxidation_states = assignment
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        NeutralRecord {
            filename: row.filename.clone(),
            formula: row.formula.clone(),
            num_atoms: row.num_atoms.clone(),
            space_group: row.space_group.clone(),
            oxidation_states,
        }
    }
}
