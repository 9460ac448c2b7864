//! # filter 子命令 CLI 定义
//!
//! 从结构搜索汇总表中筛选化学式电荷中性的结构
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/filter.rs`

use super::check::SearchArgs;
use crate::parsers::table::{parse_delimiter, TableLayout};
use clap::Args;
use std::path::PathBuf;

/// filter 子命令参数
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input: summary table file or directory containing summary tables
    pub input: PathBuf,

    /// Field delimiter: a single character, 'space', 'tab' or 'comma'
    #[arg(short, long, default_value = "space", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Column holding the structure file name (0-based)
    #[arg(long, default_value_t = 1)]
    pub name_col: usize,

    /// Column holding the chemical formula (0-based)
    #[arg(long, default_value_t = 4)]
    pub formula_col: usize,

    /// Column holding the number of atoms (0-based)
    #[arg(long, default_value_t = 7)]
    pub atoms_col: usize,

    /// Column holding the space group (0-based)
    #[arg(long, default_value_t = 10)]
    pub spacegroup_col: usize,

    /// Rows with fewer columns are skipped
    #[arg(long, default_value_t = 11)]
    pub min_columns: usize,

    /// Save neutral records to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (directory mode, e.g., "*.txt,summary*")
    #[arg(long, default_value = "*")]
    pub pattern: String,

    /// Recurse into subdirectories (directory mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub search: SearchArgs,
}

impl FilterArgs {
    /// 列布局
    pub fn layout(&self) -> TableLayout {
        TableLayout {
            delimiter: self.delimiter,
            name_col: self.name_col,
            formula_col: self.formula_col,
            atoms_col: self.atoms_col,
            spacegroup_col: self.spacegroup_col,
            min_columns: self.min_columns,
        }
    }
}
