//! # check 子命令 CLI 定义
//!
//! 逐个判断化学式能否电荷中性，并给出氧化态分配。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`
//! - `SearchArgs` 也被 `cli/filter.rs` 使用

use crate::oxidation::SearchConfig;
use clap::Args;

/// 搜索限制参数
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Maximum number of distinct elements searched exhaustively (more uses the heuristic)
    #[arg(long, default_value_t = 4)]
    pub max_elements: usize,

    /// Maximum number of ranked oxidation states tried per element
    #[arg(long, default_value_t = 5)]
    pub max_candidates: usize,

    /// Maximum number of assignments generated by the exhaustive search
    #[arg(long, default_value_t = 1000)]
    pub max_assignments: usize,
}

impl SearchArgs {
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            max_exhaustive_elements: self.max_elements,
            max_candidates: self.max_candidates,
            max_assignments: self.max_assignments,
        }
    }
}

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Chemical formulas to check (e.g. NaCl Fe2O3 "Ca3(PO4)2")
    #[arg(required = true)]
    pub formulas: Vec<String>,

    /// Treat dropped or repaired formula text as an error
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[command(flatten)]
    pub search: SearchArgs,
}
