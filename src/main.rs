//! # oxcheck - 氧化态电荷中性筛选工具
//!
//! 解析化学式，在有限的氧化态组合中搜索电荷中性分配，
//! 并据此筛选结构搜索汇总表中的候选结构。
//!
//! ## 子命令
//! - `check`  - 判定单个或多个化学式能否电荷中性
//! - `filter` - 从汇总表中筛选可电荷中性的结构
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (化学式与汇总表解析)
//!   │     ├── oxidation/ (氧化态表与中性求解)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod oxidation;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
