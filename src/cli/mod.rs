//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `check`: 判断化学式能否电荷中性
//! - `filter`: 从结构汇总表中筛选电荷中性的结构
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: check, filter

pub mod check;
pub mod filter;

use clap::{Parser, Subcommand};

/// oxcheck - 氧化态电荷中性筛选工具
#[derive(Parser)]
#[command(name = "oxcheck")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Oxidation-state charge-neutrality screening for crystal structure searches", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether chemical formulas can be charge neutral
    Check(check::CheckArgs),

    /// Keep only charge-neutral structures from a search summary table
    Filter(filter::FilterArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["oxcheck", "check", "NaCl", "Fe2O3", "--strict"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.formulas, vec!["NaCl", "Fe2O3"]);
                assert!(args.strict);
                assert_eq!(args.search.max_elements, 4);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_filter_defaults() {
        let cli = Cli::try_parse_from(["oxcheck", "filter", "summary.txt"]).unwrap();
        match cli.command {
            Commands::Filter(args) => {
                let layout = args.layout();
                assert_eq!(layout.delimiter, b' ');
                assert_eq!(layout.formula_col, 4);
                assert_eq!(layout.min_columns, 11);
                assert_eq!(args.jobs, 0);
                assert!(args.output.is_none());
            }
            _ => panic!("expected filter"),
        }
    }
}
