//! # check 命令实现
//!
//! 逐个解析化学式并判断能否电荷中性。
//!
//! ## 功能
//! - 宽松解析化学式，报告被丢弃或修补的输入（`--strict` 时视为错误）
//! - 报告不在氧化态表中的元素
//! - 终端表格显示判定结果和氧化态分配
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `parsers/formula.rs`, `oxidation/`
//! - 使用 `utils/output.rs`

use crate::cli::check::CheckArgs;
use crate::error::{OxcheckError, Result};
use crate::models::Composition;
use crate::oxidation::{NeutralitySolver, NeutralityReport};
use crate::parsers::formula::{parse_formula_lenient, ParseIssue};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 判定结果行
#[derive(Debug, Clone, Tabled)]
struct CheckRow {
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Composition")]
    composition: String,
    #[tabled(rename = "Verdict")]
    verdict: String,
    #[tabled(rename = "Oxidation states")]
    oxidation_states: String,
    #[tabled(rename = "Search")]
    search: String,
}

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Oxidation-State Neutrality Check");

    let solver = NeutralitySolver::new(args.search.config());
    let mut rows = Vec::with_capacity(args.formulas.len());
    let mut neutral_count = 0;

    for formula in &args.formulas {
        let parsed = parse_formula_lenient(formula);

        if !parsed.is_clean() {
            let reason = join_issues(&parsed.issues);
            if args.strict {
                return Err(OxcheckError::FormulaRejected {
                    formula: formula.clone(),
                    reason,
                });
            }
            output::print_warning(&format!("'{}': {}", formula, reason));
        }

        if parsed.composition.is_empty() {
            output::print_warning(&format!("'{}': no elements recognized", formula));
        }

        let report = solver.evaluate(&parsed.composition);

        if !report.unknown_elements.is_empty() {
            output::print_warning(&format!(
                "'{}': unknown elements {} - using default oxidation states",
                formula,
                report.unknown_elements.join(", ")
            ));
        }

        if report.verdict.is_neutral() {
            neutral_count += 1;
        }

        rows.push(check_row(formula, &parsed.composition, &report));
    }

    println!("{}", Table::new(&rows));

    output::print_done(&format!(
        "{} of {} formulas can be charge neutral",
        neutral_count,
        args.formulas.len()
    ));

    Ok(())
}

/// 将解析问题拼接为一行说明
fn join_issues(issues: &[ParseIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 生成表格行
fn check_row(formula: &str, composition: &Composition, report: &NeutralityReport) -> CheckRow {
    CheckRow {
        formula: formula.to_string(),
        composition: composition.to_string(),
        verdict: report.verdict.to_string(),
        oxidation_states: report
            .verdict
            .assignment()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        search: format!("{} ({} tried)", report.strategy, report.explored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::check::SearchArgs;
    use crate::parsers::formula::parse_formula;

    fn search_args() -> SearchArgs {
        SearchArgs {
            max_elements: 4,
            max_candidates: 5,
            max_assignments: 1000,
        }
    }

    #[test]
    fn test_check_row_neutral() {
        let composition = parse_formula("Fe2O3");
        let report = NeutralitySolver::default().evaluate(&composition);
        let row = check_row("Fe2O3", &composition, &report);
        assert_eq!(row.verdict, "neutral");
        assert_eq!(row.oxidation_states, "Fe:+3 O:-2");
        assert_eq!(row.search, "exhaustive (1 tried)");
    }

    #[test]
    fn test_check_row_elemental() {
        let composition = parse_formula("N2");
        let report = NeutralitySolver::default().evaluate(&composition);
        let row = check_row("N2", &composition, &report);
        assert_eq!(row.verdict, "neutral (diatomic molecule)");
        assert_eq!(row.oxidation_states, "N/A");
    }

    #[test]
    fn test_strict_rejects_stray_text() {
        let args = CheckArgs {
            formulas: vec!["Na+Cl".to_string()],
            strict: true,
            search: search_args(),
        };
        let err = execute(args).unwrap_err();
        assert!(matches!(err, OxcheckError::FormulaRejected { .. }));
    }

    #[test]
    fn test_lenient_accepts_stray_text() {
        let args = CheckArgs {
            formulas: vec!["Na+Cl".to_string(), "CO2".to_string()],
            strict: false,
            search: search_args(),
        };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_join_issues() {
        let parsed = parse_formula_lenient("(Na)Cl)");
        assert_eq!(
            join_issues(&parsed.issues),
            "unmatched closing bracket at 6 dropped"
        );
    }
}
