//! # filter 命令实现
//!
//! 从结构搜索汇总表中筛选化学式可电荷中性的结构。
//!
//! ## 功能
//! - 读取单个汇总表或目录中匹配的多个汇总表
//! - 并行判定每行化学式（rayon）
//! - 终端显示匹配率和中性结构表格
//! - 可选导出中性记录 CSV
//!
//! 无法判定的行（化学式中没有任何元素）被跳过，不会中断整个批次。
//!
//! ## 依赖关系
//! - 使用 `cli/filter.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `parsers/`, `oxidation/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::filter::FilterArgs;
use crate::error::{OxcheckError, Result};
use crate::models::{NeutralRecord, TableRow};
use crate::oxidation::{unknown_elements, NeutralResult, NeutralitySolver};
use crate::parsers::formula::parse_formula;
use crate::parsers::table::read_table_file;
use crate::utils::output;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 中性结构表格行
#[derive(Debug, Clone, Tabled)]
struct RecordRow {
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Atoms")]
    num_atoms: String,
    #[tabled(rename = "Space group")]
    space_group: String,
    #[tabled(rename = "Oxidation states")]
    oxidation_states: String,
}

/// 单行判定结果
#[derive(Debug, Clone)]
struct RowVerdict {
    row: TableRow,
    verdict: NeutralResult,
    unknown_elements: Vec<String>,
}

/// 筛选汇总
#[derive(Debug, Default)]
struct FilterSummary {
    /// 计入统计的行数（含无法判定的行）
    total: usize,
    /// 判定为中性的行数
    matched: usize,
    /// 中性记录，同名结构以后出现的为准
    records: Vec<NeutralRecord>,
    /// 未知元素 -> 出现的行数
    unknown_elements: BTreeMap<String, usize>,
}

/// 执行 filter 命令
pub fn execute(args: FilterArgs) -> Result<()> {
    output::print_header("Oxidation-State Neutral Filter");

    let layout = args.layout();
    layout.validate()?;

    let files = collect_inputs(&args)?;

    // 读取所有表格行
    let mut rows = Vec::new();
    for file in &files {
        match read_table_file(file, &layout) {
            Ok(file_rows) => rows.extend(file_rows),
            Err(e) if files.len() == 1 => return Err(e),
            Err(e) => output::print_warning(&format!("Skipping '{}': {}", file.display(), e)),
        }
    }

    output::print_info(&format!(
        "Read {} rows from {} file(s)",
        rows.len(),
        files.len()
    ));

    if rows.is_empty() {
        output::print_warning("No complete rows found.");
        return Ok(());
    }

    // 并行判定
    let solver = NeutralitySolver::new(args.search.config());
    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(&rows, "Evaluating", |row| evaluate_row(&solver, row))?;

    let summary = summarize(&result.outputs, result.total());

    for (symbol, count) in &summary.unknown_elements {
        output::print_warning(&format!(
            "Unknown element '{}' in {} row(s) - default oxidation states used",
            symbol, count
        ));
    }

    for (label, err) in result.failures.iter().take(10) {
        output::print_skip(&format!("{}: {}", label, err));
    }
    if result.failures.len() > 10 {
        output::print_skip(&format!("... and {} more", result.failures.len() - 10));
    }

    print_summary(&summary);

    if let Some(ref path) = args.output {
        save_records_csv(&summary.records, path)?;
        output::print_success(&format!(
            "{} neutral records saved to '{}'",
            summary.records.len(),
            path.display()
        ));
    }

    Ok(())
}

/// 收集输入文件
fn collect_inputs(args: &FilterArgs) -> Result<Vec<PathBuf>> {
    if args.input.is_file() {
        return Ok(vec![args.input.clone()]);
    }

    if !args.input.is_dir() {
        return Err(OxcheckError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    output::print_info(&format!("Directory mode: '{}'", args.input.display()));

    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive);

    let files = collector.collect();
    if files.is_empty() {
        return Err(OxcheckError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} summary file(s)", files.len()));
    Ok(files)
}

/// 判定单行
fn evaluate_row(solver: &NeutralitySolver, row: &TableRow) -> ProcessResult<RowVerdict> {
    let composition = parse_formula(&row.formula);

    if composition.is_empty() {
        return ProcessResult::Failed(
            format!("{}:{}", row.source, row.line),
            format!("no elements recognized in formula '{}'", row.formula),
        );
    }

    ProcessResult::Success(RowVerdict {
        row: row.clone(),
        verdict: solver.find_neutral_assignment(&composition),
        unknown_elements: unknown_elements(&composition),
    })
}

/// 汇总判定结果，`total` 含无法判定的行
fn summarize(verdicts: &[RowVerdict], total: usize) -> FilterSummary {
    let mut summary = FilterSummary {
        total,
        ..FilterSummary::default()
    };

    for verdict in verdicts {
        for symbol in &verdict.unknown_elements {
            *summary.unknown_elements.entry(symbol.clone()).or_insert(0) += 1;
        }

        if !verdict.verdict.is_neutral() {
            continue;
        }

        summary.matched += 1;

        let record = NeutralRecord::new(&verdict.row, verdict.verdict.assignment());
        match summary
            .records
            .iter()
            .position(|r| r.filename == record.filename)
        {
            Some(idx) => summary.records[idx] = record,
            None => summary.records.push(record),
        }
    }

    summary
}

/// 匹配率 (%)
fn matching_rate(matched: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(matched as f64 / total as f64 * 100.0)
    }
}

/// 打印匹配率和中性结构表格
fn print_summary(summary: &FilterSummary) {
    output::print_separator();

    if let Some(rate) = matching_rate(summary.matched, summary.total) {
        output::print_info(&format!(
            "Matching rate (neutral only): {:.2}% ({}/{})",
            rate, summary.matched, summary.total
        ));
    }

    if summary.records.is_empty() {
        output::print_warning("No charge-neutral structures found.");
        return;
    }

    let table_rows: Vec<RecordRow> = summary
        .records
        .iter()
        .map(|r| RecordRow {
            filename: r.filename.clone(),
            formula: r.formula.clone(),
            num_atoms: r.num_atoms.clone(),
            space_group: r.space_group.clone(),
            oxidation_states: r.oxidation_states.clone(),
        })
        .collect();

    output::print_header(&format!("{} Charge-Neutral Structures", table_rows.len()));
    println!("{}", Table::new(&table_rows));
}

/// 保存中性记录到 CSV
fn save_records_csv(records: &[NeutralRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| OxcheckError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
