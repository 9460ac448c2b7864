//! # 结构汇总表解析器
//!
//! 读取结构搜索汇总表（默认单空格分隔、无表头、每行一个结构），
//! 按列索引提取文件名、化学式、原子数和空间群。
//!
//! ## 默认列布局 (从 0 开始)
//! ```text
//! 列 1   结构文件名
//! 列 4   化学式
//! 列 7   原子数
//! 列 10  空间群
//! ```
//! 列数不足的行和空行直接跳过，不计入总数。
//!
//! ## 依赖关系
//! - 被 `commands/filter.rs` 使用
//! - 生成 `models/record.rs` 中的 `TableRow`
//! - 使用 `csv` crate

use crate::error::{OxcheckError, Result};
use crate::models::TableRow;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 表格列布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// 字段分隔符
    pub delimiter: u8,
    pub name_col: usize,
    pub formula_col: usize,
    pub atoms_col: usize,
    pub spacegroup_col: usize,
    /// 少于该列数的行被跳过
    pub min_columns: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            delimiter: b' ',
            name_col: 1,
            formula_col: 4,
            atoms_col: 7,
            spacegroup_col: 10,
            min_columns: 11,
        }
    }
}

impl TableLayout {
    /// 检查每个列索引都落在 `min_columns` 以内
    pub fn validate(&self) -> Result<()> {
        let max_col = [
            self.name_col,
            self.formula_col,
            self.atoms_col,
            self.spacegroup_col,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        if max_col >= self.min_columns {
            return Err(OxcheckError::InvalidArgument(format!(
                "column index {} is outside the minimum row width {}",
                max_col, self.min_columns
            )));
        }
        Ok(())
    }
}

/// 解析分隔符参数：单个 ASCII 字符，或 `space` / `tab` / `\t`
pub fn parse_delimiter(input: &str) -> std::result::Result<u8, String> {
    match input {
        "space" | " " => Ok(b' '),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter '{}'. Use a single ASCII character, 'space', 'tab' or 'comma'",
            input
        )),
    }
}

/// 读取表格文件
pub fn read_table_file(path: &Path, layout: &TableLayout) -> Result<Vec<TableRow>> {
    let file = File::open(path).map_err(|e| OxcheckError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    read_table(file, &path.display().to_string(), layout)
}

/// 从任意输入读取表格
pub fn read_table<R: Read>(reader: R, source: &str, layout: &TableLayout) -> Result<Vec<TableRow>> {
    layout.validate()?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(layout.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record?;

        if record.len() < layout.min_columns {
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        rows.push(TableRow {
            source: source.to_string(),
            line,
            filename: field(layout.name_col),
            formula: field(layout.formula_col),
            num_atoms: field(layout.atoms_col),
            space_group: field(layout.spacegroup_col),
        });
    }

    Ok(rows)
}
