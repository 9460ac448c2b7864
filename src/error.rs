//! # 统一错误处理模块
//!
//! 定义 oxcheck 的所有错误类型，使用 `thiserror` 派生。
//!
//! 求解器本身不产生错误：未知元素和化学式中被丢弃的字符都只是提示。
//! 这里的错误只属于命令层（文件、表格、参数）。
//!
//! ## 依赖关系
//! - 被 `commands/`, `parsers/table.rs`, `batch/` 使用
//! - 无外部模块依赖

use thiserror::Error;

/// oxcheck 统一错误类型
#[derive(Error, Debug)]
pub enum OxcheckError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 化学式错误（仅 --strict 模式）
    // ─────────────────────────────────────────────────────────────
    #[error("Formula '{formula}' rejected: {reason}")]
    FormulaRejected { formula: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, OxcheckError>;
