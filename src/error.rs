//! # 统一错误处理模块
//!
//! 定义 dftpicker 的所有错误类型，使用 `thiserror` 派生。
//!
//! 缺失的基准数据（元素或方法不在表中）不是错误，由排序结果中的空值表示。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 结构文件格式，用于区分解析错误的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Xyz,
    Cif,
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureFormat::Xyz => write!(f, "XYZ"),
            StructureFormat::Cif => write!(f, "CIF"),
        }
    }
}

/// dftpicker 统一错误类型
#[derive(Error, Debug)]
pub enum DftPickerError {
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
    // 输入校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },

    #[error("Unsupported file format: {0}. Please use an XYZ or CIF file")]
    UnsupportedFormat(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 结构解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {reason}")]
    StructureParse {
        format: StructureFormat,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 基准数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid benchmark data in {path}")]
    BenchmarkData {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl DftPickerError {
    pub(crate) fn xyz(reason: impl Into<String>) -> Self {
        DftPickerError::StructureParse {
            format: StructureFormat::Xyz,
            reason: reason.into(),
        }
    }

    pub(crate) fn cif(reason: impl Into<String>) -> Self {
        DftPickerError::StructureParse {
            format: StructureFormat::Cif,
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DftPickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_parse_message_names_format() {
        let err = DftPickerError::xyz("invalid atom count");
        assert_eq!(err.to_string(), "Failed to parse XYZ file: invalid atom count");

        let err = DftPickerError::cif("no atom sites");
        assert!(err.to_string().starts_with("Failed to parse CIF file"));
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = DftPickerError::UnsupportedFormat("structure.pdb".to_string());
        assert!(err.to_string().contains("Unsupported file format"));
    }
}
