//! # 解析器模块
//!
//! 提供化学式语法、结构文件化学式提取和方法键解析。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: formula, xyz, cif, method_id

pub mod cif;
pub mod formula;
pub mod method_id;
pub mod xyz;

use crate::error::{DftPickerError, Result, StructureFormat};
use std::fs;
use std::path::Path;

/// 由文件名后缀（不区分大小写）判断结构格式
pub fn structure_format(file_name: &str) -> Option<StructureFormat> {
    let lower = file_name.to_lowercase();

    if lower.ends_with(".xyz") {
        Some(StructureFormat::Xyz)
    } else if lower.ends_with(".cif") {
        Some(StructureFormat::Cif)
    } else {
        None
    }
}

/// 按文件名后缀分派，从结构文件内容中提取化学式
pub fn extract_formula_from_file(content: &str, file_name: &str) -> Result<String> {
    match structure_format(file_name) {
        Some(StructureFormat::Xyz) => xyz::extract_formula(content),
        Some(StructureFormat::Cif) => cif::extract_formula(content),
        None => Err(DftPickerError::UnsupportedFormat(file_name.to_string())),
    }
}

/// 读取结构文件文本
pub fn read_structure_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DftPickerError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| DftPickerError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 读取并提取结构文件的化学式
pub fn formula_from_path(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if structure_format(file_name).is_none() {
        return Err(DftPickerError::UnsupportedFormat(path.display().to_string()));
    }

    let content = read_structure_file(path)?;
    extract_formula_from_file(&content, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_extension() {
        let xyz = "3\ncomment\nO 0 0 0\nW 0 0 1\nO 0 0 2\n";
        assert_eq!(extract_formula_from_file(xyz, "WO3.xyz").unwrap(), "O2W");
        assert_eq!(extract_formula_from_file(xyz, "WO3.XYZ").unwrap(), "O2W");

        let cif = "_chemical_formula_sum 'Fe2 O3'\n";
        assert_eq!(extract_formula_from_file(cif, "hematite.Cif").unwrap(), "Fe2O3");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract_formula_from_file("content", "file.txt").unwrap_err();
        assert!(matches!(err, DftPickerError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_malformed_files_name_their_format() {
        let err = extract_formula_from_file("invalid content", "file.xyz").unwrap_err();
        assert!(err.to_string().contains("Failed to parse XYZ file"));

        let err = extract_formula_from_file("invalid content", "file.cif").unwrap_err();
        assert!(err.to_string().contains("Failed to parse CIF file"));
    }

    #[test]
    fn test_formula_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("dftpicker_test_{}.xyz", std::process::id()));
        fs::write(&path, "2\n\nNa 0 0 0\nCl 2.8 0 0\n").unwrap();

        let formula = formula_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(formula, "ClNa");
    }

    #[test]
    fn test_formula_from_path_missing_file() {
        let err = formula_from_path(Path::new("/nonexistent/dftpicker/structure.cif")).unwrap_err();
        assert!(matches!(err, DftPickerError::FileNotFound { .. }));
    }

    #[test]
    fn test_formula_from_path_unsupported() {
        let err = formula_from_path(Path::new("POSCAR")).unwrap_err();
        assert!(matches!(err, DftPickerError::UnsupportedFormat(_)));
    }
}
