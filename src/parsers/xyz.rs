//! # XYZ 格式元素提取
//!
//! ## XYZ 格式说明
//! ```text
//! <原子数>
//! <注释行>
//! Element x y z
//! ...
//! ```
//!
//! 只读取元素符号，坐标不做校验。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/formula.rs` 生成化学式

use super::formula::canonicalize;
use crate::error::{DftPickerError, Result};

/// 从 XYZ 内容中提取逐原子的元素列表
///
/// 收集到声明的原子数后停止；文件提前结束时返回已收集的部分。
pub fn extract_elements(content: &str) -> Result<Vec<String>> {
    let mut lines = content.trim().lines();

    let num_atoms = lines
        .next()
        .and_then(|line| line.split_whitespace().next())
        .and_then(|token| token.parse::<i64>().ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            DftPickerError::xyz("invalid atom count (first line must be a positive integer)")
        })? as usize;

    // 第二行为注释
    let _ = lines.next();

    // 原子数来自文件本身，不能用来预分配
    let mut elements = Vec::new();
    for line in lines {
        if elements.len() >= num_atoms {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 4 {
            elements.push(parts[0].to_string());
        }
    }

    Ok(elements)
}

/// 从 XYZ 内容生成 Hill 顺序化学式
pub fn extract_formula(content: &str) -> Result<String> {
    let elements = extract_elements(content)?;
    Ok(canonicalize(&elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_formula_tungsten_oxide() {
        let content = "3\ncomment\nO 0 0 0\nW 0 0 1\nO 0 0 2\n";
        assert_eq!(extract_formula(content).unwrap(), "O2W");
    }

    #[test]
    fn test_extract_skips_blank_and_short_lines() {
        let content = "4\nwater dimer\n\nO 0.0 0.0 0.0\nH 0.0 0.7\nH 0.0 0.76 0.59\n\nH 0.0 -0.76 0.59\nO 3.0 0.0 0.0\n";
        let elements = extract_elements(content).unwrap();
        assert_eq!(elements, vec!["O", "H", "H", "O"]);
        assert_eq!(extract_formula(content).unwrap(), "H2O2");
    }

    #[test]
    fn test_extract_stops_at_declared_count() {
        let content = "2\n\nC 0 0 0\nH 0 0 1\nH 0 0 2\nH 0 0 3\n";
        assert_eq!(extract_elements(content).unwrap(), vec!["C", "H"]);
    }

    #[test]
    fn test_short_file_is_not_an_error() {
        let content = "5\nshort\nSi 0 0 0\nSi 1.35 1.35 1.35\n";
        assert_eq!(extract_formula(content).unwrap(), "Si2");
    }

    #[test]
    fn test_huge_declared_count_returns_collected_atoms() {
        let content = format!("{}\ncomment\nO 0 0 0\n", i64::MAX);
        assert_eq!(extract_elements(&content).unwrap(), vec!["O"]);
        assert_eq!(extract_formula(&content).unwrap(), "O");
    }

    #[test]
    fn test_windows_line_endings() {
        let content = "2\r\ncomment\r\nNa 0 0 0\r\nCl 2.8 0 0\r\n";
        assert_eq!(extract_formula(content).unwrap(), "ClNa");
    }

    #[test]
    fn test_invalid_atom_count() {
        for content in ["invalid content", "0\ncomment\nO 0 0 0", "-3\n\nO 0 0 0", ""] {
            let err = extract_elements(content).unwrap_err();
            assert!(
                matches!(err, DftPickerError::StructureParse { .. }),
                "{:?}",
                content
            );
            assert!(err.to_string().contains("XYZ"));
        }
    }
}
