//! # CIF 格式化学式提取
//!
//! 优先读取 `_chemical_formula_sum`，否则从 `_atom_site_` 循环块重建元素列表。
//!
//! ## CIF 原子位点循环示例
//! ```text
//! loop_
//! _atom_site_label
//! _atom_site_type_symbol
//! _atom_site_fract_x
//! _atom_site_fract_y
//! _atom_site_fract_z
//! Fe1 Fe3+ 0.0 0.0 0.3553
//! O1  O2-  0.3059 0.0 0.25
//! ```
//!
//! 元素列选择顺序: `_atom_site_type_symbol` > `_atom_site_symbol` > `_atom_site_label`
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/formula.rs` 生成化学式

use super::formula::{canonicalize, is_element_symbol};
use crate::error::{DftPickerError, Result};

use regex::Regex;
use std::sync::LazyLock;

static FORMULA_SUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*_chemical_formula_sum\s+(?:'([^'\n]*)'|"([^"\n]*)"|(\S+))"#)
        .expect("valid formula sum regex")
});

static LABEL_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]?)").expect("valid label regex"));

/// 元素来源列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteColumn {
    TypeSymbol(usize),
    Symbol(usize),
    Label(usize),
}

/// 单个 loop_ 块的列头
#[derive(Debug, Default)]
struct LoopHeader {
    type_symbol: Option<usize>,
    symbol: Option<usize>,
    label: Option<usize>,
    columns: usize,
}

impl LoopHeader {
    fn push(&mut self, tag: &str) {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "_atom_site_type_symbol" => self.type_symbol = Some(self.columns),
            "_atom_site_symbol" => self.symbol = Some(self.columns),
            "_atom_site_label" => self.label = Some(self.columns),
            _ => {}
        }
        self.columns += 1;
    }

    fn site_column(&self) -> Option<SiteColumn> {
        self.type_symbol
            .map(SiteColumn::TypeSymbol)
            .or(self.symbol.map(SiteColumn::Symbol))
            .or(self.label.map(SiteColumn::Label))
    }
}

/// 从 CIF 内容提取化学式
pub fn extract_formula(content: &str) -> Result<String> {
    if let Some(sum) = formula_sum(content) {
        return Ok(sum);
    }

    let elements = extract_site_elements(content);
    if elements.is_empty() {
        return Err(DftPickerError::cif(
            "no _chemical_formula_sum field and no usable _atom_site loop found",
        ));
    }

    Ok(canonicalize(&elements))
}

/// 读取 `_chemical_formula_sum`，去除引号与空白；`?` 和 `.` 视为缺失
///
/// 值可以写在下一行。未加引号的值若是下一个标签、`loop_` 或文本块，
/// 说明该字段没有值。
fn formula_sum(content: &str) -> Option<String> {
    let caps = FORMULA_SUM.captures(content)?;
    let value = match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(quoted), _, _) | (None, Some(quoted), _) => quoted.as_str(),
        (None, None, Some(bare)) if !is_reserved_token(bare.as_str()) => bare.as_str(),
        _ => return None,
    };

    let compact: String = value.split_whitespace().collect();
    match compact.as_str() {
        "" | "?" | "." => None,
        _ => Some(compact),
    }
}

/// 不能作为未加引号的值出现的记号
fn is_reserved_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    token.starts_with('_')
        || token.starts_with(';')
        || token.starts_with('#')
        || ["loop_", "data_", "save_", "global_", "stop_"]
            .iter()
            .any(|keyword| lower.starts_with(keyword))
}

/// 从所有 `_atom_site_` 循环块收集逐原子元素列表
fn extract_site_elements(content: &str) -> Vec<String> {
    let mut elements = Vec::new();

    let mut header: Option<LoopHeader> = None;
    let mut in_data = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("loop_") {
            header = Some(LoopHeader::default());
            in_data = false;
            continue;
        }
        if lower.starts_with("data_") {
            header = None;
            in_data = false;
            continue;
        }

        if line.starts_with('_') {
            match header.as_mut() {
                // 数据行之后出现的标签结束当前循环
                Some(h) if !in_data => {
                    if let Some(tag) = line.split_whitespace().next() {
                        h.push(tag);
                    }
                }
                _ => header = None,
            }
            continue;
        }

        let Some(column) = header.as_ref().and_then(LoopHeader::site_column) else {
            continue;
        };
        in_data = true;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if let Some(element) = element_from_row(&fields, column) {
            elements.push(element);
        }
    }

    elements
}

fn element_from_row(fields: &[&str], column: SiteColumn) -> Option<String> {
    let raw = match column {
        SiteColumn::TypeSymbol(i) | SiteColumn::Symbol(i) => fields.get(i)?.to_string(),
        SiteColumn::Label(i) => {
            let label = fields.get(i)?;
            LABEL_ELEMENT.captures(label)?.get(1)?.as_str().to_string()
        }
    };

    let element: String = raw.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    is_element_symbol(&element).then_some(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_sum_quoted() {
        let content = r#"
data_test
_chemical_formula_sum 'C108 H48 B12 O24'
_chemical_formula_weight 1234.5
"#;
        assert_eq!(extract_formula(content).unwrap(), "C108H48B12O24");
    }

    #[test]
    fn test_formula_sum_unquoted_and_double_quoted() {
        assert_eq!(
            extract_formula("_chemical_formula_sum Fe2O3\n_cell_length_a 5.0\n").unwrap(),
            "Fe2O3"
        );
        assert_eq!(
            extract_formula("_chemical_formula_sum \"Na Cl\"\n").unwrap(),
            "NaCl"
        );
    }

    #[test]
    fn test_formula_sum_on_next_line() {
        let content = r#"
data_hematite
_chemical_formula_sum
'Fe2 O3'
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Fe1 Fe 0.0 0.0 0.3553
O1 O 0.3059 0.0 0.25
"#;
        assert_eq!(extract_formula(content).unwrap(), "Fe2O3");
        assert_eq!(
            extract_formula("_chemical_formula_sum\n  \"Si O2\"\n").unwrap(),
            "SiO2"
        );
    }

    #[test]
    fn test_formula_sum_without_value_falls_back_to_sites() {
        let content = r#"
_chemical_formula_sum
_chemical_formula_weight 159.69
loop_
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Fe 0.0 0.0 0.0
O 0.5 0.0 0.0
"#;
        assert_eq!(extract_formula(content).unwrap(), "FeO");

        let content = "_chemical_formula_sum\nloop_\n_atom_site_label\nNa1\nCl1\n";
        assert_eq!(extract_formula(content).unwrap(), "ClNa");
    }

    #[test]
    fn test_atom_site_type_symbol_preferred() {
        let content = r#"
data_Fe2O3
_cell_length_a 5.035
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Xx1 Fe3+ 0.0 0.0 0.3553
Xx2 Fe3+ 0.0 0.0 0.6447
Yy1 O2- 0.3059 0.0 0.25
Yy2 O2- 0.0 0.3059 0.25
Yy3 O2- 0.6941 0.6941 0.25
"#;
        assert_eq!(extract_formula(content).unwrap(), "Fe2O3");
    }

    #[test]
    fn test_atom_site_label_fallback() {
        let content = r#"
data_NaCl
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Na1 0.0 0.0 0.0
Cl1 0.5 0.5 0.5
"#;
        assert_eq!(extract_formula(content).unwrap(), "ClNa");
    }

    #[test]
    fn test_atom_site_symbol_fallback() {
        // 没有 type_symbol 时使用 _atom_site_symbol
        let content = r#"
loop_
_atom_site_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Ti 0.0 0.0 0.0
O 0.5 0.0 0.0
O 0.0 0.5 0.0
"#;
        assert_eq!(extract_formula(content).unwrap(), "O2Ti");

        // _atom_site_symbol 优先于 _atom_site_label
        let content = r#"
loop_
_atom_site_label
_atom_site_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Xx1 Zn 0.0 0.0 0.0
Yy1 S 0.25 0.25 0.25
"#;
        assert_eq!(extract_formula(content).unwrap(), "SZn");
    }

    #[test]
    fn test_placeholder_formula_sum_falls_back_to_sites() {
        let content = r#"
_chemical_formula_sum ?
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
C1 0.0 0.0 0.0
H1 0.1 0.0 0.0
H2 0.0 0.1 0.0
"#;
        assert_eq!(extract_formula(content).unwrap(), "CH2");
    }

    #[test]
    fn test_aniso_loop_not_counted() {
        let content = r#"
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
W1 W 0.0 0.0 0.0
O1 O 0.5 0.0 0.0
loop_
_atom_site_aniso_label
_atom_site_aniso_U_11
W1 0.01
O1 0.02
"#;
        assert_eq!(extract_formula(content).unwrap(), "OW");
    }

    #[test]
    fn test_loop_ends_at_next_tag() {
        let content = r#"
loop_
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si 0.0 0.0 0.0
Si 0.25 0.25 0.25
_cell_volume 160.1
"#;
        assert_eq!(extract_formula(content).unwrap(), "Si2");
    }

    #[test]
    fn test_invalid_cif() {
        let err = extract_formula("invalid content").unwrap_err();
        assert!(matches!(err, DftPickerError::StructureParse { .. }));
        assert!(err.to_string().contains("CIF"));
    }
}
