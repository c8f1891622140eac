//! # 化学式解析器
//!
//! 将化学式字符串解析为元素 → 原子数映射，以及反向生成 Hill 顺序的化学式。
//!
//! ## 语法
//! ```text
//! formula := (symbol count?)*
//! symbol  := [A-Z][a-z]*
//! count   := [0-9]+          (省略时为 1)
//! ```
//!
//! 括号只作为允许的输入字符，不表示分组乘数：`(NH4)2SO4` 中 `)` 后的 `2`
//! 会被忽略。
//!
//! 结构文件给出的化学式（CIF 的 `_chemical_formula_sum`）可能带小数占位，
//! 如 `Ca0.5Sr0.5TiO3`，由 `parse_composition` 按实数计数解析。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs`、`parsers/cif.rs` 和 `commands/` 使用
//! - 使用 `models/formula.rs`

use crate::error::{DftPickerError, Result};
use crate::models::ParsedFormula;

use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ELEMENT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]*)(\d*)").expect("valid element token regex"));

static AMOUNT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]*)(\d+(?:\.\d+)?|\.\d+)?").expect("valid amount token regex")
});

static ALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9()]*$").expect("valid formula charset regex"));

/// 元素符号是否形如 `[A-Z][a-z]?`
pub fn is_element_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), None, _) => a.is_ascii_uppercase(),
        (Some(a), Some(b), None) => a.is_ascii_uppercase() && b.is_ascii_lowercase(),
        _ => false,
    }
}

/// 解析化学式
///
/// 空串或无法识别的输入返回空映射，由调用方决定是否视为错误。
pub fn parse_formula(formula: &str) -> ParsedFormula {
    let mut parsed = ParsedFormula::new();

    for caps in ELEMENT_TOKEN.captures_iter(formula) {
        let symbol = &caps[1];
        let digits = &caps[2];
        let count = if digits.is_empty() {
            1
        } else {
            // 超出范围的计数按饱和处理
            digits.parse::<u64>().unwrap_or(u64::MAX)
        };
        parsed.add(symbol, count);
    }

    parsed
}

/// 解析并校验用户输入的化学式，返回去重后的元素列表
pub fn elements_from_formula(formula: &str) -> Result<Vec<String>> {
    let invalid = |reason: &str| DftPickerError::InvalidFormula {
        formula: formula.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = formula.trim();
    if trimmed.is_empty() {
        return Err(invalid("please enter a chemical formula"));
    }
    if !ALLOWED_CHARS.is_match(trimmed) {
        return Err(invalid(
            "only A-Z, a-z, 0-9 and parentheses are allowed",
        ));
    }

    let parsed = parse_formula(trimmed);
    if parsed.is_empty() {
        return Err(invalid("no valid elements found"));
    }

    if let Some((symbol, _)) = parsed.iter().find(|(el, _)| !is_element_symbol(el)) {
        return Err(invalid(&format!("'{}' is not an element symbol", symbol)));
    }

    Ok(parsed.element_set())
}

/// Hill 顺序：C 在前，H 其次（若比较对象不是 C），其余按字典序
fn hill_order(a: &str, b: &str) -> Ordering {
    match (a, b) {
        _ if a == b => Ordering::Equal,
        ("C", _) => Ordering::Less,
        (_, "C") => Ordering::Greater,
        ("H", _) => Ordering::Less,
        (_, "H") => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// 按 Hill 顺序拼接 (元素, 计数文本)，计数文本为空时只写元素
fn format_hill<'a>(counts: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut ordered: Vec<(&str, String)> = counts.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| hill_order(a, b));

    ordered
        .into_iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join("")
}

/// 由逐原子的元素列表生成 Hill 顺序化学式
pub fn canonicalize<S: AsRef<str>>(elements: &[S]) -> String {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for element in elements {
        *counts.entry(element.as_ref()).or_insert(0) += 1;
    }

    format_hill(counts.into_iter().map(|(el, n)| {
        let count = if n == 1 { String::new() } else { n.to_string() };
        (el, count)
    }))
}

/// 解析允许小数计数的化学式，返回 (元素, 数量)，按首次出现顺序
///
/// 数量为 0 的记号被忽略；括号同样不表示分组。
pub fn parse_composition(formula: &str) -> Vec<(String, f64)> {
    let mut amounts: Vec<(String, f64)> = Vec::new();

    for caps in AMOUNT_TOKEN.captures_iter(formula) {
        let symbol = &caps[1];
        let amount = match caps.get(2) {
            Some(m) => m.as_str().parse::<f64>().unwrap_or(0.0),
            None => 1.0,
        };
        if amount <= 0.0 {
            continue;
        }

        match amounts.iter_mut().find(|(el, _)| el == symbol) {
            Some((_, total)) => *total += amount,
            None => amounts.push((symbol.to_string(), amount)),
        }
    }

    amounts
}

/// 数量的显示写法：1 省略，整数不带小数点
pub fn format_amount(amount: f64) -> String {
    if amount == 1.0 {
        String::new()
    } else {
        format!("{}", amount)
    }
}

/// 结构文件化学式的元素集合
///
/// 不做键盘输入的字符集校验；符号必须形如 `[A-Z][a-z]?`。
pub fn composition_elements(formula: &str) -> Result<Vec<String>> {
    let composition = parse_composition(formula);

    if let Some((symbol, _)) = composition.iter().find(|(el, _)| !is_element_symbol(el)) {
        return Err(DftPickerError::InvalidFormula {
            formula: formula.to_string(),
            reason: format!("'{}' is not an element symbol", symbol),
        });
    }

    Ok(composition.into_iter().map(|(el, _)| el).collect())
}

/// 组成的 Hill 顺序写法
pub fn hill_formula(composition: &[(String, f64)]) -> String {
    format_hill(
        composition
            .iter()
            .map(|(el, amount)| (el.as_str(), format_amount(*amount))),
    )
}
