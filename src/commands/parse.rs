//! # parse 子命令实现
//!
//! 显示化学式或结构文件的元素组成。
//!
//! ## 依赖关系
//! - 使用 `cli/parse.rs` 定义的参数
//! - 使用 `parsers/formula.rs`

use super::resolve_input;
use crate::cli::parse::ParseArgs;
use crate::error::Result;
use crate::parsers::formula::{format_amount, hill_formula, parse_composition};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct CompositionRow {
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Atoms")]
    count: String,
    #[tabled(rename = "Fraction")]
    fraction: String,
}

/// 执行 parse 命令
pub fn execute(args: ParseArgs) -> Result<()> {
    let submission = resolve_input(&args.input)?;
    let composition = parse_composition(&submission.formula);

    output::print_header(&format!("Composition of {}", submission.source));
    println!("{}", Table::new(composition_rows(&composition)));

    output::print_info(&format!("Hill formula: {}", hill_formula(&composition)));
    output::print_info(&format!("Elements: {}", submission.elements.join(", ")));
    output::print_info(&format!("Total atoms: {}", total_amount(&composition)));

    Ok(())
}

fn total_amount(composition: &[(String, f64)]) -> f64 {
    composition.iter().map(|(_, amount)| amount).sum()
}

fn composition_rows(composition: &[(String, f64)]) -> Vec<CompositionRow> {
    let total = total_amount(composition);

    composition
        .iter()
        .map(|(element, amount)| CompositionRow {
            element: element.clone(),
            count: match format_amount(*amount) {
                text if text.is_empty() => "1".to_string(),
                text => text,
            },
            fraction: format!("{:.3}", amount / total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_rows() {
        let rows = composition_rows(&parse_composition("Fe2O3"));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].element, "Fe");
        assert_eq!(rows[0].count, "2");
        assert_eq!(rows[0].fraction, "0.400");
        assert_eq!(rows[1].fraction, "0.600");
    }

    #[test]
    fn test_composition_keeps_first_appearance_order() {
        let rows = composition_rows(&parse_composition("OW3O2"));
        let elements: Vec<&str> = rows.iter().map(|r| r.element.as_str()).collect();
        assert_eq!(elements, vec!["O", "W"]);
        assert_eq!(rows[0].count, "3");
    }

    #[test]
    fn test_composition_with_partial_occupancy() {
        let composition = parse_composition("Ca0.5Sr0.5TiO3");
        let rows = composition_rows(&composition);

        assert_eq!(rows[0].count, "0.5");
        assert_eq!(rows[2].count, "1");
        assert_eq!(rows[3].fraction, "0.600");
        assert!((total_amount(&composition) - 5.0).abs() < 1e-12);
    }
}
