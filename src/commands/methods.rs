//! # methods 子命令实现
//!
//! 列出基准数据中的全部方法及其分解后的程序、基组与赝势，
//! 以及数据文件 `codes` 段给出的费用、源码与主页信息。
//!
//! ## 依赖关系
//! - 使用 `cli/methods.rs` 定义的参数
//! - 使用 `benchmark/`、`parsers/method_id.rs`

use super::load_table;
use crate::benchmark::{metadata, BenchmarkTable};
use crate::cli::methods::MethodsArgs;
use crate::error::{DftPickerError, Result};
use crate::parsers::formula::is_element_symbol;
use crate::parsers::method_id::parse_method_identifier;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct MethodRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Basis Set")]
    basis: String,
    #[tabled(rename = "Pseudopotential")]
    pseudopotential: String,
    #[tabled(rename = "All-Electron")]
    all_electron: String,
    #[tabled(rename = "Elements")]
    coverage: usize,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Homepage")]
    homepage: String,
    #[tabled(rename = "Citation Trend")]
    citation: String,
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

/// 执行 methods 命令
pub fn execute(args: MethodsArgs) -> Result<()> {
    if let Some(ref element) = args.element {
        if !is_element_symbol(element) {
            return Err(DftPickerError::InvalidArgument(format!(
                "'{}' is not an element symbol",
                element
            )));
        }
    }

    let table = load_table(&args.data)?;
    let rows = method_rows(&table, args.element.as_deref(), !args.no_all_electron);

    let title = match args.element {
        Some(ref element) => format!("Methods with data for {}", element),
        None => "Methods in benchmark data".to_string(),
    };
    output::print_header(&title);

    if rows.is_empty() {
        output::print_warning("No methods match the given filters");
        return Ok(());
    }

    let count = rows.len();
    println!("{}", Table::new(rows));
    output::print_info(&format!(
        "{} of {} methods, {} elements",
        count,
        table.method_count(),
        table.element_count()
    ));

    Ok(())
}

fn method_rows(
    table: &BenchmarkTable,
    element: Option<&str>,
    include_all_electron: bool,
) -> Vec<MethodRow> {
    table
        .methods()
        .filter(|method| include_all_electron || !table.is_all_electron(method))
        .filter(|method| element.map_or(true, |el| table.delta(el, method).is_some()))
        .map(|method| {
            let parsed = parse_method_identifier(method);
            let info = table.code_info(&parsed.code);
            MethodRow {
                method: method.to_string(),
                citation: metadata::citation_trend_url(&parsed.code)
                    .unwrap_or("-")
                    .to_string(),
                code: parsed.code,
                basis: parsed.basis.display,
                pseudopotential: if parsed.pseudopotential.is_empty() {
                    "-".to_string()
                } else {
                    parsed.pseudopotential
                },
                all_electron: if table.is_all_electron(method) {
                    "yes".to_string()
                } else {
                    "no".to_string()
                },
                coverage: table.covered_elements(method).len(),
                cost: or_dash(info.and_then(|i| i.cost_label())),
                source: or_dash(info.and_then(|i| i.source_label())),
                homepage: or_dash(info.and_then(|i| i.homepage.clone())),
            }
        })
        .collect()
}
