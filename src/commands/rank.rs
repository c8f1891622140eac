//! # rank 子命令实现
//!
//! 为化学式或结构文件按平均 Δ 排序 DFT 方法。
//!
//! ## 功能
//! - 按精度等级分组输出终端表格
//! - 可选显示部分覆盖的方法
//! - CSV / JSON 输出
//! - 可选绘制平均 Δ 柱状图
//!
//! ## 依赖关系
//! - 使用 `cli/rank.rs` 定义的参数
//! - 使用 `benchmark/`、`parsers/method_id.rs`
//! - 使用 `utils/output.rs`

use super::{format_delta, load_table, resolve_input};
use crate::benchmark::{metadata, RankingEngine};
use crate::cli::rank::RankArgs;
use crate::error::{DftPickerError, Result};
use crate::models::{AccuracyClass, RankedMethod, Ranking};
use crate::parsers::method_id::parse_method_identifier;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 完整覆盖的排序行
#[derive(Debug, Clone, Tabled)]
struct RankRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Basis Set")]
    basis: String,
    #[tabled(rename = "Pseudopotential")]
    pseudopotential: String,
    #[tabled(rename = "Average Δ (meV/atom)")]
    average: String,
    #[tabled(rename = "Δ per Element")]
    deltas: String,
    #[tabled(rename = "Citation Trend")]
    citation: String,
}

/// 部分覆盖的方法行
#[derive(Debug, Clone, Tabled)]
struct IncompleteRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Basis Set")]
    basis: String,
    #[tabled(rename = "Pseudopotential")]
    pseudopotential: String,
    #[tabled(rename = "Coverage")]
    coverage: String,
    #[tabled(rename = "Δ per Element")]
    deltas: String,
}

/// 执行 rank 命令
pub fn execute(args: RankArgs) -> Result<()> {
    let submission = resolve_input(&args.input)?;
    let table = load_table(&args.data)?;

    let ranking = RankingEngine::new(&table).rank(&submission.elements, args.all_electron);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        output::print_info(&format!(
            "Formula '{}' -> elements: {}",
            submission.formula,
            submission.elements.join(", ")
        ));
        output::print_info(&format!(
            "Benchmark data: {} elements, {} methods ({})",
            table.element_count(),
            table.method_count(),
            args.data.data.display()
        ));
        print_ranking(&ranking, args.top, args.show_incomplete);
    }

    if let Some(ref path) = args.output_csv {
        save_ranking_csv(&ranking, path)?;
        if !args.json {
            output::print_success(&format!("Full ranking saved to '{}'", path.display()));
        }
    }

    if let Some(ref path) = args.plot {
        if ranking.complete.is_empty() {
            output::print_warning("Nothing to plot: no code covers every element");
        } else {
            generate_plot(&ranking, args.top, path)?;
            if !args.json {
                output::print_success(&format!("Ranking plot saved to '{}'", path.display()));
            }
        }
    }

    Ok(())
}

/// 逐元素 Δ 的紧凑写法，例如 `Fe: 0.50, O: N/A`
fn format_deltas(method: &RankedMethod) -> String {
    method
        .deltas
        .iter()
        .map(|d| format!("{}: {}", d.element, format_delta(d.delta)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn rank_row(rank: usize, method: &RankedMethod) -> RankRow {
    let parsed = parse_method_identifier(&method.method);
    RankRow {
        rank,
        citation: metadata::citation_trend_url(&parsed.code)
            .unwrap_or("-")
            .to_string(),
        code: parsed.code,
        basis: parsed.basis.display,
        pseudopotential: parsed.pseudopotential,
        average: format_delta(method.average),
        deltas: format_deltas(method),
    }
}

fn incomplete_row(method: &RankedMethod) -> IncompleteRow {
    let parsed = parse_method_identifier(&method.method);
    IncompleteRow {
        code: parsed.code,
        basis: parsed.basis.display,
        pseudopotential: parsed.pseudopotential,
        coverage: format!("{}/{}", method.covered(), method.deltas.len()),
        deltas: format_deltas(method),
    }
}

/// 打印分级排序表
fn print_ranking(ranking: &Ranking, top: Option<usize>, show_incomplete: bool) {
    let elements = ranking.elements.join(", ");

    if ranking.complete.is_empty() {
        output::print_header(&format!("No matching DFT codes for {}", elements));
        output::print_warning(
            "No DFT codes have delta values for all elements in your formula.",
        );
        if !ranking.include_all_electron {
            output::print_info("Try a formula with more common elements, or pass --all-electron");
        }
    } else {
        output::print_header(&format!("DFT Code Rankings for {}", elements));

        let limit = top.unwrap_or(usize::MAX);
        let mut rank = 0;

        // 等级按平均 Δ 单调，逐级编号即为全局排名
        for (class, members) in ranking.categories() {
            if rank >= limit {
                break;
            }
            let rows: Vec<RankRow> = members
                .into_iter()
                .take(limit - rank)
                .map(|m| {
                    rank += 1;
                    rank_row(rank, m)
                })
                .collect();

            output::print_class_heading(class, rows.len());
            println!("{}", Table::new(&rows));
        }

        if rank < ranking.complete.len() {
            output::print_info(&format!(
                "Showing top {} of {} codes",
                rank,
                ranking.complete.len()
            ));
        }
    }

    if ranking.incomplete.is_empty() {
        return;
    }

    if show_incomplete {
        output::print_header("Codes with missing data for some elements");
        let rows: Vec<IncompleteRow> = ranking.incomplete.iter().map(incomplete_row).collect();
        println!("{}", Table::new(&rows));
    } else {
        output::print_info(&format!(
            "{} codes with missing data for some elements hidden (use --show-incomplete)",
            ranking.incomplete.len()
        ));
    }
}

/// 保存完整排序到 CSV（不完整方法附在末尾，排名与平均值留空）
fn save_ranking_csv(ranking: &Ranking, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec![
        "rank".to_string(),
        "method".to_string(),
        "code".to_string(),
        "basis".to_string(),
        "pseudopotential".to_string(),
        "average_delta_meV_per_atom".to_string(),
        "category".to_string(),
    ];
    header.extend(ranking.elements.iter().map(|el| format!("delta_{}", el)));
    wtr.write_record(&header)?;

    let complete = ranking.complete.iter().enumerate().map(|(i, m)| (Some(i + 1), m));
    let incomplete = ranking.incomplete.iter().map(|m| (None, m));

    for (rank, method) in complete.chain(incomplete) {
        let parsed = parse_method_identifier(&method.method);
        let mut record = vec![
            rank.map(|r| r.to_string()).unwrap_or_default(),
            method.method.clone(),
            parsed.code,
            parsed.basis.display,
            parsed.pseudopotential,
            method
                .average
                .map(|a| format!("{:.6}", a))
                .unwrap_or_default(),
            method
                .class
                .map(|c| c.to_string().to_lowercase())
                .unwrap_or_else(|| "incomplete".to_string()),
        ];
        record.extend(
            method
                .deltas
                .iter()
                .map(|d| d.delta.map(|v| format!("{:.6}", v)).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| DftPickerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 精度等级配色
fn class_color(class: AccuracyClass) -> plotters::style::RGBColor {
    use plotters::style::RGBColor;
    match class {
        AccuracyClass::Excellent => RGBColor(46, 160, 67),
        AccuracyClass::Good => RGBColor(31, 136, 199),
        AccuracyClass::Fair => RGBColor(230, 162, 25),
        AccuracyClass::Poor => RGBColor(208, 52, 44),
    }
}

/// 绘制平均 Δ 柱状图
fn generate_plot(ranking: &Ranking, top: Option<usize>, output_path: &Path) -> Result<()> {
    use plotters::prelude::*;

    let limit = top.unwrap_or(usize::MAX);
    let bars: Vec<(usize, f64, AccuracyClass)> = ranking
        .complete
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, m)| Some((i + 1, m.average?, m.class?)))
        .collect();

    if bars.is_empty() {
        return Err(DftPickerError::Other("No data to plot".to_string()));
    }

    let y_max = bars.iter().map(|(_, y, _)| *y).fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(output_path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DftPickerError::Other(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Δ for {}", ranking.elements.join(", ")),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..(bars.len() as f64 + 0.5), 0.0..y_max)
        .map_err(|e| DftPickerError::Other(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Rank")
        .y_desc("Average Δ (meV/atom)")
        .draw()
        .map_err(|e| DftPickerError::Other(e.to_string()))?;

    for class in AccuracyClass::ALL {
        let color = class_color(class);
        let members: Vec<&(usize, f64, AccuracyClass)> =
            bars.iter().filter(|(_, _, c)| *c == class).collect();
        if members.is_empty() {
            continue;
        }

        chart
            .draw_series(members.iter().map(|(x, y, _)| {
                let x = *x as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *y)], color.filled())
            }))
            .map_err(|e| DftPickerError::Other(e.to_string()))?
            .label(format!("{} ({})", class, class.range_label()))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| DftPickerError::Other(e.to_string()))?;

    root.present()
        .map_err(|e| DftPickerError::Other(e.to_string()))?;

    Ok(())
}
