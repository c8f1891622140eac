//! # batch 子命令实现
//!
//! 收集目录中的 XYZ / CIF 文件，逐个提取化学式并排序，
//! 汇总每个结构的最佳方法。
//!
//! ## 功能
//! - glob 模式与递归搜索
//! - 并行处理（rayon），单个文件失败不影响其他文件
//! - 汇总表与 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/` 收集与并行执行
//! - 使用 `benchmark/ranking.rs`

use super::{format_delta, load_table, Submission};
use crate::batch::{BatchResult, BatchRunner, FileCollector};
use crate::benchmark::RankingEngine;
use crate::cli::batch::BatchArgs;
use crate::error::{DftPickerError, Result};
use crate::models::AccuracyClass;
use crate::parsers::method_id::parse_method_identifier;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 单个结构文件的排序摘要
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSummary {
    pub file: String,
    pub formula: String,
    pub elements: Vec<String>,
    /// 平均 Δ 最低的方法键
    pub best_method: Option<String>,
    pub best_average: Option<f64>,
    pub complete: usize,
    pub incomplete: usize,
}

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Best Code")]
    code: String,
    #[tabled(rename = "Pseudopotential")]
    pseudopotential: String,
    #[tabled(rename = "Average Δ")]
    average: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Complete")]
    complete: usize,
    #[tabled(rename = "Incomplete")]
    incomplete: usize,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(DftPickerError::NoFilesFound {
            pattern: format!("{} in {}", args.pattern, args.input.display()),
        });
    }

    let table = load_table(&args.data)?;
    let engine = RankingEngine::new(&table);
    let runner = BatchRunner::new(args.jobs);

    output::print_info(&format!(
        "Found {} structure files, using {} threads",
        files.len(),
        runner.jobs()
    ));

    let result = runner.run(&files, |path| {
        summarize_structure(&engine, path, args.all_electron)
    })?;

    print_summary(&result);

    if let Some(ref path) = args.output_csv {
        save_summary_csv(&result.outputs, path)?;
        output::print_success(&format!("Summary saved to '{}'", path.display()));
    }

    Ok(())
}

/// 提取单个文件的化学式并排序
pub fn summarize_structure(
    engine: &RankingEngine<'_>,
    path: &Path,
    include_all_electron: bool,
) -> Result<StructureSummary> {
    let submission = Submission::from_file(path)?;
    let ranking = engine.rank(&submission.elements, include_all_electron);
    let best = ranking.best();

    Ok(StructureSummary {
        file: submission.source,
        formula: submission.formula,
        best_method: best.map(|m| m.method.clone()),
        best_average: best.and_then(|m| m.average),
        elements: submission.elements,
        complete: ranking.complete.len(),
        incomplete: ranking.incomplete.len(),
    })
}

fn summary_row(summary: &StructureSummary) -> SummaryRow {
    let parsed = summary
        .best_method
        .as_deref()
        .map(parse_method_identifier)
        .unwrap_or_default();

    SummaryRow {
        file: Path::new(&summary.file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| summary.file.clone()),
        formula: summary.formula.clone(),
        code: if parsed.code.is_empty() {
            "-".to_string()
        } else {
            parsed.code
        },
        pseudopotential: parsed.pseudopotential,
        average: format_delta(summary.best_average),
        class: summary
            .best_average
            .map(|avg| AccuracyClass::from_delta(avg).to_string())
            .unwrap_or_else(|| "-".to_string()),
        complete: summary.complete,
        incomplete: summary.incomplete,
    }
}

fn print_summary(result: &BatchResult<StructureSummary>) {
    if !result.outputs.is_empty() {
        output::print_header("Batch Ranking Summary");
        let rows: Vec<SummaryRow> = result.outputs.iter().map(summary_row).collect();
        println!("{}", Table::new(&rows));
    }

    for (file, error) in &result.failures {
        output::print_warning(&format!("{}: {}", file, error));
    }

    let uncovered = result
        .outputs
        .iter()
        .filter(|s| s.best_method.is_none())
        .count();
    if uncovered > 0 {
        output::print_warning(&format!(
            "{} structures have no code covering every element",
            uncovered
        ));
    }

    output::print_success(&format!(
        "Processed {} files: {} succeeded, {} failed",
        result.total(),
        result.success(),
        result.failed()
    ));
}

/// 保存汇总到 CSV
fn save_summary_csv(summaries: &[StructureSummary], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "file",
        "formula",
        "elements",
        "best_method",
        "average_delta_meV_per_atom",
        "complete_methods",
        "incomplete_methods",
    ])?;

    for summary in summaries {
        wtr.write_record(&[
            summary.file.clone(),
            summary.formula.clone(),
            summary.elements.join(" "),
            summary.best_method.clone().unwrap_or_default(),
            summary
                .best_average
                .map(|a| format!("{:.6}", a))
                .unwrap_or_default(),
            summary.complete.to_string(),
            summary.incomplete.to_string(),
        ])?;
    }

    wtr.flush().map_err(|e| DftPickerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{BenchmarkTable, SAMPLE_DATA};
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "dftpicker_batch_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_summarize_xyz() {
        let dir = scratch_dir("xyz");
        let path = dir.join("WO3.xyz");
        fs::write(&path, "4\ntungsten trioxide\nW 0 0 0\nO 1 0 0\nO 0 1 0\nO 0 0 1\n").unwrap();

        let table = BenchmarkTable::from_json_str(SAMPLE_DATA, "sample").unwrap();
        let engine = RankingEngine::new(&table);
        let summary = summarize_structure(&engine, &path, false);
        fs::remove_dir_all(&dir).ok();

        let summary = summary.unwrap();
        assert_eq!(summary.formula, "O3W");
        assert_eq!(summary.elements, vec!["O", "W"]);
        assert!(summary.best_method.is_some());
        assert!(summary.complete > 0);

        let expected = engine.rank(&["O", "W"], false);
        assert_eq!(
            summary.best_method.as_deref(),
            expected.best().map(|m| m.method.as_str())
        );
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = scratch_dir("failures");
        fs::write(
            dir.join("hematite.cif"),
            "data_hematite\n_chemical_formula_sum 'Fe2 O3'\n",
        )
        .unwrap();
        fs::write(dir.join("broken.xyz"), "not a count\n\n").unwrap();

        let files = FileCollector::new(dir.clone())
            .with_pattern("*.xyz,*.cif")
            .unwrap()
            .collect();

        let table = BenchmarkTable::from_json_str(SAMPLE_DATA, "sample").unwrap();
        let engine = RankingEngine::new(&table);
        let result = BatchRunner::new(2)
            .run(&files, |path| summarize_structure(&engine, path, false))
            .unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(result.total(), 2);
        assert_eq!(result.success(), 1);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.outputs[0].formula, "Fe2O3");
        assert!(result.failures[0].0.ends_with("broken.xyz"));
    }

    #[test]
    fn test_summary_row_without_best_method() {
        let summary = StructureSummary {
            file: "/tmp/Xe.xyz".to_string(),
            formula: "Xe".to_string(),
            elements: vec!["Xe".to_string()],
            best_method: None,
            best_average: None,
            complete: 0,
            incomplete: 0,
        };

        let row = summary_row(&summary);
        assert_eq!(row.file, "Xe.xyz");
        assert_eq!(row.code, "-");
        assert_eq!(row.average, "N/A");
        assert_eq!(row.class, "-");
    }

    #[test]
    fn test_save_summary_csv() {
        let dir = scratch_dir("csv");
        let path = dir.join("summary.csv");
        let summary = StructureSummary {
            file: "Fe2O3.cif".to_string(),
            formula: "Fe2O3".to_string(),
            elements: vec!["Fe".to_string(), "O".to_string()],
            best_method: Some("VASP@PW|GW-PAW54*".to_string()),
            best_average: Some(0.25),
            complete: 7,
            incomplete: 3,
        };

        save_summary_csv(&[summary], &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file,formula,elements"));
        assert_eq!(
            lines[1],
            "Fe2O3.cif,Fe2O3,Fe O,VASP@PW|GW-PAW54*,0.250000,7,3"
        );
    }
}
