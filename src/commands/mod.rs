//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，并提供输入解析与数据加载的共享步骤。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `benchmark/`, `models/`, `utils/`
//! - 子模块: rank, parse, methods, batch

pub mod batch;
pub mod methods;
pub mod parse;
pub mod rank;

use crate::benchmark::BenchmarkTable;
use crate::cli::{Commands, DataArgs, InputArgs};
use crate::error::{DftPickerError, Result};
use crate::parsers::{self, formula};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Rank(args) => rank::execute(args),
        Commands::Parse(args) => parse::execute(args),
        Commands::Methods(args) => methods::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}

/// 一次提交：来源、化学式与去重后的元素集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// 化学式文本或文件路径
    pub source: String,
    pub formula: String,
    pub elements: Vec<String>,
}

impl Submission {
    /// 由化学式文本构造，空元素集合视为错误
    pub fn from_formula(source: impl Into<String>, formula: &str) -> Result<Self> {
        let elements = formula::elements_from_formula(formula)?;
        Ok(Submission {
            source: source.into(),
            formula: formula.trim().to_string(),
            elements,
        })
    }

    /// 由结构文件构造
    ///
    /// 文件给出的化学式可带小数占位，不经过键盘输入的字符集校验。
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let extracted = parsers::formula_from_path(path)?;
        let elements = formula::composition_elements(&extracted)?;
        if elements.is_empty() {
            return Err(DftPickerError::InvalidArgument(format!(
                "no atoms found in {}",
                path.display()
            )));
        }

        Ok(Submission {
            source: path.display().to_string(),
            formula: extracted,
            elements,
        })
    }
}

/// 解析命令行输入（化学式或结构文件）
pub fn resolve_input(input: &InputArgs) -> Result<Submission> {
    match (&input.formula, &input.file) {
        (_, Some(path)) => Submission::from_file(path),
        (Some(formula), None) => Submission::from_formula(formula.as_str(), formula),
        (None, None) => Err(DftPickerError::InvalidArgument(
            "please provide a chemical formula or --file".to_string(),
        )),
    }
}

/// 加载基准数据表
pub fn load_table(data: &DataArgs) -> Result<BenchmarkTable> {
    BenchmarkTable::load(&data.data)
}

/// 格式化 Δ 值，无数据时显示 N/A
pub fn format_delta(delta: Option<f64>) -> String {
    delta
        .map(|d| format!("{:.2}", d))
        .unwrap_or_else(|| "N/A".to_string())
}
