//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `rank`: 按 Δ 基准为化学式或结构文件排序 DFT 方法
//! - `parse`: 解析化学式或结构文件，显示元素组成
//! - `methods`: 列出基准数据中的方法
//! - `batch`: 批量排序目录中的结构文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: rank, parse, methods, batch

pub mod batch;
pub mod methods;
pub mod parse;
pub mod rank;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dftpicker - 按 Δ 基准挑选 DFT 方法
#[derive(Parser)]
#[command(name = "dftpicker")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Find the most accurate DFT code for your chemical system",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Rank DFT methods for a chemical formula or structure file
    Rank(rank::RankArgs),

    /// Show the element composition of a formula or structure file
    Parse(parse::ParseArgs),

    /// List the methods available in the benchmark data
    Methods(methods::MethodsArgs),

    /// Rank DFT methods for every structure file in a directory
    Batch(batch::BatchArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 基准数据文件参数
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the delta benchmark JSON (element -> method -> delta)
    #[arg(long, env = "DFTPICKER_DATA", default_value = "delta_values.json")]
    pub data: PathBuf,
}

/// 输入：化学式或结构文件，二选一
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Chemical formula (e.g., Fe2O3, CaCO3, LiNiMnCoO2)
    pub formula: Option<String>,

    /// Structure file to extract the formula from (.xyz or .cif)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}
