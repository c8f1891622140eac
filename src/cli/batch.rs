//! # batch 子命令 CLI 定义
//!
//! 批量提取目录中结构文件的化学式并排序。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::DataArgs;
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input: structure file or directory containing structure files
    pub input: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,

    /// Glob pattern for input files (comma separated)
    #[arg(short, long, default_value = "*.xyz,*.cif")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Include all-electron codes (WIEN2k, FLEUR)
    #[arg(long, default_value_t = false)]
    pub all_electron: bool,

    /// Save the per-structure summary to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}
