//! # rank 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/rank.rs`

use super::{DataArgs, InputArgs};
use clap::Args;
use std::path::PathBuf;

/// rank 子命令参数
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub data: DataArgs,

    /// Include all-electron codes (WIEN2k, FLEUR)
    #[arg(long, default_value_t = false)]
    pub all_electron: bool,

    /// Also list codes with missing data for some elements
    #[arg(long, default_value_t = false)]
    pub show_incomplete: bool,

    /// Only show the N best-ranked codes
    #[arg(long)]
    pub top: Option<usize>,

    /// Save the full ranking to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Save a bar chart of average deltas (PNG format)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Print the ranking as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
