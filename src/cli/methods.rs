//! # methods 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/methods.rs`

use super::DataArgs;
use clap::Args;

/// methods 子命令参数
#[derive(Args, Debug)]
pub struct MethodsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Only list methods with data for this element (e.g., Fe)
    #[arg(short, long)]
    pub element: Option<String>,

    /// Hide all-electron codes (WIEN2k, FLEUR)
    #[arg(long, default_value_t = false)]
    pub no_all_electron: bool,
}
