//! # dftpicker - 按 Δ 基准挑选 DFT 方法
//!
//! 给定化学式或结构文件，依据各 DFT 程序/基组/赝势组合相对全电子参考的
//! Δ 基准值 (meV/atom)，为体系中的所有元素排序可用的计算方法。
//!
//! ## 子命令
//! - `rank`    - 按平均 Δ 排序方法，分级显示
//! - `parse`   - 显示化学式或结构文件的元素组成
//! - `methods` - 列出基准数据中的方法
//! - `batch`   - 批量排序目录中的 XYZ / CIF 文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (化学式、XYZ、CIF、方法键解析)
//!   │     ├── benchmark/ (基准数据表与排序引擎)
//!   │     ├── batch/     (批量收集与并行执行)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod benchmark;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
