//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及按精度等级着色。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::models::AccuracyClass;

use colored::{ColoredString, Colorize};

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 按精度等级着色
pub fn paint_class(text: &str, class: AccuracyClass) -> ColoredString {
    match class {
        AccuracyClass::Excellent => text.green(),
        AccuracyClass::Good => text.cyan(),
        AccuracyClass::Fair => text.yellow(),
        AccuracyClass::Poor => text.red(),
    }
}

/// 打印精度等级小标题
pub fn print_class_heading(class: AccuracyClass, count: usize) {
    println!(
        "\n{} {} ({})",
        paint_class(&format!("■ {}", class), class).bold(),
        class.range_label().dimmed(),
        count
    );
    println!("  {}", class.description().dimmed());
}
