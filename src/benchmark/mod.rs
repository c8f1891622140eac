//! # Δ 基准模块
//!
//! 基准数据表、方法静态元数据以及排序引擎。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`、`parsers/method_id.rs`
//! - 子模块: table, metadata, ranking

pub mod metadata;
pub mod ranking;
pub mod table;

pub use ranking::RankingEngine;
pub use table::BenchmarkTable;

/// 示例数据集，用于测试
#[cfg(test)]
pub(crate) const SAMPLE_DATA: &str = include_str!("../../data/sample_delta_values.json");
