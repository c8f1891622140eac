//! # 数据模型模块
//!
//! 定义化学式、方法标识和排序结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`benchmark/` 和 `commands/` 使用
//! - 子模块: formula, method, ranking

pub mod formula;
pub mod method;
pub mod ranking;

pub use formula::ParsedFormula;
pub use method::{BasisSet, ParsedMethodIdentifier};
pub use ranking::{AccuracyClass, ElementDelta, RankedMethod, Ranking};
