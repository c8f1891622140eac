//! # DFT 方法标识数据模型
//!
//! 方法键形如 `Code[/SubCode]@Basis[|Pseudopotential]`，
//! 例如 `VASP@PW|GW-PAW54*`、`FLEUR@LAPW+LO`。
//!
//! ## 依赖关系
//! - 被 `parsers/method_id.rs` 构造
//! - 被 `benchmark/`、`commands/` 使用

use serde::Serialize;

/// 基组：原始代码与显示名称
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasisSet {
    pub raw: String,
    pub display: String,
}

/// 分解后的方法标识，仅用于展示
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMethodIdentifier {
    /// 程序名称（可含 `/` 分隔的子程序）
    pub code: String,

    pub basis: BasisSet,

    /// 赝势标签，全电子方法为空
    pub pseudopotential: String,
}
