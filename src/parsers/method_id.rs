//! # 方法键解析器
//!
//! 将 `Code[/SubCode]@Basis[|Pseudopotential]` 形式的方法键分解为展示字段。
//! 总是成功：缺失的部分为空串。
//!
//! ## 示例
//! ```text
//! VASP@PW|GW-PAW54*       -> VASP, Plane Waves, GW-PAW54*
//! BigDFT@DW|HGH-K(Valence) -> BigDFT, Daubechies Wavelets, HGH-K(Valence)
//! FLEUR@LAPW+LO           -> FLEUR, LAPW+LO, ""
//! ```
//!
//! ## 依赖关系
//! - 被 `benchmark/`、`commands/` 使用
//! - 使用 `models/method.rs`

use crate::models::{BasisSet, ParsedMethodIdentifier};

/// 基组代码 → 显示名称；表外代码（包括 LAPW 系列）原样显示
const BASIS_LABELS: &[(&str, &str)] = &[
    ("PW", "Plane Waves"),
    ("DW", "Daubechies Wavelets"),
    ("TZV2P", "Triple-Zeta Valence + 2 Polarization"),
    ("AtOrOptDiamond", "Atomic Orbital Optimized (Diamond)"),
];

/// 基组显示名称
pub fn basis_display(raw: &str) -> String {
    BASIS_LABELS
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// 分解方法键
pub fn parse_method_identifier(key: &str) -> ParsedMethodIdentifier {
    let mut parts = key.split('|');
    let code_basis = parts.next().unwrap_or_default();
    let pseudopotential = parts.next().unwrap_or_default();

    let mut parts = code_basis.split('@');
    let code = parts.next().unwrap_or_default();
    let basis_raw = parts.next().unwrap_or_default();

    ParsedMethodIdentifier {
        code: code.to_string(),
        basis: BasisSet {
            raw: basis_raw.to_string(),
            display: basis_display(basis_raw),
        },
        pseudopotential: pseudopotential.to_string(),
    }
}
