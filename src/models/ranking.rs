//! # 排序结果数据模型
//!
//! 定义精度等级、单个方法的排序行以及完整的排序结果。
//!
//! ## 精度等级
//! ```text
//! Δ < 0.3          Excellent
//! 0.3 ≤ Δ < 1.0    Good
//! 1.0 ≤ Δ < 2.0    Fair
//! Δ ≥ 2.0          Poor
//! ```
//!
//! ## 依赖关系
//! - 被 `benchmark/ranking.rs` 构造
//! - 被 `commands/` 使用

use serde::Serialize;

/// Δ 精度等级 (meV/atom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyClass {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AccuracyClass {
    /// 全部等级，按精度从高到低
    pub const ALL: [AccuracyClass; 4] = [
        AccuracyClass::Excellent,
        AccuracyClass::Good,
        AccuracyClass::Fair,
        AccuracyClass::Poor,
    ];

    /// 按区间下界闭合的规则归类
    pub fn from_delta(delta: f64) -> Self {
        if delta < 0.3 {
            AccuracyClass::Excellent
        } else if delta < 1.0 {
            AccuracyClass::Good
        } else if delta < 2.0 {
            AccuracyClass::Fair
        } else {
            AccuracyClass::Poor
        }
    }

    /// 区间标签
    pub fn range_label(&self) -> &'static str {
        match self {
            AccuracyClass::Excellent => "< 0.3 meV/atom",
            AccuracyClass::Good => "0.3 - 1 meV/atom",
            AccuracyClass::Fair => "1 - 2 meV/atom",
            AccuracyClass::Poor => "≥ 2 meV/atom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AccuracyClass::Excellent => "Great agreement with all-electron reference calculations",
            AccuracyClass::Good => "Good agreement with all-electron reference calculations",
            AccuracyClass::Fair => "Fair agreement with all-electron reference calculations",
            AccuracyClass::Poor => {
                "Substantial deviations from all-electron reference calculations. Use with caution"
            }
        }
    }
}

impl std::fmt::Display for AccuracyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccuracyClass::Excellent => write!(f, "Excellent"),
            AccuracyClass::Good => write!(f, "Good"),
            AccuracyClass::Fair => write!(f, "Fair"),
            AccuracyClass::Poor => write!(f, "Poor"),
        }
    }
}

/// 单个元素的 Δ 值，`None` 表示无基准数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDelta {
    pub element: String,
    pub delta: Option<f64>,
}

/// 排序结果中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMethod {
    /// 方法键
    pub method: String,

    /// 每个请求元素一项，顺序与请求一致
    pub deltas: Vec<ElementDelta>,

    /// 平均 Δ，仅在覆盖全部元素时存在
    pub average: Option<f64>,

    /// 精度等级，仅在覆盖全部元素时存在
    pub class: Option<AccuracyClass>,
}

impl RankedMethod {
    /// 由逐元素 Δ 值构造；全部存在时计算平均值与等级
    pub fn from_deltas(method: impl Into<String>, deltas: Vec<ElementDelta>) -> Self {
        let complete = !deltas.is_empty() && deltas.iter().all(|d| d.delta.is_some());
        let average = if complete {
            let sum: f64 = deltas.iter().filter_map(|d| d.delta).sum();
            Some(sum / deltas.len() as f64)
        } else {
            None
        };

        RankedMethod {
            method: method.into(),
            deltas,
            average,
            class: average.map(AccuracyClass::from_delta),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.average.is_some()
    }

    /// 有数据的元素数
    pub fn covered(&self) -> usize {
        self.deltas.iter().filter(|d| d.delta.is_some()).count()
    }

    pub fn delta(&self, element: &str) -> Option<f64> {
        self.deltas
            .iter()
            .find(|d| d.element == element)
            .and_then(|d| d.delta)
    }
}

/// 一次排序请求的完整结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    /// 请求的元素集合
    pub elements: Vec<String>,

    pub include_all_electron: bool,

    /// 覆盖全部元素的方法，按平均 Δ 升序
    pub complete: Vec<RankedMethod>,

    /// 仅覆盖部分元素的方法
    pub incomplete: Vec<RankedMethod>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.complete.is_empty() && self.incomplete.is_empty()
    }

    /// 平均 Δ 最低的方法
    pub fn best(&self) -> Option<&RankedMethod> {
        self.complete.first()
    }

    /// 某一等级内的方法，保持排序顺序
    pub fn in_class(&self, class: AccuracyClass) -> Vec<&RankedMethod> {
        self.complete
            .iter()
            .filter(|m| m.class == Some(class))
            .collect()
    }

    /// 非空等级及其成员，按精度从高到低
    pub fn categories(&self) -> Vec<(AccuracyClass, Vec<&RankedMethod>)> {
        AccuracyClass::ALL
            .iter()
            .map(|&class| (class, self.in_class(class)))
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }
}
