//! # 化学式数据模型
//!
//! 元素 → 原子数映射，保留元素首次出现的顺序。
//!
//! ## 依赖关系
//! - 被 `parsers/formula.rs` 构造
//! - 被 `commands/` 使用

use serde::Serialize;

/// 单个化学式的解析结果
///
/// 同一元素的多次出现会累加计数，而不是覆盖。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFormula {
    counts: Vec<(String, u64)>,
}

impl ParsedFormula {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个元素的计数，计数为 0 的记号被忽略
    pub fn add(&mut self, element: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.iter_mut().find(|(el, _)| el == element) {
            Some((_, n)) => *n = n.saturating_add(count),
            None => self.counts.push((element.to_string(), count)),
        }
    }

    /// 某元素的原子数
    #[cfg(test)]
    pub fn count(&self, element: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(el, _)| el == element)
            .map(|(_, n)| *n)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 不同元素的数量
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(el, n)| (el.as_str(), *n))
    }

    /// 去重后的元素列表，按首次出现顺序
    pub fn element_set(&self) -> Vec<String> {
        self.counts.iter().map(|(el, _)| el.clone()).collect()
    }
}
