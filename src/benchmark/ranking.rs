//! # 方法排序引擎
//!
//! 给定元素集合与全电子方法开关，计算每个方法的平均 Δ，
//! 划分完整/不完整覆盖，并按平均 Δ 升序排列。
//!
//! ## 算法
//! 1. 候选方法 = 请求元素下出现过的所有方法键（按首次出现顺序），
//!    关闭开关时去掉全电子方法
//! 2. 逐元素查表，记录 Δ 或"无数据"
//! 3. 覆盖全部元素的方法进入完整列表，部分覆盖的进入不完整列表
//! 4. 平均 Δ = 记录值的算术平均
//! 5. 完整列表按平均 Δ 稳定升序排序
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `benchmark/table.rs`、`models/ranking.rs`

use super::table::BenchmarkTable;
use crate::models::{ElementDelta, RankedMethod, Ranking};

use std::cmp::Ordering;
use std::collections::HashSet;

/// 排序引擎，持有基准数据表的只读引用
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine<'a> {
    table: &'a BenchmarkTable,
}

impl<'a> RankingEngine<'a> {
    pub fn new(table: &'a BenchmarkTable) -> Self {
        RankingEngine { table }
    }

    /// 候选方法集合
    pub fn candidates<S: AsRef<str>>(
        &self,
        elements: &[S],
        include_all_electron: bool,
    ) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut methods = Vec::new();

        for element in elements {
            for method in self.table.methods_for(element.as_ref()) {
                if !include_all_electron && self.table.is_all_electron(method) {
                    continue;
                }
                if seen.insert(method) {
                    methods.push(method);
                }
            }
        }

        methods
    }

    /// 对元素集合排序；空集合返回空结果
    pub fn rank<S: AsRef<str>>(&self, elements: &[S], include_all_electron: bool) -> Ranking {
        let mut unique: Vec<String> = Vec::with_capacity(elements.len());
        for element in elements {
            let element = element.as_ref();
            if !unique.iter().any(|e| e == element) {
                unique.push(element.to_string());
            }
        }

        let mut complete = Vec::new();
        let mut incomplete = Vec::new();

        for method in self.candidates(&unique, include_all_electron) {
            let deltas = unique
                .iter()
                .map(|element| ElementDelta {
                    element: element.clone(),
                    delta: self.table.delta(element, method),
                })
                .collect();

            let ranked = RankedMethod::from_deltas(method, deltas);
            if ranked.is_complete() {
                complete.push(ranked);
            } else if ranked.covered() > 0 {
                incomplete.push(ranked);
            }
        }

        complete.sort_by(|a, b| {
            a.average
                .partial_cmp(&b.average)
                .unwrap_or(Ordering::Equal)
        });
        incomplete.sort_by(|a, b| b.covered().cmp(&a.covered()));

        Ranking {
            elements: unique,
            include_all_electron,
            complete,
            incomplete,
        }
    }
}
