//! # Δ 基准数据表
//!
//! 元素 → 方法键 → Δ 值 (meV/atom) 的只读查找表，进程启动时加载一次。
//!
//! ## JSON 格式
//! ```text
//! {
//!   "data": {
//!     "Fe": { "VASP@PW|GW-PAW54*": 0.42, "FLEUR@LAPW+LO": 0.05, "ABINIT@PW|JTH": null },
//!     "O":  { ... }
//!   },
//!   "methods": {
//!     "FLEUR@LAPW+LO": { "all_electron": true }
//!   },
//!   "codes": {
//!     "VASP": { "cost": "commercial", "source": "available", "homepage": "https://www.vasp.at" }
//!   }
//! }
//! ```
//!
//! `methods` 与 `codes` 可省略；未标注的方法按程序名推断是否为全电子方法。
//! 表中缺失或为 `null` 的值表示"无数据"，不是零误差。
//! 元素与方法保持文件中的顺序。
//!
//! ## 依赖关系
//! - 被 `benchmark/ranking.rs` 和 `commands/` 使用
//! - 使用 `benchmark/metadata.rs`、`parsers/method_id.rs`

use super::metadata;
use crate::error::{DftPickerError, Result};
use crate::parsers::method_id::parse_method_identifier;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 与方法键一同存储的静态标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTag {
    /// 全电子参考方法（如 WIEN2k、FLEUR）
    #[serde(default)]
    pub all_electron: bool,
}

/// 程序的发行信息，字段均为自由文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeInfo {
    /// 如 `commercial`、`free for academia`、`free`
    pub cost: Option<String>,
    /// 如 `closed`、`available`、`copyleft`、`permissive`
    pub source: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
}

impl CodeInfo {
    /// 费用说明
    pub fn cost_label(&self) -> Option<String> {
        let cost = self.cost.as_deref()?.to_ascii_lowercase();
        if cost.contains("commercial") {
            Some("Commercial".to_string())
        } else if cost.contains("free") && cost.contains("academia") {
            Some("Free (academic)".to_string())
        } else if cost.contains("free") {
            Some("Free".to_string())
        } else {
            None
        }
    }

    /// 源码可得性，带许可证名
    pub fn source_label(&self) -> Option<String> {
        let source = self.source.as_deref()?.to_ascii_lowercase();
        let label = if source.contains("available") {
            "Source available"
        } else if source.contains("closed") {
            return Some("Closed source".to_string());
        } else if source.contains("copyleft") || source.contains("permissive") {
            "Open source"
        } else {
            return None;
        };

        Some(match self.license.as_deref() {
            Some(license) if !license.is_empty() => format!("{} ({})", label, license),
            _ => label.to_string(),
        })
    }
}

type DeltaData = IndexMap<String, IndexMap<String, Option<f64>>>;

/// 基准数据文件结构
#[derive(Debug, Deserialize)]
struct BenchmarkFile {
    data: DeltaData,

    #[serde(default)]
    methods: IndexMap<String, MethodTag>,

    #[serde(default)]
    codes: IndexMap<String, CodeInfo>,
}

/// Δ 基准数据表
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    data: DeltaData,
    tags: IndexMap<String, MethodTag>,
    codes: IndexMap<String, CodeInfo>,
}

impl BenchmarkTable {
    fn new(
        data: DeltaData,
        explicit: IndexMap<String, MethodTag>,
        codes: IndexMap<String, CodeInfo>,
    ) -> Self {
        let mut tags = IndexMap::new();

        for method in data.values().flat_map(|methods| methods.keys()) {
            if tags.contains_key(method) {
                continue;
            }
            let tag = explicit.get(method).copied().unwrap_or_else(|| MethodTag {
                all_electron: metadata::is_all_electron_code(
                    &parse_method_identifier(method).code,
                ),
            });
            tags.insert(method.clone(), tag);
        }

        BenchmarkTable { data, tags, codes }
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DftPickerError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| DftPickerError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_json_str(&content, &path.display().to_string())
    }

    /// 从 JSON 字符串解析，`source` 用于错误信息
    pub fn from_json_str(json: &str, source: &str) -> Result<Self> {
        let file: BenchmarkFile =
            serde_json::from_str(json).map_err(|e| DftPickerError::BenchmarkData {
                path: source.to_string(),
                source: e,
            })?;

        Ok(Self::new(file.data, file.methods, file.codes))
    }

    /// 由 (元素, 方法键, Δ) 行构造
    #[cfg(test)]
    pub fn from_entries<I, E, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (E, M, Option<f64>)>,
        E: Into<String>,
        M: Into<String>,
    {
        let mut data = DeltaData::new();
        for (element, method, delta) in entries {
            data.entry(element.into())
                .or_default()
                .insert(method.into(), delta);
        }
        Self::new(data, IndexMap::new(), IndexMap::new())
    }

    /// 覆盖某个方法的标记
    #[cfg(test)]
    pub fn with_tag(mut self, method: &str, tag: MethodTag) -> Self {
        self.tags.insert(method.to_string(), tag);
        self
    }

    /// Δ 值；元素或方法缺失、值为 null 时返回 `None`
    pub fn delta(&self, element: &str, method: &str) -> Option<f64> {
        self.data
            .get(element)
            .and_then(|methods| methods.get(method))
            .copied()
            .flatten()
    }

    /// 某元素下出现的所有方法键（包括值为 null 的）
    pub fn methods_for<'a>(&'a self, element: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.data
            .get(element)
            .into_iter()
            .flat_map(|methods| methods.keys().map(String::as_str))
    }

    /// 全部方法键，按首次出现顺序
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// 全部元素，按文件顺序
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn tag(&self, method: &str) -> MethodTag {
        self.tags.get(method).copied().unwrap_or_default()
    }

    pub fn is_all_electron(&self, method: &str) -> bool {
        self.tag(method).all_electron
    }

    /// 程序发行信息，接受方法键、别名和 `/` 分隔的组合程序名
    pub fn code_info(&self, code: &str) -> Option<&CodeInfo> {
        metadata::lookup_code(code, |name| self.codes.get(name))
    }

    /// 某方法有数据的元素
    pub fn covered_elements(&self, method: &str) -> Vec<&str> {
        self.data
            .iter()
            .filter(|(_, methods)| matches!(methods.get(method), Some(Some(_))))
            .map(|(element, _)| element.as_str())
            .collect()
    }

    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    pub fn method_count(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": {
            "Fe": { "VASP@PW|GW-PAW54*": 0.5, "FLEUR@LAPW+LO": 0.1, "ABINIT@PW|JTH": null },
            "O":  { "VASP@PW|GW-PAW54*": 0.7, "FLEUR@LAPW+LO": 0.2 }
        },
        "methods": {
            "ABINIT@PW|JTH": { "all_electron": false }
        }
    }"#;

    #[test]
    fn test_from_json_lookup() {
        let table = BenchmarkTable::from_json_str(SAMPLE, "sample").unwrap();

        assert_eq!(table.delta("Fe", "VASP@PW|GW-PAW54*"), Some(0.5));
        assert_eq!(table.delta("O", "FLEUR@LAPW+LO"), Some(0.2));
        assert_eq!(table.element_count(), 2);
        assert_eq!(table.method_count(), 3);
    }

    #[test]
    fn test_absent_and_null_are_no_data() {
        let table = BenchmarkTable::from_json_str(SAMPLE, "sample").unwrap();

        assert_eq!(table.delta("Fe", "ABINIT@PW|JTH"), None);
        assert_eq!(table.delta("O", "ABINIT@PW|JTH"), None);
        assert_eq!(table.delta("Xe", "VASP@PW|GW-PAW54*"), None);
        assert_eq!(table.methods_for("Xe").count(), 0);
        assert_eq!(table.methods_for("Fe").count(), 3);
    }

    #[test]
    fn test_all_electron_tag_inferred_from_code() {
        let table = BenchmarkTable::from_json_str(SAMPLE, "sample").unwrap();

        assert!(table.is_all_electron("FLEUR@LAPW+LO"));
        assert!(!table.is_all_electron("VASP@PW|GW-PAW54*"));
        assert!(!table.is_all_electron("ABINIT@PW|JTH"));
    }

    #[test]
    fn test_explicit_tag_overrides_inference() {
        let json = r#"{
            "data": { "Si": { "FLEUR@LAPW+LO": 0.1, "exciting@LAPW": 0.1 } },
            "methods": {
                "FLEUR@LAPW+LO": { "all_electron": false },
                "exciting@LAPW": { "all_electron": true }
            }
        }"#;
        let table = BenchmarkTable::from_json_str(json, "inline").unwrap();

        assert!(!table.is_all_electron("FLEUR@LAPW+LO"));
        assert!(table.is_all_electron("exciting@LAPW"));
    }

    #[test]
    fn test_covered_elements() {
        let table = BenchmarkTable::from_json_str(SAMPLE, "sample").unwrap();
        assert_eq!(table.covered_elements("VASP@PW|GW-PAW54*"), vec!["Fe", "O"]);
        assert!(table.covered_elements("ABINIT@PW|JTH").is_empty());
    }

    #[test]
    fn test_from_entries_and_with_tag() {
        let table = BenchmarkTable::from_entries([
            ("Si", "A@PW", Some(0.1)),
            ("Si", "B@PW", None),
            ("Ge", "A@PW", Some(0.4)),
        ])
        .with_tag("B@PW", MethodTag { all_electron: true });

        assert_eq!(table.delta("Ge", "A@PW"), Some(0.4));
        assert_eq!(table.delta("Si", "B@PW"), None);
        assert!(table.is_all_electron("B@PW"));
        assert_eq!(table.methods().collect::<Vec<_>>(), vec!["A@PW", "B@PW"]);
    }

    #[test]
    fn test_file_order_preserved() {
        let json = r#"{
            "data": {
                "Si": { "Zeta@PW": 0.3, "Alpha@PW": 0.1 },
                "Al": { "Mid@PW": 0.2, "Zeta@PW": 0.4 }
            }
        }"#;
        let table = BenchmarkTable::from_json_str(json, "inline").unwrap();

        assert_eq!(table.elements().collect::<Vec<_>>(), vec!["Si", "Al"]);
        assert_eq!(
            table.methods().collect::<Vec<_>>(),
            vec!["Zeta@PW", "Alpha@PW", "Mid@PW"]
        );
        assert_eq!(table.covered_elements("Zeta@PW"), vec!["Si", "Al"]);
    }

    #[test]
    fn test_code_info_lookup() {
        let json = r#"{
            "data": { "Si": { "VASP@PW|PAW": 0.3 } },
            "codes": {
                "VASP": { "cost": "commercial", "source": "available", "homepage": "https://www.vasp.at" },
                "Quantum ESPRESSO": { "cost": "free", "source": "copyleft", "license": "GPL" },
                "CP2K": { "cost": "free", "source": "copyleft" }
            }
        }"#;
        let table = BenchmarkTable::from_json_str(json, "inline").unwrap();

        let vasp = table.code_info("VASP@PW|PAW").unwrap();
        assert_eq!(vasp.homepage.as_deref(), Some("https://www.vasp.at"));
        assert_eq!(vasp.license, None);

        // 别名与组合程序名
        let qe = table.code_info("SIRIUS").unwrap();
        assert_eq!(qe.license.as_deref(), Some("GPL"));
        assert_eq!(table.code_info("SIRIUS/CP2K"), Some(qe));
        assert!(table.code_info("CP2K/Quickstep").is_some());
        assert!(table.code_info("GPAW").is_none());

        assert!(BenchmarkTable::from_json_str(SAMPLE, "sample")
            .unwrap()
            .code_info("VASP")
            .is_none());
    }

    #[test]
    fn test_code_info_labels() {
        let info = |cost: &str, source: &str, license: Option<&str>| CodeInfo {
            cost: Some(cost.to_string()),
            source: Some(source.to_string()),
            license: license.map(str::to_string),
            homepage: None,
        };

        let vasp = info("commercial", "available", None);
        assert_eq!(vasp.cost_label().as_deref(), Some("Commercial"));
        assert_eq!(vasp.source_label().as_deref(), Some("Source available"));

        let wien2k = info("free for academia", "available", Some("custom"));
        assert_eq!(wien2k.cost_label().as_deref(), Some("Free (academic)"));
        assert_eq!(wien2k.source_label().as_deref(), Some("Source available (custom)"));

        let qe = info("free", "copyleft", Some("GPL"));
        assert_eq!(qe.cost_label().as_deref(), Some("Free"));
        assert_eq!(qe.source_label().as_deref(), Some("Open source (GPL)"));

        let closed = info("unknown", "closed", Some("EULA"));
        assert_eq!(closed.cost_label(), None);
        assert_eq!(closed.source_label().as_deref(), Some("Closed source"));

        assert_eq!(CodeInfo::default().cost_label(), None);
        assert_eq!(CodeInfo::default().source_label(), None);
    }

    #[test]
    fn test_invalid_json() {
        let err = BenchmarkTable::from_json_str("{ not json", "broken.json").unwrap_err();
        assert!(matches!(err, DftPickerError::BenchmarkData { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
