//! # 方法静态元数据
//!
//! 全电子程序列表、引用趋势链接 (atomistic.software) 以及程序别名表。
//! 别名以数据形式给出：按程序名查找失败时再用别名的目标查找。
//!
//! ## 依赖关系
//! - 被 `benchmark/table.rs` 和 `commands/` 使用
//! - 无外部模块依赖

/// 全电子参考程序
pub const ALL_ELECTRON_CODES: &[&str] = &["WIEN2k", "FLEUR"];

/// 程序名 → 引用趋势链接
const CITATION_URLS: &[(&str, &str)] = &[
    ("VASP", "https://atomistic.software/#/charts/VASP"),
    (
        "Quantum ESPRESSO",
        "https://atomistic.software/#/charts/Quantum%20ESPRESSO",
    ),
    ("CASTEP", "https://atomistic.software/#/charts/CASTEP"),
    ("ABINIT", "https://atomistic.software/#/charts/ABINIT"),
    ("CP2K", "https://atomistic.software/#/charts/CP2K"),
    ("SIESTA", "https://atomistic.software/#/charts/SIESTA"),
    ("GPAW", "https://atomistic.software/#/charts/GPAW"),
    ("WIEN2k", "https://atomistic.software/#/charts/WIEN2k"),
    ("FLEUR", "https://atomistic.software/#/charts/FLEUR"),
    ("BigDFT", "https://atomistic.software/#/charts/BigDFT"),
];

/// 程序别名：查找元数据时使用右侧程序的条目
const CODE_ALIASES: &[(&str, &str)] = &[("SIRIUS", "Quantum ESPRESSO")];

/// 解析别名，没有别名时原样返回
pub fn resolve_alias(code: &str) -> &str {
    CODE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, target)| *target)
        .unwrap_or(code)
}

/// 去掉方法键中的基组与赝势部分
fn clean_code_name(code: &str) -> &str {
    code.split('@')
        .next()
        .and_then(|s| s.split('|').next())
        .unwrap_or_default()
        .trim()
}

/// 程序是否为全电子参考程序（含 `/` 分隔的子程序）
pub fn is_all_electron_code(code: &str) -> bool {
    clean_code_name(code)
        .split('/')
        .any(|part| ALL_ELECTRON_CODES.contains(&part.trim()))
}

/// 按程序名查找元数据：先整体匹配，再逐个匹配 `/` 分隔的子程序，
/// 每一步都先试原名再试别名
pub fn lookup_code<T>(code: &str, find: impl Fn(&str) -> Option<T>) -> Option<T> {
    let clean = clean_code_name(code);
    if clean.is_empty() {
        return None;
    }

    let by_name = |name: &str| {
        find(name).or_else(|| {
            let target = resolve_alias(name);
            if target == name {
                None
            } else {
                find(target)
            }
        })
    };

    by_name(clean).or_else(|| clean.split('/').find_map(|part| by_name(part.trim())))
}

/// 引用趋势链接
pub fn citation_trend_url(code: &str) -> Option<&'static str> {
    lookup_code(code, |name| {
        CITATION_URLS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, url)| *url)
    })
}
