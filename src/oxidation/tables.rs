//! # 氧化态参考数据
//!
//! 全周期表的常见氧化态、搜索排序偏好、常见态覆盖表以及单质特例集合。
//!
//! 所有表都是进程级只读静态数据，首次访问时初始化，之后不再修改，
//! 可以在多个线程中并发读取。
//!
//! ## 依赖关系
//! - 被 `oxidation/solver.rs` 调用
//! - 纯静态数据，无外部依赖

use std::collections::HashMap;
use std::sync::LazyLock;

/// 未知元素的候选氧化态
pub const DEFAULT_CANDIDATES: &[i32] = &[1, 2, 3, -1, -2];

/// 以双原子分子存在的非金属单质
pub const DIATOMIC_ELEMENTS: &[&str] = &["H", "N", "O", "F", "Cl", "Br", "I"];

/// 单原子稀有气体
pub const NOBLE_GASES: &[&str] = &["He", "Ne", "Ar", "Kr", "Xe", "Rn", "Og"];

/// 视为金属单质的元素
pub const ELEMENTAL_METALS: &[&str] = &[
    "Li", "Na", "K", "Rb", "Cs", "Fr", "Be", "Mg", "Ca", "Sr", "Ba", "Ra", "Al", "Ga", "In", "Tl",
    "Sn", "Pb", "Bi", "Po", "Fe", "Cu", "Ag", "Au", "Zn",
];

/// 未知元素在启发式路径中按 -1 处理的元素
pub const HALOGEN_LIKE: &[&str] = &["H", "F", "Cl", "Br", "I"];

/// 各元素的常见氧化态（按族排列）
const OXIDATION_ENTRIES: &[(&str, &[i32])] = &[
    // 1 族
    ("H", &[1, -1]),
    ("Li", &[1]),
    ("Na", &[1]),
    ("K", &[1]),
    ("Rb", &[1]),
    ("Cs", &[1]),
    ("Fr", &[1]),
    // 2 族
    ("Be", &[2]),
    ("Mg", &[2]),
    ("Ca", &[2]),
    ("Sr", &[2]),
    ("Ba", &[2]),
    ("Ra", &[2]),
    // 3 族
    ("Sc", &[3]),
    ("Y", &[3]),
    // 4 族
    ("Ti", &[2, 3, 4]),
    ("Zr", &[4]),
    ("Hf", &[4]),
    ("Rf", &[4]),
    // 5 族
    ("V", &[2, 3, 4, 5]),
    ("Nb", &[3, 5]),
    ("Ta", &[5]),
    ("Db", &[5]),
    // 6 族
    ("Cr", &[2, 3, 6]),
    ("Mo", &[2, 3, 4, 5, 6]),
    ("W", &[2, 3, 4, 5, 6]),
    ("Sg", &[6]),
    // 7 族
    ("Mn", &[2, 3, 4, 6, 7]),
    ("Tc", &[4, 7]),
    ("Re", &[4, 7]),
    ("Bh", &[7]),
    // 8 族
    ("Fe", &[2, 3, 6]),
    ("Ru", &[2, 3, 4, 8]),
    ("Os", &[2, 3, 4, 8]),
    ("Hs", &[8]),
    // 9 族
    ("Co", &[2, 3]),
    ("Rh", &[3]),
    ("Ir", &[3, 4]),
    ("Mt", &[3]),
    // 10 族
    ("Ni", &[2, 3]),
    ("Pd", &[2, 4]),
    ("Pt", &[2, 4]),
    ("Ds", &[2]),
    // 11 族
    ("Cu", &[1, 2]),
    ("Ag", &[1]),
    ("Au", &[1, 3]),
    ("Rg", &[1, 3]),
    // 12 族
    ("Zn", &[2]),
    ("Cd", &[2]),
    ("Hg", &[1, 2]),
    ("Cn", &[2]),
    // 13 族
    ("B", &[3]),
    ("Al", &[3]),
    ("Ga", &[3]),
    ("In", &[1, 3]),
    ("Tl", &[1, 3]),
    ("Nh", &[3]),
    // 14 族
    ("C", &[-4, -3, -2, -1, 2, 4]),
    ("Si", &[4]),
    ("Ge", &[2, 4]),
    ("Sn", &[2, 4]),
    ("Pb", &[2, 4]),
    ("Fl", &[2, 4]),
    // 15 族
    ("N", &[-3, -2, -1, 1, 2, 3, 4, 5]),
    ("P", &[-3, 3, 5]),
    ("As", &[-3, 3, 5]),
    ("Sb", &[-3, 3, 5]),
    ("Bi", &[3, 5]),
    ("Mc", &[3]),
    // 16 族
    ("O", &[-2, -1]),
    ("S", &[-2, 2, 4, 6]),
    ("Se", &[-2, 2, 4, 6]),
    ("Te", &[-2, 2, 4, 6]),
    ("Po", &[2, 4]),
    ("Lv", &[2, 4]),
    // 17 族
    ("F", &[-1]),
    ("Cl", &[-1, 1, 3, 5, 7]),
    ("Br", &[-1, 1, 3, 5, 7]),
    ("I", &[-1, 1, 3, 5, 7]),
    ("At", &[-1, 1, 3, 5, 7]),
    ("Ts", &[-1, 1, 3, 5, 7]),
    // 18 族（少数可形成化合物）
    ("He", &[0]),
    ("Ne", &[0]),
    ("Ar", &[0]),
    ("Kr", &[2]),
    ("Xe", &[2, 4, 6, 8]),
    ("Rn", &[2]),
    ("Og", &[0]),
    // 镧系，以 +3 为主
    ("La", &[3]),
    ("Ce", &[3, 4]),
    ("Pr", &[3, 4]),
    ("Nd", &[3]),
    ("Pm", &[3]),
    ("Sm", &[2, 3]),
    ("Eu", &[2, 3]),
    ("Gd", &[3]),
    ("Tb", &[3, 4]),
    ("Dy", &[3]),
    ("Ho", &[3]),
    ("Er", &[3]),
    ("Tm", &[2, 3]),
    ("Yb", &[2, 3]),
    ("Lu", &[3]),
    // 锕系
    ("Ac", &[3]),
    ("Th", &[4]),
    ("Pa", &[4, 5]),
    ("U", &[3, 4, 5, 6]),
    ("Np", &[3, 4, 5, 6, 7]),
    ("Pu", &[3, 4, 5, 6]),
    ("Am", &[3, 4, 5, 6]),
    ("Cm", &[3, 4]),
    ("Bk", &[3, 4]),
    ("Cf", &[3]),
    ("Es", &[3]),
    ("Fm", &[3]),
    ("Md", &[3]),
    ("No", &[2, 3]),
    ("Lr", &[3]),
];

/// 各元素的常见氧化态
pub static OXIDATION_STATES: LazyLock<HashMap<&'static str, &'static [i32]>> =
    LazyLock::new(|| OXIDATION_ENTRIES.iter().copied().collect());

/// 搜索顺序偏好：最可能的氧化态在前
///
/// 只影响尝试顺序，不排除任何氧化态。
const PRIORITY_ENTRIES: &[(&str, &[i32])] = &[
    ("O", &[-2, -1]),
    ("H", &[1, -1]),
    ("F", &[-1]),
    ("Cl", &[-1, 1, 3, 5, 7]),
    ("Br", &[-1, 1, 3, 5, 7]),
    ("I", &[-1, 1, 3, 5, 7]),
    ("S", &[-2, 6, 4, 2]),
    ("N", &[-3, 3, 5, -1, 1, 2, 4]),
    ("C", &[4, -4, 2, -2, -1, -3]),
    ("P", &[5, 3, -3]),
    ("Fe", &[3, 2, 6]),
    ("Cu", &[2, 1]),
    ("Al", &[3]),
    ("Ca", &[2]),
    ("Na", &[1]),
    ("K", &[1]),
];

/// 搜索顺序偏好表
pub static STATE_PRIORITY: LazyLock<HashMap<&'static str, &'static [i32]>> =
    LazyLock::new(|| PRIORITY_ENTRIES.iter().copied().collect());

/// 启发式路径使用的常见氧化态
///
/// 与 `STATE_PRIORITY` 相互独立，两者对同一元素的偏好不必一致。
pub static COMMON_STATE: LazyLock<HashMap<&'static str, i32>> = LazyLock::new(|| {
    [
        ("O", -2),
        ("H", 1),
        ("F", -1),
        ("Cl", -1),
        ("Br", -1),
        ("I", -1),
        ("Na", 1),
        ("K", 1),
        ("Ca", 2),
        ("Mg", 2),
        ("Al", 3),
        ("Fe", 3),
        ("Cu", 2),
    ]
    .into_iter()
    .collect()
});

/// 获取元素的候选氧化态
pub fn oxidation_states(symbol: &str) -> Option<&'static [i32]> {
    OXIDATION_STATES.get(symbol).copied()
}

/// 元素是否在氧化态表中
pub fn is_known_element(symbol: &str) -> bool {
    OXIDATION_STATES.contains_key(symbol)
}

/// 获取元素的搜索顺序偏好
pub fn state_priority(symbol: &str) -> Option<&'static [i32]> {
    STATE_PRIORITY.get(symbol).copied()
}

/// 获取元素的常见氧化态覆盖值
pub fn common_state(symbol: &str) -> Option<i32> {
    COMMON_STATE.get(symbol).copied()
}
