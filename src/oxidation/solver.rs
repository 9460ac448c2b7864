//! # 电荷中性求解器
//!
//! 给定化学组成，寻找一组每元素氧化态，使 Σ(氧化态 × 原子数) = 0。
//!
//! ## 搜索流程
//! 1. 单质特例：双原子非金属 X2、单原子稀有气体、金属单质直接判为中性，不给数值分配
//! 2. 元素种类 > 4：每个元素只取一个"最常见"氧化态，计算一次总电荷（启发式，不完备）
//! 3. 元素种类 <= 4：按组成顺序深度优先穷举，每个元素最多尝试排序后的前 5 个氧化态，
//!    最多生成 1000 个分配；返回生成顺序中第一个总电荷为零的分配
//!
//! 求解是纯计算，无 I/O、无共享可变状态，可以在多个线程中并发调用。
//!
//! ## 依赖关系
//! - 使用 `oxidation/tables.rs` 参考数据
//! - 使用 `models/composition.rs`
//! - 被 `commands/check.rs`, `commands/filter.rs` 调用

use super::tables::{self, DEFAULT_CANDIDATES, DIATOMIC_ELEMENTS, ELEMENTAL_METALS, NOBLE_GASES};
use crate::models::{Assignment, Composition};

use std::fmt;

/// 搜索限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// 穷举搜索允许的最大元素种类数，超过则走启发式路径
    pub max_exhaustive_elements: usize,
    /// 每个元素最多尝试的氧化态数
    pub max_candidates: usize,
    /// 穷举时最多生成的分配数
    pub max_assignments: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_exhaustive_elements: 4,
            max_candidates: 5,
            max_assignments: 1000,
        }
    }
}

/// 单质特例类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementalKind {
    /// 双原子非金属分子 (H2, N2, O2, ...)
    Diatomic,
    /// 单原子稀有气体
    NobleGas,
    /// 金属单质
    Metal,
}

impl fmt::Display for ElementalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementalKind::Diatomic => write!(f, "diatomic molecule"),
            ElementalKind::NobleGas => write!(f, "noble gas"),
            ElementalKind::Metal => write!(f, "elemental metal"),
        }
    }
}

/// 中性判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeutralResult {
    /// 单质特例，按惯例氧化态为 0，不给数值分配
    Elemental(ElementalKind),
    /// 找到总电荷为零的分配
    Neutral(Assignment),
    /// 搜索范围内没有中性分配
    NotNeutral,
}

impl NeutralResult {
    pub fn is_neutral(&self) -> bool {
        !matches!(self, NeutralResult::NotNeutral)
    }

    /// 见证分配（单质特例和非中性时为 None）
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            NeutralResult::Neutral(assignment) => Some(assignment),
            _ => None,
        }
    }
}

impl fmt::Display for NeutralResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeutralResult::Elemental(kind) => write!(f, "neutral ({})", kind),
            NeutralResult::Neutral(_) => write!(f, "neutral"),
            NeutralResult::NotNeutral => write!(f, "not neutral"),
        }
    }
}

/// 实际使用的搜索路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    Elemental,
    Exhaustive,
    Heuristic,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Elemental => write!(f, "elemental"),
            SearchStrategy::Exhaustive => write!(f, "exhaustive"),
            SearchStrategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// 单个组成的求解报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralityReport {
    pub verdict: NeutralResult,
    pub strategy: SearchStrategy,
    /// 生成（并检查）的分配数
    pub explored: usize,
    /// 不在氧化态表中的元素，按默认候选处理
    pub unknown_elements: Vec<String>,
}

/// 电荷中性求解器
#[derive(Debug, Clone, Default)]
pub struct NeutralitySolver {
    config: SearchConfig,
}

impl NeutralitySolver {
    pub fn new(config: SearchConfig) -> Self {
        NeutralitySolver { config }
    }

    /// 判定组成能否电荷中性
    ///
    /// 空组成判为不中性（不视为一个零电荷的空分配）。
    pub fn find_neutral_assignment(&self, composition: &Composition) -> NeutralResult {
        self.search(composition).0
    }

    /// 判定并返回完整的搜索报告
    pub fn evaluate(&self, composition: &Composition) -> NeutralityReport {
        let (verdict, strategy, explored) = self.search(composition);

        NeutralityReport {
            verdict,
            strategy,
            explored,
            unknown_elements: unknown_elements(composition),
        }
    }

    /// 返回 (结果, 搜索路径, 生成的分配数)
    fn search(&self, composition: &Composition) -> (NeutralResult, SearchStrategy, usize) {
        if let Some(kind) = classify_elemental(composition) {
            return (NeutralResult::Elemental(kind), SearchStrategy::Elemental, 0);
        }

        // 空组成没有可以中和的东西
        if composition.is_empty() {
            return (NeutralResult::NotNeutral, SearchStrategy::Exhaustive, 0);
        }

        if composition.len() > self.config.max_exhaustive_elements {
            (self.heuristic(composition), SearchStrategy::Heuristic, 1)
        } else {
            let (verdict, explored) = self.exhaustive(composition);
            (verdict, SearchStrategy::Exhaustive, explored)
        }
    }

    /// 元素的搜索候选：排序后截断到 `max_candidates`
    pub fn candidate_states(&self, symbol: &str) -> Vec<i32> {
        let states = tables::oxidation_states(symbol).unwrap_or(DEFAULT_CANDIDATES);
        let mut ranked = rank_states(symbol, states);
        ranked.truncate(self.config.max_candidates);
        ranked
    }

    /// 启发式路径：每个元素取一个常见氧化态，只计算一次
    fn heuristic(&self, composition: &Composition) -> NeutralResult {
        let assignment: Assignment = composition
            .symbols()
            .map(|symbol| (symbol, most_common_state(symbol)))
            .collect();

        if assignment.total_charge(composition) == 0 {
            NeutralResult::Neutral(assignment)
        } else {
            NeutralResult::NotNeutral
        }
    }

    /// 穷举路径，返回 (结果, 生成的分配数)
    fn exhaustive(&self, composition: &Composition) -> (NeutralResult, usize) {
        let levels: Vec<Level> = composition
            .iter()
            .map(|(symbol, count)| Level {
                symbol,
                count: i64::from(count),
                states: self.candidate_states(symbol),
            })
            .collect();

        let mut enumeration = Enumeration {
            levels: &levels,
            limit: self.config.max_assignments,
            generated: 0,
            chosen: Vec::with_capacity(levels.len()),
        };

        let verdict = if enumeration.descend(0, 0) {
            let assignment = levels
                .iter()
                .zip(&enumeration.chosen)
                .map(|(level, state)| (level.symbol, *state))
                .collect();
            NeutralResult::Neutral(assignment)
        } else {
            NeutralResult::NotNeutral
        };

        (verdict, enumeration.generated)
    }
}

/// 穷举中的一层：一个元素及其候选
struct Level<'a> {
    symbol: &'a str,
    count: i64,
    states: Vec<i32>,
}

/// 有上限的深度优先枚举，找到第一个零电荷叶子即停止
struct Enumeration<'a, 'b> {
    levels: &'b [Level<'a>],
    limit: usize,
    generated: usize,
    chosen: Vec<i32>,
}

impl Enumeration<'_, '_> {
    /// 找到时 `chosen` 保存见证分配
    fn descend(&mut self, depth: usize, charge: i64) -> bool {
        if depth == self.levels.len() {
            self.generated += 1;
            return charge == 0;
        }

        // 已生成的分配超过上限后放弃剩余分支
        if self.generated > self.limit {
            return false;
        }

        let level = &self.levels[depth];
        for &state in &level.states {
            self.chosen.push(state);
            if self.descend(depth + 1, charge + i64::from(state) * level.count) {
                return true;
            }
            self.chosen.pop();
        }

        false
    }
}

/// 不在氧化态表中的元素，按组成顺序
pub fn unknown_elements(composition: &Composition) -> Vec<String> {
    composition
        .symbols()
        .filter(|s| !tables::is_known_element(s))
        .map(|s| s.to_string())
        .collect()
}

/// 识别单质特例
pub fn classify_elemental(composition: &Composition) -> Option<ElementalKind> {
    let (symbol, count) = composition.single_element()?;

    if DIATOMIC_ELEMENTS.contains(&symbol) && count == 2 {
        Some(ElementalKind::Diatomic)
    } else if NOBLE_GASES.contains(&symbol) && count == 1 {
        Some(ElementalKind::NobleGas)
    } else if ELEMENTAL_METALS.contains(&symbol) {
        Some(ElementalKind::Metal)
    } else {
        None
    }
}

/// 按偏好排序氧化态
///
/// 有偏好表的元素：偏好中列出的在前（按偏好顺序），其余保持原顺序；
/// 没有偏好表的元素：按绝对值从小到大（稳定排序）。
pub fn rank_states(symbol: &str, states: &[i32]) -> Vec<i32> {
    match tables::state_priority(symbol) {
        Some(priority) => {
            let mut ordered: Vec<i32> = priority
                .iter()
                .copied()
                .filter(|s| states.contains(s))
                .collect();
            ordered.extend(states.iter().copied().filter(|s| !priority.contains(s)));
            ordered
        }
        None => {
            let mut ordered = states.to_vec();
            ordered.sort_by_key(|s| s.abs());
            ordered
        }
    }
}

/// 启发式路径中元素的"最常见"氧化态
pub fn most_common_state(symbol: &str) -> i32 {
    match tables::oxidation_states(symbol) {
        Some(states) => tables::common_state(symbol).unwrap_or_else(|| match states {
            [only] => *only,
            _ if states.contains(&3) => 3,
            _ if states.contains(&2) => 2,
            _ => states[0],
        }),
        None if tables::HALOGEN_LIKE.contains(&symbol) => -1,
        None => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::formula::parse_formula;

    fn solve(formula: &str) -> NeutralityReport {
        NeutralitySolver::default().evaluate(&parse_formula(formula))
    }

    fn witness(formula: &str) -> Vec<(String, i32)> {
        solve(formula)
            .verdict
            .assignment()
            .unwrap_or_else(|| panic!("{} should have a witness", formula))
            .iter()
            .map(|(s, v)| (s.to_string(), v))
            .collect()
    }

    fn states(expected: &[(&str, i32)]) -> Vec<(String, i32)> {
        expected.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    #[test]
    fn test_sodium_chloride() {
        assert_eq!(witness("NaCl"), states(&[("Na", 1), ("Cl", -1)]));
        let report = solve("NaCl");
        assert_eq!(report.strategy, SearchStrategy::Exhaustive);
        assert_eq!(report.explored, 1);
    }

    #[test]
    fn test_iron_oxide() {
        assert_eq!(witness("Fe2O3"), states(&[("Fe", 3), ("O", -2)]));
    }

    #[test]
    fn test_carbon_dioxide() {
        assert_eq!(witness("CO2"), states(&[("C", 4), ("O", -2)]));
    }

    #[test]
    fn test_generation_order_decides_witness() {
        // Fe 排序为 [3, 2, 6]，+3 无解后才尝试 +2
        let report = solve("FeO");
        assert_eq!(
            report.verdict.assignment().map(|a| a.to_string()),
            Some("Fe:+2 O:-2".to_string())
        );
        assert_eq!(report.explored, 3);
    }

    #[test]
    fn test_ternary_and_quaternary() {
        assert_eq!(
            witness("CaTiO3"),
            states(&[("Ca", 2), ("Ti", 4), ("O", -2)])
        );
        assert!(solve("KAl(SO4)2").verdict.is_neutral());
        assert!(solve("Ca3(PO4)2").verdict.is_neutral());
        assert!(solve("LiFePO4").verdict.is_neutral());
    }

    #[test]
    fn test_elemental_special_cases() {
        for (formula, kind) in [
            ("O2", ElementalKind::Diatomic),
            ("Cl2", ElementalKind::Diatomic),
            ("Xe", ElementalKind::NobleGas),
            ("He", ElementalKind::NobleGas),
            ("Fe", ElementalKind::Metal),
            ("Cu4", ElementalKind::Metal),
        ] {
            let report = solve(formula);
            assert_eq!(report.verdict, NeutralResult::Elemental(kind), "{}", formula);
            assert_eq!(report.strategy, SearchStrategy::Elemental);
            assert!(report.verdict.assignment().is_none());
        }
    }

    #[test]
    fn test_single_element_outside_special_cases() {
        // 臭氧和 Xe2 都不属于特例，走数值搜索
        assert_eq!(solve("O3").verdict, NeutralResult::NotNeutral);
        assert_eq!(solve("Xe2").verdict, NeutralResult::NotNeutral);
        assert_eq!(solve("O3").strategy, SearchStrategy::Exhaustive);
    }

    #[test]
    fn test_same_sign_states_are_not_neutral() {
        let report = solve("MgCa2");
        assert_eq!(report.verdict, NeutralResult::NotNeutral);
        assert_eq!(report.explored, 1);
    }

    #[test]
    fn test_unknown_element_uses_default_candidates() {
        let report = solve("D2O");
        assert_eq!(report.unknown_elements, vec!["D".to_string()]);
        assert_eq!(
            report.verdict.assignment().map(|a| a.to_string()),
            Some("D:+1 O:-2".to_string())
        );
    }

    #[test]
    fn test_candidate_ranking() {
        let solver = NeutralitySolver::default();
        assert_eq!(solver.candidate_states("S"), vec![-2, 6, 4, 2]);
        assert_eq!(solver.candidate_states("C"), vec![4, -4, 2, -2, -1]);
        assert_eq!(solver.candidate_states("N"), vec![-3, 3, 5, -1, 1]);
        assert_eq!(solver.candidate_states("Mn"), vec![2, 3, 4, 6, 7]);
        assert_eq!(solver.candidate_states("Zz"), vec![1, -1, 2, -2, 3]);
    }

    #[test]
    fn test_rank_states_keeps_unranked_tail() {
        assert_eq!(rank_states("Fe", &[2, 3, 6, 4]), vec![3, 2, 6, 4]);
        assert_eq!(rank_states("Ti", &[4, -2, 3]), vec![-2, 3, 4]);
    }

    #[test]
    fn test_many_elements_use_heuristic() {
        let report = solve("LiNaKRbCsF5");
        assert_eq!(report.strategy, SearchStrategy::Heuristic);
        assert_eq!(report.explored, 1);
        assert!(report.verdict.is_neutral());

        let report = solve("LiNaKRbCs");
        assert_eq!(report.strategy, SearchStrategy::Heuristic);
        assert_eq!(report.verdict, NeutralResult::NotNeutral);
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        // K+1 Ti+3(无覆盖，取 3) Fe+3 Mn+3 O-2
        let first = solve("KTiFeMnO5");
        let second = solve("KTiFeMnO5");
        assert_eq!(first, second);
        assert_eq!(first.strategy, SearchStrategy::Heuristic);
        assert_eq!(
            first.verdict.assignment().map(|a| a.to_string()),
            Some("K:+1 Ti:+3 Fe:+3 Mn:+3 O:-2".to_string())
        );

        // 启发式失败不代表穷举也无解
        assert_eq!(solve("KTiFeMnO6").verdict, NeutralResult::NotNeutral);
    }

    #[test]
    fn test_most_common_state() {
        assert_eq!(most_common_state("Fe"), 3);
        assert_eq!(most_common_state("O"), -2);
        assert_eq!(most_common_state("Sr"), 2);
        assert_eq!(most_common_state("Ti"), 3);
        assert_eq!(most_common_state("Pd"), 2);
        assert_eq!(most_common_state("C"), 2);
        assert_eq!(most_common_state("Tc"), 4);
        assert_eq!(most_common_state("Zz"), 2);
    }

    #[test]
    fn test_assignment_cap_abandons_branches() {
        let solver = NeutralitySolver::new(SearchConfig {
            max_assignments: 1,
            ..SearchConfig::default()
        });
        let report = solver.evaluate(&parse_formula("FeO"));
        assert_eq!(report.verdict, NeutralResult::NotNeutral);
        assert_eq!(report.explored, 2);
    }

    #[test]
    fn test_element_limit_is_configurable() {
        let solver = NeutralitySolver::new(SearchConfig {
            max_exhaustive_elements: 1,
            ..SearchConfig::default()
        });
        let report = solver.evaluate(&parse_formula("NaCl"));
        assert_eq!(report.strategy, SearchStrategy::Heuristic);
        assert!(report.verdict.is_neutral());
    }

    #[test]
    fn test_empty_composition_is_not_neutral() {
        let report = solve("");
        assert_eq!(report.verdict, NeutralResult::NotNeutral);
        assert_eq!(report.explored, 0);
    }

    #[test]
    fn test_search_is_complete_within_bound() {
        let solver = NeutralitySolver::default();
        for formula in ["Fe3O4", "MnO2", "NH4Cl", "Cu2S", "HgCl", "V2O5", "Xe2F", "TlI3"] {
            let composition = parse_formula(formula);
            let lists: Vec<(i64, Vec<i32>)> = composition
                .iter()
                .map(|(s, n)| (i64::from(n), solver.candidate_states(s)))
                .collect();

            // 独立的笛卡尔积暴力检查
            let mut sums = vec![0i64];
            for (count, candidates) in &lists {
                sums = sums
                    .iter()
                    .flat_map(|acc| candidates.iter().map(move |s| acc + i64::from(*s) * count))
                    .collect();
            }
            let exists = sums.contains(&0);

            let verdict = solver.find_neutral_assignment(&composition);
            assert_eq!(verdict.is_neutral(), exists, "{}", formula);
            if let Some(assignment) = verdict.assignment() {
                assert_eq!(assignment.total_charge(&composition), 0);
                let assigned: Vec<&str> = assignment.iter().map(|(s, _)| s).collect();
                assert_eq!(assigned, composition.symbols().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_find_neutral_assignment_matches_report() {
        let solver = NeutralitySolver::default();
        for formula in ["Al2O3", "N2", "MgCa2", "LiNaKRbCsF5", ""] {
            let composition = parse_formula(formula);
            assert_eq!(
                solver.find_neutral_assignment(&composition),
                solver.evaluate(&composition).verdict,
                "{}",
                formula
            );
        }
        assert_eq!(unknown_elements(&parse_formula("DTO")), vec!["D", "T"]);
    }
}
