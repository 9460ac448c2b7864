//! # 组成与氧化态分配数据模型
//!
//! `Composition` 是化学式解析的唯一输出，也是中性求解器的唯一输入；
//! `Assignment` 是求解器给出的每元素氧化态。
//!
//! 两者都按元素在化学式中首次出现的顺序保存条目，
//! 这个顺序就是穷举搜索的固定遍历顺序。
//!
//! ## 依赖关系
//! - 被 `parsers/formula.rs` 生成
//! - 被 `oxidation/solver.rs` 和 `commands/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;

/// 化学组成：元素符号 -> 原子数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    /// (元素, 原子数)，元素唯一，按首次出现排序
    entries: Vec<(String, u32)>,
}

impl Composition {
    pub fn new() -> Self {
        Composition::default()
    }

    /// 累加元素计数（重复出现的元素求和，溢出时饱和）
    pub fn add(&mut self, symbol: &str, count: u32) {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, n)) => *n = n.saturating_add(count),
            None => self.entries.push((symbol.to_string(), count)),
        }
    }

    /// 不同元素的数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(s, n)| (s.as_str(), *n))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// 单元素组成时返回 (元素, 原子数)
    pub fn single_element(&self) -> Option<(&str, u32)> {
        match self.entries.as_slice() {
            [(s, n)] => Some((s.as_str(), *n)),
            _ => None,
        }
    }

    /// 移除原子数为零的元素，返回被移除的符号
    pub fn remove_empty(&mut self) -> Vec<String> {
        let removed = self
            .entries
            .iter()
            .filter(|(_, n)| *n == 0)
            .map(|(s, _)| s.clone())
            .collect();
        self.entries.retain(|(_, n)| *n > 0);
        removed
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for Composition {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut composition = Composition::new();
        for (symbol, count) in iter {
            composition.add(symbol.as_ref(), count);
        }
        composition
    }
}

/// 展平书写，计数为 1 时省略 (e.g. "Fe2O3")
impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in &self.entries {
            if *count == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}{}", symbol, count)?;
            }
        }
        Ok(())
    }
}

/// 氧化态分配：元素 -> 氧化态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    states: Vec<(String, i32)>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment::default()
    }

    /// 设置元素氧化态（已存在则覆盖）
    pub fn set(&mut self, symbol: &str, state: i32) {
        match self.states.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, v)) => *v = state,
            None => self.states.push((symbol.to_string(), state)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<i32> {
        self.states
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.states.iter().map(|(s, v)| (s.as_str(), *v))
    }

    /// 总电荷 Σ 氧化态 × 原子数
    ///
    /// 组成中没有分配的元素按 0 计。
    pub fn total_charge(&self, composition: &Composition) -> i64 {
        composition
            .iter()
            .map(|(symbol, count)| {
                i64::from(self.get(symbol).unwrap_or(0)) * i64::from(count)
            })
            .sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, i32)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (symbol, state) in iter {
            assignment.set(symbol.as_ref(), state);
        }
        assignment
    }
}

/// "Na:+1 Cl:-1"
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .iter()
            .map(|(s, v)| format!("{}:{:+}", s, v))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", text)
    }
}
