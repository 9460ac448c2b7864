//! # 化学式解析器
//!
//! 将化学式字符串（支持任意层嵌套的括号组和隐式计数）解析为
//! 元素 -> 原子数 的 `Composition`。
//!
//! ## 解析流程
//! ```text
//! "K4(Fe(CN)6)"
//!   -> 词法: K 4 ( Fe ( C N ) 6 )
//!   -> 语法分析: [K4, Group([Fe, Group([C, N]) x6]) x1]
//!   -> 展平:     {K:4, Fe:1, C:6, N:6}
//! ```
//!
//! 解析从不失败。无法识别的字符、孤立的数字、不匹配的括号都会被丢弃或修补，
//! 但每一处都记录为 `ParseIssue`，调用方可以选择忽略或拒绝。
//!
//! 解析、展平和释放语法树都不递归，括号嵌套深度不受调用栈限制。
//!
//! ## 依赖关系
//! - 被 `commands/check.rs`, `commands/filter.rs` 使用
//! - 生成 `models/composition.rs` 中的 `Composition`
//! - 使用 `regex` 做词法切分

use crate::models::Composition;

use regex::Regex;
use std::fmt;
use std::mem;
use std::num::IntErrorKind;
use std::sync::LazyLock;

/// 词法单元：元素符号、ASCII 计数、括号、单个其他字符
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]?|[0-9]+|[()\[\]]|\s+|.").unwrap());

/// 化学式语法树节点
#[derive(Debug)]
pub enum FormulaNode {
    /// 元素及其计数 (e.g. "O3")
    Atom { symbol: String, count: u32 },
    /// 括号组及其倍数 (e.g. "(SO4)3")
    Group {
        children: Vec<FormulaNode>,
        multiplier: u32,
    },
}

impl Drop for FormulaNode {
    // 逐层摘下子节点，深层嵌套的树不会耗尽栈
    fn drop(&mut self) {
        if let FormulaNode::Group { children, .. } = self {
            let mut pending = mem::take(children);
            while let Some(mut node) = pending.pop() {
                if let FormulaNode::Group { children, .. } = &mut node {
                    pending.append(children);
                }
            }
        }
    }
}

/// 解析时被丢弃或修补的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// 无法识别的字符（已丢弃）
    StrayText { offset: usize, text: String },
    /// 不跟在元素或右括号后面的数字（已丢弃）
    StrayCount { offset: usize, text: String },
    /// 没有对应左括号的右括号（已丢弃）
    UnmatchedClose { offset: usize },
    /// 没有闭合的左括号（内容保留，倍数按 1）
    UnclosedGroup { offset: usize },
    /// 总计数为零的元素（不进入组成）
    ZeroCount { symbol: String },
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIssue::StrayText { offset, text } => {
                write!(f, "unrecognized text '{}' at {} dropped", text, offset)
            }
            ParseIssue::StrayCount { offset, text } => {
                write!(f, "count '{}' at {} has no element and was dropped", text, offset)
            }
            ParseIssue::UnmatchedClose { offset } => {
                write!(f, "unmatched closing bracket at {} dropped", offset)
            }
            ParseIssue::UnclosedGroup { offset } => {
                write!(f, "group opened at {} is never closed", offset)
            }
            ParseIssue::ZeroCount { symbol } => {
                write!(f, "element '{}' has zero count and was left out", symbol)
            }
        }
    }
}

/// 宽松解析结果
#[derive(Debug)]
pub struct ParsedFormula {
    pub nodes: Vec<FormulaNode>,
    pub composition: Composition,
    pub issues: Vec<ParseIssue>,
}

impl ParsedFormula {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// 解析化学式，忽略所有解析问题
pub fn parse_formula(formula: &str) -> Composition {
    parse_formula_lenient(formula).composition
}

/// 解析化学式，同时返回语法树和被丢弃的输入
pub fn parse_formula_lenient(formula: &str) -> ParsedFormula {
    let tokens = tokenize(formula);
    let mut parser = Parser {
        tokens,
        pos: 0,
        issues: Vec::new(),
    };
    let nodes = parser.parse();

    let mut composition = Composition::new();
    flatten(&nodes, &mut composition);

    let mut issues = parser.issues;
    issues.extend(
        composition
            .remove_empty()
            .into_iter()
            .map(|symbol| ParseIssue::ZeroCount { symbol }),
    );

    ParsedFormula {
        nodes,
        composition,
        issues,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Symbol(String),
    Count(u32),
    Open,
    Close,
    Space,
    Other,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    offset: usize,
    text: String,
}

fn tokenize(formula: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .find_iter(formula)
        .map(|m| {
            let text = m.as_str();
            let first = text.chars().next().unwrap_or(' ');
            let kind = match first {
                'A'..='Z' => TokenKind::Symbol(text.to_string()),
                '0'..='9' => match text.parse::<u32>() {
                    Ok(n) => TokenKind::Count(n),
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => TokenKind::Count(u32::MAX),
                    Err(_) => TokenKind::Other,
                },
                '(' | '[' => TokenKind::Open,
                ')' | ']' => TokenKind::Close,
                c if c.is_whitespace() => TokenKind::Space,
                _ => TokenKind::Other,
            };
            Token {
                kind,
                offset: m.start(),
                text: text.to_string(),
            }
        })
        .collect()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    issues: Vec<ParseIssue>,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// 若下一个词法单元是计数则消费它
    fn take_count(&mut self) -> Option<u32> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Count(n)) => {
                let n = *n;
                self.pos += 1;
                Some(n)
            }
            _ => None,
        }
    }

    /// formula := (atom | group)*
    ///
    /// 未闭合的组以显式栈保存，遇到右括号时弹出并附上倍数。
    fn parse(&mut self) -> Vec<FormulaNode> {
        let mut open: Vec<OpenGroup> = Vec::new();
        let mut nodes = Vec::new();

        while let Some(token) = self.peek().cloned() {
            self.pos += 1;
            match token.kind {
                TokenKind::Symbol(symbol) => {
                    let count = self.take_count().unwrap_or(1);
                    nodes.push(FormulaNode::Atom { symbol, count });
                }
                TokenKind::Open => {
                    open.push(OpenGroup {
                        outer: mem::take(&mut nodes),
                        offset: token.offset,
                    });
                }
                TokenKind::Close => match open.pop() {
                    Some(group) => {
                        let children = mem::replace(&mut nodes, group.outer);
                        let multiplier = self.take_count().unwrap_or(1);
                        nodes.push(FormulaNode::Group {
                            children,
                            multiplier,
                        });
                    }
                    None => self.issues.push(ParseIssue::UnmatchedClose {
                        offset: token.offset,
                    }),
                },
                TokenKind::Count(_) => self.issues.push(ParseIssue::StrayCount {
                    offset: token.offset,
                    text: token.text,
                }),
                TokenKind::Space => {}
                TokenKind::Other => self.issues.push(ParseIssue::StrayText {
                    offset: token.offset,
                    text: token.text,
                }),
            }
        }

        // 输入结束时仍未闭合的组按倍数 1 收尾，从最内层开始
        while let Some(group) = open.pop() {
            self.issues.push(ParseIssue::UnclosedGroup {
                offset: group.offset,
            });
            let children = mem::replace(&mut nodes, group.outer);
            nodes.push(FormulaNode::Group {
                children,
                multiplier: 1,
            });
        }

        nodes
    }
}

/// 尚未遇到右括号的组
struct OpenGroup {
    /// 左括号之前已解析的同级节点
    outer: Vec<FormulaNode>,
    offset: usize,
}

/// 展平语法树，组倍数逐层相乘，元素保持首次出现顺序
fn flatten(nodes: &[FormulaNode], out: &mut Composition) {
    let mut stack = vec![(nodes.iter(), 1u32)];

    while let Some((iter, factor)) = stack.last_mut() {
        match iter.next() {
            Some(FormulaNode::Atom { symbol, count }) => {
                out.add(symbol, count.saturating_mul(*factor));
            }
            Some(FormulaNode::Group {
                children,
                multiplier,
            }) => {
                let factor = factor.saturating_mul(*multiplier);
                stack.push((children.iter(), factor));
            }
            None => {
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(formula: &str) -> Vec<(String, u32)> {
        parse_formula(formula)
            .iter()
            .map(|(s, n)| (s.to_string(), n))
            .collect()
    }

    fn pairs(expected: &[(&str, u32)]) -> Vec<(String, u32)> {
        expected.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn test_flat_formula() {
        assert_eq!(counts("Fe2O3"), pairs(&[("Fe", 2), ("O", 3)]));
        assert_eq!(counts("NaCl"), pairs(&[("Na", 1), ("Cl", 1)]));
        assert_eq!(counts("H2SO4"), pairs(&[("H", 2), ("S", 1), ("O", 4)]));
    }

    #[test]
    fn test_nested_group_expansion() {
        assert_eq!(counts("A2(BC3)2"), pairs(&[("A", 2), ("B", 2), ("C", 6)]));
    }

    #[test]
    fn test_group_multiplier_defaults_to_one() {
        assert_eq!(counts("(AB)C"), pairs(&[("A", 1), ("B", 1), ("C", 1)]));
    }

    #[test]
    fn test_repeated_symbols_accumulate() {
        assert_eq!(counts("AOAO"), pairs(&[("A", 2), ("O", 2)]));
        assert_eq!(
            counts("Ca(OH)2(H2O)2"),
            pairs(&[("Ca", 1), ("O", 4), ("H", 6)])
        );
    }

    #[test]
    fn test_deep_nesting() {
        assert_eq!(
            counts("K4(Fe(CN)6)"),
            pairs(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        assert_eq!(counts("((A2)3)2"), pairs(&[("A", 12)]));
    }

    #[test]
    fn test_square_brackets() {
        assert_eq!(
            counts("[Co(NH3)6]Cl3"),
            pairs(&[("Co", 1), ("N", 6), ("H", 18), ("Cl", 3)])
        );
    }

    #[test]
    fn test_tree_shape() {
        let parsed = parse_formula_lenient("Ca3(PO4)2");
        assert!(parsed.is_clean());
        assert_eq!(parsed.nodes.len(), 2);
        match &parsed.nodes[1] {
            FormulaNode::Group {
                children,
                multiplier,
            } => {
                assert_eq!(*multiplier, 2);
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_group_is_reported() {
        let parsed = parse_formula_lenient("(A)2(B");
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("A", 2), ("B", 1)]
        );
        assert_eq!(parsed.issues, vec![ParseIssue::UnclosedGroup { offset: 4 }]);
    }

    #[test]
    fn test_unmatched_close_drops_trailing_count() {
        let parsed = parse_formula_lenient("AB)2C");
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("A", 1), ("B", 1), ("C", 1)]
        );
        assert_eq!(
            parsed.issues,
            vec![
                ParseIssue::UnmatchedClose { offset: 2 },
                ParseIssue::StrayCount {
                    offset: 3,
                    text: "2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_stray_characters_are_reported() {
        let parsed = parse_formula_lenient("Na-Cl.x");
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("Na", 1), ("Cl", 1)]
        );
        assert_eq!(parsed.issues.len(), 3);
        assert!(matches!(parsed.issues[0], ParseIssue::StrayText { offset: 2, .. }));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let parsed = parse_formula_lenient(" Fe2 O3 ");
        assert!(parsed.is_clean());
        assert_eq!(parsed.composition.to_string(), "Fe2O3");
    }

    #[test]
    fn test_zero_count_left_out() {
        let parsed = parse_formula_lenient("NaCl0");
        assert_eq!(parsed.composition.to_string(), "Na");
        assert_eq!(
            parsed.issues,
            vec![ParseIssue::ZeroCount {
                symbol: "Cl".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_formula() {
        let parsed = parse_formula_lenient("");
        assert!(parsed.composition.is_empty());
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_non_ascii_digits_are_stray_text() {
        let parsed = parse_formula_lenient("Na1\u{0663}Cl");
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("Na", 1), ("Cl", 1)]
        );
        assert_eq!(
            parsed.issues,
            vec![ParseIssue::StrayText {
                offset: 3,
                text: "\u{0663}".to_string()
            }]
        );
    }

    #[test]
    fn test_count_overflow_saturates() {
        let parsed = parse_formula_lenient("Na99999999999Cl");
        assert!(parsed.is_clean());
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("Na", u32::MAX), ("Cl", 1)]
        );
    }

    #[test]
    fn test_unclosed_group_keeps_earlier_multipliers() {
        // 只有未闭合的组按倍数 1 收尾，前面已闭合的组保留自己的倍数
        assert_eq!(counts("(A)2(B"), pairs(&[("A", 2), ("B", 1)]));
        assert_eq!(counts("(A)3(B)2(C"), pairs(&[("A", 3), ("B", 2), ("C", 1)]));

        let parsed = parse_formula_lenient("((A)2(B");
        assert_eq!(
            parsed.composition.iter().collect::<Vec<_>>(),
            vec![("A", 2), ("B", 1)]
        );
        assert_eq!(
            parsed.issues,
            vec![
                ParseIssue::UnclosedGroup { offset: 5 },
                ParseIssue::UnclosedGroup { offset: 0 },
            ]
        );
    }

    #[test]
    fn test_very_deep_nesting() {
        let depth = 100_000;
        let formula = format!("{}O{}", "(".repeat(depth), ")".repeat(depth));
        let parsed = parse_formula_lenient(&formula);
        assert!(parsed.is_clean());
        assert_eq!(parsed.composition.to_string(), "O");

        // 未闭合的深层括号同样不会耗尽栈
        let parsed = parse_formula_lenient(&format!("{}Na2O", "[".repeat(depth)));
        assert_eq!(parsed.composition.to_string(), "Na2O");
        assert_eq!(parsed.issues.len(), depth);
    }

    #[test]
    fn test_deep_nesting_on_worker_thread() {
        let formula = format!("Fe2{}O3{}", "(".repeat(100_000), ")".repeat(100_000));
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || parse_formula(&formula).to_string())
            .unwrap();
        assert_eq!(handle.join().unwrap(), "Fe2O3");
    }
}
