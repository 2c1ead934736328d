/*!
# Optimizer Module

Four peephole passes over a loaded instruction table, applied in a
fixed order, each reporting how many instructions it eliminated. The
passes work on the textual instruction list, not a parsed AST, and
their output serializes back to valid program text.

The table's numeric addresses are never renumbered after a deletion.
Dead-code elimination respects this by stopping at labels, but a
literal integer jump target whose destination shifts is silently left
pointing at the old position; that limitation is inherited and
preserved deliberately. Redundant-load folding is likewise
mutation-blind: it substitutes `DUP` for a repeated `LOAD x` without
proving nothing stored to `x` in between, and it drops any blank,
comment, or label lines it folded across.

*/

use crate::lang::{Instr, Line};
use crate::mach::{Opcode, Operation, Program};
use std::rc::Rc;

/// Per-pass elimination counts plus the overall before/after
/// difference in non-blank, non-comment lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Both instructions of each eliminated pair count.
    pub push_pop_removed: usize,
    /// Redundant `LOAD`s replaced by `DUP`, not counted as removed
    /// in the total.
    pub redundant_loads_removed: usize,
    /// Unreachable instructions deleted; blanks and comments inside a
    /// dead region are dropped without being counted.
    pub dead_code_removed: usize,
    /// Both operand pushes of each folded triple count.
    pub constant_folding_removed: usize,
    pub total_removed: usize,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Optimization Statistics:")?;
        writeln!(f, "- PUSH/POP pairs removed: {}", self.push_pop_removed)?;
        writeln!(f, "- Redundant LOADs removed: {}", self.redundant_loads_removed)?;
        writeln!(f, "- Dead code instructions removed: {}", self.dead_code_removed)?;
        writeln!(
            f,
            "- Constant folding optimizations: {}",
            self.constant_folding_removed
        )?;
        write!(f, "- Total instructions removed: {}", self.total_removed)
    }
}

/// ## Optimizer pipeline
///
/// Consumes a loaded [`Program`] and rewrites its instruction table.
/// Each pass can be run on its own; [`Optimizer::optimize`] runs all
/// four in order and aggregates the statistics.
pub struct Optimizer {
    lines: Vec<Line>,
}

impl Optimizer {
    pub fn new(program: Program) -> Optimizer {
        Optimizer {
            lines: program.into_lines(),
        }
    }

    /// The current table serialized back to program text.
    pub fn source(&self) -> String {
        let mut out = String::new();
        let mut first = true;
        for line in &self.lines {
            if !first {
                out.push('\n');
            }
            out.push_str(&line.to_string());
            first = false;
        }
        out
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn significant_len(&self) -> usize {
        self.lines.iter().filter(|line| line.is_significant()).count()
    }

    /// A `PUSH v` immediately followed by a bare `POP` is a no-op
    /// pair; both are deleted. Single left-to-right scan: a pair made
    /// newly adjacent by a deletion is not re-examined.
    pub fn eliminate_push_pop(&mut self) -> usize {
        let lines = std::mem::take(&mut self.lines);
        let mut optimized: Vec<Line> = Vec::with_capacity(lines.len());
        let mut removed = 0;
        let mut i = 0;
        while i < lines.len() {
            if i + 1 < lines.len()
                && is_push(&lines[i])
                && is_bare(&lines[i + 1], Opcode::Pop)
            {
                removed += 2;
                i += 2;
                continue;
            }
            optimized.push(lines[i].clone());
            i += 1;
        }
        self.lines = optimized;
        removed
    }

    /// `LOAD x` followed, skipping blanks, comments, and labels, by
    /// further exact `LOAD x` repeats: each repeat becomes a `DUP` of
    /// the value already on top. Behavior-preserving only when nothing
    /// stored to `x` in between, which this pass does not check.
    pub fn fold_redundant_loads(&mut self) -> usize {
        let lines = std::mem::take(&mut self.lines);
        let mut optimized: Vec<Line> = Vec::with_capacity(lines.len());
        let mut removed = 0;
        let mut i = 0;
        while i < lines.len() {
            let var_name = match load_var(&lines[i]) {
                Some(var_name) => var_name,
                None => {
                    optimized.push(lines[i].clone());
                    i += 1;
                    continue;
                }
            };
            let mut j = i + 1;
            let mut repeats = 0;
            while j < lines.len() {
                match &lines[j] {
                    Line::Blank(_) | Line::Comment(_) | Line::Label { .. } => j += 1,
                    Line::Instr(instr) if is_exact_load(instr, &var_name) => {
                        repeats += 1;
                        j += 1;
                    }
                    Line::Instr(_) => break,
                }
            }
            optimized.push(lines[i].clone());
            if repeats > 0 {
                for _ in 0..repeats {
                    optimized.push(Line::Instr(Instr::new("DUP", vec![])));
                }
                removed += repeats;
                i = j;
            } else {
                i += 1;
            }
        }
        self.lines = optimized;
        removed
    }

    /// After a bare `HALT`, bare `RET`, or a `JMP` with a target,
    /// everything up to the next label is unreachable and deleted.
    /// Labels are never deleted and reset the skip state.
    pub fn eliminate_dead_code(&mut self) -> usize {
        let lines = std::mem::take(&mut self.lines);
        let mut optimized: Vec<Line> = Vec::with_capacity(lines.len());
        let mut removed = 0;
        let mut skipping = false;
        for line in lines {
            if skipping {
                match &line {
                    Line::Label { .. } => {
                        skipping = false;
                        optimized.push(line);
                    }
                    Line::Blank(_) | Line::Comment(_) => {}
                    Line::Instr(_) => removed += 1,
                }
                continue;
            }
            let terminal = is_bare(&line, Opcode::Halt)
                || is_bare(&line, Opcode::Ret)
                || is_jump(&line);
            optimized.push(line);
            if terminal {
                skipping = true;
            }
        }
        self.lines = optimized;
        removed
    }

    /// `PUSH a`, `PUSH b`, arithmetic opcode on three adjacent table
    /// entries folds to a single `PUSH result`, computed with the
    /// engine's own integer semantics. Division or modulo by a literal
    /// zero is left unfolded rather than folded into an error.
    pub fn fold_constants(&mut self) -> usize {
        let lines = std::mem::take(&mut self.lines);
        let mut optimized: Vec<Line> = Vec::with_capacity(lines.len());
        let mut removed = 0;
        let mut i = 0;
        while i < lines.len() {
            if i + 2 < lines.len() {
                let folded = match (push_value(&lines[i]), push_value(&lines[i + 1])) {
                    (Some(a), Some(b)) => fold_op(&lines[i + 2], a, b),
                    _ => None,
                };
                if let Some(result) = folded {
                    let arg: Rc<str> = Rc::from(result.to_string());
                    optimized.push(Line::Instr(Instr::new("PUSH", vec![arg])));
                    removed += 2;
                    i += 3;
                    continue;
                }
            }
            optimized.push(lines[i].clone());
            i += 1;
        }
        self.lines = optimized;
        removed
    }

    /// Run all four passes in their fixed order and serialize the
    /// result.
    pub fn optimize(&mut self) -> (String, Stats) {
        let original = self.significant_len();
        let mut stats = Stats::default();
        stats.push_pop_removed = self.eliminate_push_pop();
        stats.redundant_loads_removed = self.fold_redundant_loads();
        stats.dead_code_removed = self.eliminate_dead_code();
        stats.constant_folding_removed = self.fold_constants();
        stats.total_removed = original - self.significant_len();
        (self.source(), stats)
    }
}

fn opcode_of(line: &Line) -> Option<Opcode> {
    line.instr().and_then(|instr| Opcode::from_token(instr.opcode()))
}

fn is_bare(line: &Line, opcode: Opcode) -> bool {
    match line.instr() {
        Some(instr) => opcode_of(line) == Some(opcode) && instr.args().is_empty(),
        None => false,
    }
}

fn is_push(line: &Line) -> bool {
    match line.instr() {
        Some(instr) => opcode_of(line) == Some(Opcode::Push) && !instr.args().is_empty(),
        None => false,
    }
}

fn is_jump(line: &Line) -> bool {
    match line.instr() {
        Some(instr) => opcode_of(line) == Some(Opcode::Jmp) && !instr.args().is_empty(),
        None => false,
    }
}

fn load_var(line: &Line) -> Option<Rc<str>> {
    let instr = line.instr()?;
    if Opcode::from_token(instr.opcode()) != Some(Opcode::Load) {
        return None;
    }
    instr.arg(0).cloned()
}

fn is_exact_load(instr: &Instr, var_name: &Rc<str>) -> bool {
    Opcode::from_token(instr.opcode()) == Some(Opcode::Load)
        && instr.args().len() == 1
        && instr.args()[0] == *var_name
}

fn push_value(line: &Line) -> Option<i64> {
    let instr = line.instr()?;
    if Opcode::from_token(instr.opcode()) != Some(Opcode::Push) {
        return None;
    }
    instr.arg(0)?.parse::<i64>().ok()
}

fn fold_op(line: &Line, a: i64, b: i64) -> Option<i64> {
    match line.instr() {
        Some(instr) if instr.args().is_empty() => match Opcode::from_token(instr.opcode())? {
            Opcode::Add => Some(Operation::sum(a, b)),
            Opcode::Sub => Some(Operation::subtract(a, b)),
            Opcode::Mul => Some(Operation::multiply(a, b)),
            Opcode::Div => Operation::divide(a, b).ok(),
            Opcode::Mod => Operation::modulo(a, b).ok(),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimizer(text: &str) -> Optimizer {
        Optimizer::new(Program::load(text))
    }

    #[test]
    fn test_push_pop_single_scan_does_not_rescan() {
        let mut opt = optimizer("PUSH 1\nPUSH 2\nPOP\nPOP");
        assert_eq!(opt.eliminate_push_pop(), 2);
        // The deletion made PUSH 1 adjacent to the second POP, but a
        // single scan leaves the new pair alone.
        assert_eq!(opt.source(), "PUSH 1\nPOP");
    }

    #[test]
    fn test_push_pop_keeps_comment_between() {
        let mut opt = optimizer("PUSH 1\n# keep\nPOP");
        assert_eq!(opt.eliminate_push_pop(), 0);
        assert_eq!(opt.source(), "PUSH 1\n# keep\nPOP");
    }

    #[test]
    fn test_dead_code_drops_blanks_without_counting() {
        let mut opt = optimizer("HALT\n\n# gone\nPUSH 1\nend:\nPUSH 2");
        assert_eq!(opt.eliminate_dead_code(), 1);
        assert_eq!(opt.source(), "HALT\nend:\nPUSH 2");
    }

    #[test]
    fn test_jump_without_target_is_not_terminal() {
        let mut opt = optimizer("JMP\nPUSH 1");
        assert_eq!(opt.eliminate_dead_code(), 0);
        assert_eq!(opt.source(), "JMP\nPUSH 1");
    }

    #[test]
    fn test_pass_output_stays_classified() {
        let mut opt = optimizer("PUSH 1\nPOP\nend:\nHALT");
        assert_eq!(opt.eliminate_push_pop(), 2);
        assert_eq!(opt.lines().len(), 2);
        assert!(!opt.lines()[0].is_executable());
        assert!(opt.lines()[1].is_executable());
    }

    #[test]
    fn test_fold_skips_zero_divisor() {
        let mut opt = optimizer("PUSH 1\nPUSH 0\nDIV");
        assert_eq!(opt.fold_constants(), 0);
        assert_eq!(opt.source(), "PUSH 1\nPUSH 0\nDIV");
    }

    #[test]
    fn test_fold_uses_floor_division() {
        let mut opt = optimizer("PUSH -7\nPUSH 2\nDIV");
        assert_eq!(opt.fold_constants(), 2);
        assert_eq!(opt.source(), "PUSH -4");
    }

    #[test]
    fn test_fold_requires_adjacency() {
        let mut opt = optimizer("PUSH 1\n# note\nPUSH 2\nADD");
        assert_eq!(opt.fold_constants(), 0);
    }
}
