use super::Address;
use crate::lang::Line;
use std::collections::HashMap;
use std::rc::Rc;

/// ## Loaded program
///
/// The positional instruction table and the label table, rebuilt fresh
/// on every load. Labels resolve to the integer position of the line
/// they were declared on; a duplicated label keeps its last
/// declaration. Jump targets that are not labels may be literal
/// integer positions, which is why non-executable lines stay in the
/// table as placeholders.
#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<Line>,
    labels: HashMap<Rc<str>, Address>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Parse program text. Never fails: instruction-shape problems are
    /// deferred until execution reaches the offending line, so a syntax
    /// error in a branch that is never taken goes unreported.
    pub fn load(text: &str) -> Program {
        let mut lines: Vec<Line> = vec![];
        let mut labels: HashMap<Rc<str>, Address> = HashMap::new();
        for (address, raw) in text.trim().split('\n').enumerate() {
            let line = Line::from_str(raw);
            if let Line::Label { name, .. } = &line {
                labels.insert(name.clone(), address);
            }
            lines.push(line);
        }
        Program { lines, labels }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, address: Address) -> Option<&Line> {
        self.lines.get(address)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn labels(&self) -> &HashMap<Rc<str>, Address> {
        &self.labels
    }

    /// Resolve a branch target: label table first, then a literal
    /// integer position.
    pub fn resolve(&self, target: &str) -> Option<Address> {
        match self.labels.get(target) {
            Some(&address) => Some(address),
            None => target.parse::<Address>().ok(),
        }
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;
        for line in &self.lines {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
            first = false;
        }
        Ok(())
    }
}
