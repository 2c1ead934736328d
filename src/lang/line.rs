use std::rc::Rc;

/// An executable instruction: an opcode token and its argument tokens.
///
/// Tokens are kept as text. Nothing is validated here; a malformed
/// instruction only reports an error if execution ever reaches it.
#[derive(Debug, Clone)]
pub struct Instr {
    opcode: String,
    args: Vec<Rc<str>>,
}

impl Instr {
    pub fn new(opcode: &str, args: Vec<Rc<str>>) -> Instr {
        Instr {
            opcode: opcode.to_string(),
            args,
        }
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    pub fn args(&self) -> &[Rc<str>] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&Rc<str>> {
        self.args.get(index)
    }
}

impl std::fmt::Display for Instr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One line of program text at a fixed position.
///
/// Blank, comment, and label lines are retained as non-executable
/// placeholders so that numeric addresses stay stable. Their original
/// text is preserved for serialization; instructions are normalized
/// to single-space-separated tokens.
#[derive(Debug, Clone)]
pub enum Line {
    Blank(String),
    Comment(String),
    Label { name: Rc<str>, raw: String },
    Instr(Instr),
}

impl Line {
    pub fn from_str(s: &str) -> Line {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Line::Blank(s.to_string());
        }
        if trimmed.starts_with('#') {
            return Line::Comment(s.to_string());
        }
        if trimmed.ends_with(':') {
            let name = trimmed[..trimmed.len() - 1].trim();
            return Line::Label {
                name: name.into(),
                raw: s.to_string(),
            };
        }
        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some(opcode) => Line::Instr(Instr::new(opcode, tokens.map(Rc::from).collect())),
            None => Line::Blank(s.to_string()),
        }
    }

    pub fn instr(&self) -> Option<&Instr> {
        match self {
            Line::Instr(instr) => Some(instr),
            _ => None,
        }
    }

    pub fn is_executable(&self) -> bool {
        match self {
            Line::Instr(_) => true,
            _ => false,
        }
    }

    /// True for lines counted by the optimizer's size statistics:
    /// everything except blanks and comments. Labels count.
    pub fn is_significant(&self) -> bool {
        match self {
            Line::Blank(_) | Line::Comment(_) => false,
            _ => true,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Line::Blank(raw) => write!(f, "{}", raw),
            Line::Comment(raw) => write!(f, "{}", raw),
            Line::Label { raw, .. } => write!(f, "{}", raw),
            Line::Instr(instr) => write!(f, "{}", instr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment() {
        assert!(!Line::from_str("   ").is_executable());
        assert!(!Line::from_str("# a comment").is_executable());
        assert!(!Line::from_str("  # indented").is_significant());
    }

    #[test]
    fn test_label_name_is_trimmed() {
        match Line::from_str("  loop :  ") {
            Line::Label { name, raw } => {
                assert_eq!(&*name, "loop");
                assert_eq!(raw, "  loop :  ");
            }
            line => panic!("not a label: {:?}", line),
        }
    }

    #[test]
    fn test_instruction_tokens() {
        match Line::from_str("  PUSH   42  ") {
            Line::Instr(instr) => {
                assert_eq!(instr.opcode(), "PUSH");
                assert_eq!(instr.args().len(), 1);
                assert_eq!(instr.to_string(), "PUSH 42");
            }
            line => panic!("not an instruction: {:?}", line),
        }
    }

    #[test]
    fn test_raw_text_preserved() {
        assert_eq!(Line::from_str(" # note ").to_string(), " # note ");
        assert_eq!(Line::from_str("end:").to_string(), "end:");
    }
}
