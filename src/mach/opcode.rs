/// ## Virtual machine instruction set
///
/// The opcode set is closed; dispatch matches on it exhaustively so a
/// new opcode is a compile-time-checked change everywhere it matters.
/// Operands stay with the instruction text: several opcodes read their
/// argument tokens lazily, and some (`STORE`, `LOAD`, the conditional
/// jumps) only look at them on certain branches.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push a literal value on to the stack.
    Push,
    /// Discard the top of the stack. No-op when empty.
    Pop,
    /// Push a copy of the top of the stack. No-op when empty.
    Dup,

    // *** Arithmetic
    Add,
    Sub,
    Mul,
    /// Floor division. Fails on a zero divisor.
    Div,
    /// Floor modulo. Fails on a zero divisor.
    Mod,
    Neg,

    // *** Comparison, pushing 1 or 0
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // *** Variables
    /// Pop the top of the stack into a named variable.
    Store,
    /// Push the value of a named variable.
    Load,

    // *** Branch control
    /// Unconditional branch to a label or literal position.
    Jmp,
    /// Pop a condition and branch if it is zero.
    Jz,
    /// Pop a condition and branch if it is not zero.
    Jnz,
    /// Push the return address and branch.
    Call,
    /// Pop the call stack into the program counter. With an empty call
    /// stack this halts the program; it is not an error.
    Ret,

    // *** Statements
    Halt,
    /// Emit the top of the stack without popping; 0 when empty.
    Print,
    /// Request one integer of input; 0 on parse failure or end of input.
    Read,
}

impl Opcode {
    /// Case-sensitive exact match against the instruction set.
    pub fn from_token(token: &str) -> Option<Opcode> {
        use Opcode::*;
        match token {
            "PUSH" => Some(Push),
            "POP" => Some(Pop),
            "DUP" => Some(Dup),
            "ADD" => Some(Add),
            "SUB" => Some(Sub),
            "MUL" => Some(Mul),
            "DIV" => Some(Div),
            "MOD" => Some(Mod),
            "NEG" => Some(Neg),
            "EQ" => Some(Eq),
            "NEQ" => Some(NotEq),
            "LT" => Some(Lt),
            "GT" => Some(Gt),
            "LE" => Some(LtEq),
            "GE" => Some(GtEq),
            "STORE" => Some(Store),
            "LOAD" => Some(Load),
            "JMP" => Some(Jmp),
            "JZ" => Some(Jz),
            "JNZ" => Some(Jnz),
            "CALL" => Some(Call),
            "RET" => Some(Ret),
            "HALT" => Some(Halt),
            "PRINT" => Some(Print),
            "READ" => Some(Read),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Push => write!(f, "PUSH"),
            Pop => write!(f, "POP"),
            Dup => write!(f, "DUP"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Mod => write!(f, "MOD"),
            Neg => write!(f, "NEG"),
            Eq => write!(f, "EQ"),
            NotEq => write!(f, "NEQ"),
            Lt => write!(f, "LT"),
            Gt => write!(f, "GT"),
            LtEq => write!(f, "LE"),
            GtEq => write!(f, "GE"),
            Store => write!(f, "STORE"),
            Load => write!(f, "LOAD"),
            Jmp => write!(f, "JMP"),
            Jz => write!(f, "JZ"),
            Jnz => write!(f, "JNZ"),
            Call => write!(f, "CALL"),
            Ret => write!(f, "RET"),
            Halt => write!(f, "HALT"),
            Print => write!(f, "PRINT"),
            Read => write!(f, "READ"),
        }
    }
}
