use super::LineNumber;

pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            code: self.code,
            line_number: self.line_number,
            message: message.to_string(),
        }
    }
}

/// The fatal error kinds. Every one of these stops the current run;
/// stack underflow and similar irregularities are defined no-op
/// behaviors, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnknownInstruction,
    SyntaxError,
    DivisionByZero,
    ModuloByZero,
    UndefinedVariable,
    InvalidJumpTarget,
    InvalidCallTarget,
    OutOfMemory,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::UnknownInstruction => "UNKNOWN INSTRUCTION",
            ErrorCode::SyntaxError => "SYNTAX ERROR",
            ErrorCode::DivisionByZero => "DIVISION BY ZERO",
            ErrorCode::ModuloByZero => "MODULO BY ZERO",
            ErrorCode::UndefinedVariable => "UNDEFINED VARIABLE",
            ErrorCode::InvalidJumpTarget => "INVALID JUMP TARGET",
            ErrorCode::InvalidCallTarget => "INVALID CALL TARGET",
            ErrorCode::OutOfMemory => "OUT OF MEMORY",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN LINE {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}
