use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Grows and shrinks at the tail only. Popping an empty stack is an
/// `Option`, not an error; the machine's underflow policies live at
/// the call sites.
pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }

    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }

    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        if self.vec.len() > self.max_len() {
            Err(error!(OutOfMemory; self.overflow_message))
        } else {
            Ok(())
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }

    /// Pop two values; `None` leaves the stack untouched when fewer
    /// than two are present. The second of the pair was pushed last.
    pub fn pop_2(&mut self) -> Option<(T, T)> {
        if self.vec.len() < 2 {
            return None;
        }
        let two = self.vec.pop()?;
        let one = self.vec.pop()?;
        Some((one, two))
    }
}
