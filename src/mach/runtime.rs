use super::{Address, Opcode, Operation, Program, Stack, Var};
use crate::error;
use crate::lang::{Error, Instr, Line};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// What the machine needs from its embedder. `Print` and `Input` are
/// the only I/O the language has; everything else is bookkeeping for
/// the driving loop.
#[derive(Debug)]
pub enum Event {
    /// The cycle budget ran out before the program finished. Call
    /// `execute` again to continue, or impose a deadline here.
    Running,
    /// The program halted or ran past the end of the table.
    Stopped,
    /// `PRINT` emitted a value.
    Print(String),
    /// `READ` wants one line of input; answer with `Runtime::input`.
    Input,
    /// A fatal error, reported with the 1-based line number of the
    /// failing instruction. The run cannot be resumed.
    Error(Error),
}

/// ## Execution engine
///
/// A state machine over {running, halted}, driven by the program
/// counter. All state is instance-local: separate `Runtime` values
/// never share anything.
pub struct Runtime {
    program: Program,
    stack: Stack<i64>,
    vars: Var,
    calls: Stack<Address>,
    pc: Address,
    halted: bool,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime {
            program: Program::new(),
            stack: Stack::new("STACK OVERFLOW"),
            vars: Var::new(),
            calls: Stack::new("CALL STACK OVERFLOW"),
            pc: 0,
            halted: false,
        }
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    /// Load program text, discarding any previous program and all
    /// run state.
    pub fn load(&mut self, text: &str) {
        self.program = Program::load(text);
        self.reset();
    }

    /// Clear the run state but keep the loaded program, ready to run
    /// again from the top.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.vars.clear();
        self.calls.clear();
        self.pc = 0;
        self.halted = false;
    }

    /// Stop the program as if it executed `HALT`.
    pub fn interrupt(&mut self) {
        self.halted = true;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn stack(&self) -> &[i64] {
        self.stack.as_slice()
    }

    pub fn variables(&self) -> &Var {
        &self.vars
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run up to `cycles` instruction slots. Non-executable
    /// placeholder lines cost a cycle like everything else.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            if self.halted || self.pc >= self.program.len() {
                return Event::Stopped;
            }
            let instr = match self.program.line(self.pc) {
                Some(Line::Instr(instr)) => instr.clone(),
                Some(_) => {
                    self.pc += 1;
                    continue;
                }
                None => return Event::Stopped,
            };
            let line_number = self.pc + 1;
            match self.step(&instr) {
                Ok(None) => {}
                Ok(Some(event)) => return event,
                Err(error) => {
                    self.halted = true;
                    return Event::Error(error.in_line_number(Some(line_number)));
                }
            }
        }
        Event::Running
    }

    /// Answer a pending `Event::Input`. `None` means end of input;
    /// like an unparseable line, it pushes 0. Does nothing unless the
    /// program counter is sitting on a `READ`.
    pub fn input(&mut self, line: Option<&str>) -> Event {
        let reading = match self.program.line(self.pc) {
            Some(Line::Instr(instr)) => Opcode::from_token(instr.opcode()) == Some(Opcode::Read),
            _ => false,
        };
        if self.halted || !reading {
            return Event::Running;
        }
        let value = match line {
            Some(text) => text.trim().parse::<i64>().unwrap_or(0),
            None => 0,
        };
        let line_number = self.pc + 1;
        match self.stack.push(value) {
            Ok(()) => {
                self.pc += 1;
                Event::Running
            }
            Err(error) => {
                self.halted = true;
                Event::Error(error.in_line_number(Some(line_number)))
            }
        }
    }

    /// Dispatch one instruction. The five control-transfer opcodes set
    /// the program counter themselves, on the no-jump branches too;
    /// every other opcode falls through to the increment at the bottom.
    fn step(&mut self, instr: &Instr) -> Result<Option<Event>> {
        let opcode = match Opcode::from_token(instr.opcode()) {
            Some(opcode) => opcode,
            None => return Err(error!(UnknownInstruction; instr.opcode())),
        };
        use Opcode::*;
        match opcode {
            Push => {
                let value = self.literal(instr)?;
                self.stack.push(value)?;
            }
            Pop => {
                self.stack.pop();
            }
            Dup => {
                if let Some(&top) = self.stack.last() {
                    self.stack.push(top)?;
                }
            }
            Add => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::sum(a, b))?;
                }
            }
            Sub => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::subtract(a, b))?;
                }
            }
            Mul => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::multiply(a, b))?;
                }
            }
            Div => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::divide(a, b)?)?;
                }
            }
            Mod => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::modulo(a, b)?)?;
                }
            }
            Neg => {
                if let Some(a) = self.stack.pop() {
                    self.stack.push(Operation::negate(a))?;
                }
            }
            Eq => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::equal(a, b))?;
                }
            }
            NotEq => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::not_equal(a, b))?;
                }
            }
            Lt => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::less(a, b))?;
                }
            }
            Gt => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::greater(a, b))?;
                }
            }
            LtEq => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::less_equal(a, b))?;
                }
            }
            GtEq => {
                if let Some((a, b)) = self.stack.pop_2() {
                    self.stack.push(Operation::greater_equal(a, b))?;
                }
            }
            Store => {
                // No-op unless there is both a value and a name.
                if let Some(var_name) = instr.arg(0) {
                    if let Some(value) = self.stack.pop() {
                        self.vars.store(var_name, value)?;
                    }
                }
            }
            Load => {
                // LOAD without a name is a quiet no-op.
                if let Some(var_name) = instr.arg(0) {
                    let value = self.vars.fetch(var_name)?;
                    self.stack.push(value)?;
                }
            }
            Jmp => {
                let target = self.target(instr)?;
                self.pc = match self.program.resolve(&target) {
                    Some(address) => address,
                    None => return Err(error!(InvalidJumpTarget; &target)),
                };
                return Ok(None);
            }
            Jz => {
                if let Some(condition) = self.stack.pop() {
                    if condition == 0 {
                        // The target token is only read on the taken
                        // branch; a bad target never fires otherwise.
                        let target = self.target(instr)?;
                        self.pc = match self.program.resolve(&target) {
                            Some(address) => address,
                            None => return Err(error!(InvalidJumpTarget; &target)),
                        };
                        return Ok(None);
                    }
                }
                self.pc += 1;
                return Ok(None);
            }
            Jnz => {
                if let Some(condition) = self.stack.pop() {
                    if condition != 0 {
                        let target = self.target(instr)?;
                        self.pc = match self.program.resolve(&target) {
                            Some(address) => address,
                            None => return Err(error!(InvalidJumpTarget; &target)),
                        };
                        return Ok(None);
                    }
                }
                self.pc += 1;
                return Ok(None);
            }
            Call => {
                self.calls.push(self.pc + 1)?;
                let target = self.target(instr)?;
                self.pc = match self.program.resolve(&target) {
                    Some(address) => address,
                    None => return Err(error!(InvalidCallTarget; &target)),
                };
                return Ok(None);
            }
            Ret => {
                match self.calls.pop() {
                    Some(address) => self.pc = address,
                    None => {
                        // Returning with no caller ends the program.
                        self.halted = true;
                        self.pc += 1;
                    }
                }
                return Ok(None);
            }
            Halt => {
                self.halted = true;
            }
            Print => {
                let value = self.stack.last().copied().unwrap_or(0);
                self.pc += 1;
                return Ok(Some(Event::Print(format!("{}\n", value))));
            }
            Read => {
                // The counter stays put until `input` answers.
                return Ok(Some(Event::Input));
            }
        }
        self.pc += 1;
        Ok(None)
    }

    fn literal(&self, instr: &Instr) -> Result<i64> {
        match instr.arg(0) {
            Some(arg) => arg
                .parse::<i64>()
                .map_err(|_| error!(SyntaxError; arg)),
            None => Err(error!(SyntaxError; "MISSING LITERAL")),
        }
    }

    fn target(&self, instr: &Instr) -> Result<Rc<str>> {
        match instr.arg(0) {
            Some(target) => Ok(target.clone()),
            None => Err(error!(SyntaxError; "MISSING BRANCH TARGET")),
        }
    }
}
