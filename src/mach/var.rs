use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Unordered name-to-value bindings. Insertion and update both go
/// through `store`; reading an unbound name is the fatal
/// `UndefinedVariable` error.
#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, i64>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get(&self, var_name: &str) -> Option<i64> {
        self.vars.get(var_name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &i64)> {
        self.vars.iter()
    }

    pub fn fetch(&self, var_name: &str) -> Result<i64> {
        match self.vars.get(var_name) {
            Some(&val) => Ok(val),
            None => Err(error!(UndefinedVariable; var_name)),
        }
    }

    pub fn store(&mut self, var_name: &Rc<str>, value: i64) -> Result<()> {
        if self.vars.len() > u16::max_value() as usize {
            return Err(error!(OutOfMemory; "TOO MANY VARIABLES"));
        }
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(var_name.clone(), value);
            }
        }
        Ok(())
    }
}
