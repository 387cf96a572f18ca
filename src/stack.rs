//! LIFO value stack used by the script interpreter
//!
//! Elements are typed by `T`, so callers get their values back without downcasts.

use crate::error::StackError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Empty)
    }

    /// Top element, if any
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Element at `index` counted from the top: -1 is the top, -size the bottom.
    pub fn top(&self, index: isize) -> Result<&T, StackError> {
        let len = self.items.len() as isize;
        if index >= 0 || index < -len {
            return Err(StackError::IndexOutOfBounds(index));
        }
        Ok(&self.items[(len + index) as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}
