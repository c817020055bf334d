//! In-memory history backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::history::{normalize_base, History};

#[derive(Debug)]
struct Stack {
    entries: Vec<String>,
    position: usize,
}

/// History kept in process memory, for tests and non-browser hosts.
#[derive(Debug)]
pub struct MemoryHistory {
    base: String,
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    /// Start at `/` under `base`.
    pub fn new(base: &str) -> Self {
        Self::with_location(base, "/")
    }

    /// Start at `location` under `base`.
    pub fn with_location(base: &str, location: &str) -> Self {
        Self {
            base: normalize_base(base),
            stack: Mutex::new(Stack {
                entries: vec![location.to_string()],
                position: 0,
            }),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn base(&self) -> &str {
        &self.base
    }

    fn location(&self) -> String {
        let stack = self.lock();
        stack.entries[stack.position].clone()
    }

    fn push(&self, path: &str) {
        let mut stack = self.lock();
        let next = stack.position + 1;
        stack.entries.truncate(next);
        stack.entries.push(path.to_string());
        stack.position = next;
    }

    fn replace(&self, path: &str) {
        let mut stack = self.lock();
        let position = stack.position;
        stack.entries[position] = path.to_string();
    }

    fn back(&self) -> Option<String> {
        let mut stack = self.lock();
        if stack.position == 0 {
            return None;
        }
        stack.position -= 1;
        Some(stack.entries[stack.position].clone())
    }

    fn forward(&self) -> Option<String> {
        let mut stack = self.lock();
        if stack.position + 1 >= stack.entries.len() {
            return None;
        }
        stack.position += 1;
        Some(stack.entries[stack.position].clone())
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}
