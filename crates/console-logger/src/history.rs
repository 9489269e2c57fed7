//! Bounded line history

use std::collections::VecDeque;

/// Circular buffer of formatted log lines; the oldest line is dropped once
/// `capacity` is reached.
#[derive(Debug, Clone)]
pub struct LineHistory {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LineHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_oldest_when_full() {
        let mut history = LineHistory::new(3);
        for i in 0..5 {
            history.push(format!("line {}", i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = LineHistory::new(0);
        history.push("x".to_string());
        assert!(history.is_empty());
    }
}
