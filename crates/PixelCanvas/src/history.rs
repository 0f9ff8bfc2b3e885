/// Manages the Undo/Redo history of the pixel buffer.
///
/// This implementation keeps full snapshots. The top of the undo stack is always
/// the current state, committed after each finished edit, so a fresh manager
/// should receive a baseline commit of the initial state.
///
/// `undo()` returns the state to restore to: the entry *below* the one being
/// undone. `redo()` returns the state it brings back.
pub struct HistoryManager<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    pub max_history: usize,
}

impl<T: Clone + PartialEq> HistoryManager<T> {
    /// Creates a new HistoryManager with a specified limit.
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_history.min(64)),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Helper to check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Helper to check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The state at the top of the undo stack.
    pub fn current(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    /// Records a state AFTER an edit completes.
    ///
    /// Returns false when `state` equals the current top and nothing was recorded.
    pub fn commit(&mut self, state: T) -> bool {
        if self.current() == Some(&state) {
            return false;
        }
        self.undo_stack.push(state);
        // Drop oldest, but always keep the current state.
        let limit = self.max_history.max(1);
        if self.undo_stack.len() > limit {
            let excess = self.undo_stack.len() - limit;
            self.undo_stack.drain(..excess);
        }
        self.redo_stack.clear(); // New timeline branch
        true
    }

    /// Performs Undo.
    ///
    /// Returns the state to restore, or `None` if only the baseline is left.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        let undone = self.undo_stack.pop()?;
        self.redo_stack.push(undone);
        self.undo_stack.last()
    }

    /// Performs Redo.
    ///
    /// Returns the state to restore, or `None` if nothing was undone.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next);
        self.undo_stack.last()
    }

    /// Forgets everything and starts over from `baseline`.
    pub fn reset(&mut self, baseline: T) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_returns_the_entry_below() {
        let mut history = HistoryManager::new(10);
        history.reset(0);
        history.commit(1);
        history.commit(2);

        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some(&0));
    }

    #[test]
    fn redo_returns_the_restored_entry() {
        let mut history = HistoryManager::new(10);
        history.reset(0);
        history.commit(1);
        history.undo();

        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn new_commit_discards_redo_branch() {
        let mut history = HistoryManager::new(10);
        history.reset(0);
        history.commit(1);
        history.undo();
        history.commit(5);

        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&0));
    }

    #[test]
    fn duplicate_commit_is_skipped() {
        let mut history = HistoryManager::new(10);
        history.reset(3);
        assert!(!history.commit(3));
        assert!(!history.can_undo());
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = HistoryManager::new(3);
        history.reset(0);
        for i in 1..=5 {
            history.commit(i);
        }
        assert_eq!(history.undo(), Some(&4));
        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.undo(), None);
    }
}
