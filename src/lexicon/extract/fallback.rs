//! Ordered-attempt extraction: strategies are tried in priority order and the
//! first one that produces a value wins.

use log::trace;

/// A named, prioritized list of extraction strategies for one field.
pub struct Fallback<'a, T> {
    field: &'static str,
    attempts: Vec<(&'static str, Box<dyn Fn() -> Option<T> + 'a>)>,
}

impl<'a, T> Fallback<'a, T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            attempts: Vec::new(),
        }
    }

    /// Appends a strategy with lower priority than every strategy added before it.
    pub fn attempt(mut self, name: &'static str, strategy: impl Fn() -> Option<T> + 'a) -> Self {
        self.attempts.push((name, Box::new(strategy)));
        self
    }

    /// Runs the strategies in order and returns the first value produced.
    pub fn resolve(self) -> Option<T> {
        for (name, strategy) in &self.attempts {
            if let Some(value) = strategy() {
                trace!("{}: resolved by {}", self.field, name);
                return Some(value);
            }
        }
        trace!("{}: no strategy produced a value", self.field);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn first_success_wins_and_later_attempts_are_not_run() {
        let calls = Cell::new(0);
        let value = Fallback::new("definition")
            .attempt("definition", || None)
            .attempt("gloss", || Some("run"))
            .attempt("never", || {
                calls.set(calls.get() + 1);
                Some("unused")
            })
            .resolve();
        assert_eq!(value, Some("run"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn exhausted_attempts_yield_none() {
        let value: Option<u8> = Fallback::new("etymology").attempt("rich", || None).resolve();
        assert_eq!(value, None);
    }
}
