use tracing::debug;

/// A named way of turning tool output into records.
pub struct Strategy<T> {
    pub name: &'static str,
    pub parse: fn(&str) -> Vec<T>,
}

impl<T> Strategy<T> {
    pub const fn new(name: &'static str, parse: fn(&str) -> Vec<T>) -> Self {
        Self { name, parse }
    }
}

/// Runs `strategies` in order and returns the first non-empty result along
/// with the name of the strategy that produced it.
pub fn first_yielding<T>(strategies: &[Strategy<T>], raw: &str) -> Option<(&'static str, Vec<T>)> {
    for strategy in strategies {
        let records = (strategy.parse)(raw);
        if !records.is_empty() {
            debug!(
                strategy = strategy.name,
                records = records.len(),
                "parse strategy matched"
            );
            return Some((strategy.name, records));
        }
        debug!(strategy = strategy.name, "parse strategy yielded nothing");
    }
    None
}
