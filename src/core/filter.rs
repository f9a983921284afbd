//! Filter rules and per-sink level resolution

use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

/// Arbitrary (category, level) predicate ANDed with the tiered decision
pub type FilterPredicate = Arc<dyn Fn(&str, LogLevel) -> bool + Send + Sync>;

/// One filter rule: which sink it applies to (by registration alias, `None`
/// for any), which categories it applies to (longest-prefix match, `None`
/// for all), and the minimum enabled level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub sink: Option<String>,
    pub category_prefix: Option<String>,
    pub min_level: LogLevel,
}

impl FilterRule {
    pub fn new(
        sink: Option<impl Into<String>>,
        category_prefix: Option<impl Into<String>>,
        min_level: LogLevel,
    ) -> Self {
        Self {
            sink: sink.map(Into::into),
            category_prefix: category_prefix.map(Into::into),
            min_level,
        }
    }

    /// Rule scoped to one sink, all categories
    pub fn for_sink(sink: impl Into<String>, min_level: LogLevel) -> Self {
        Self {
            sink: Some(sink.into()),
            category_prefix: None,
            min_level,
        }
    }

    /// Rule scoped to a category prefix, all sinks
    pub fn for_category(prefix: impl Into<String>, min_level: LogLevel) -> Self {
        Self {
            sink: None,
            category_prefix: Some(prefix.into()),
            min_level,
        }
    }

    fn matches_sink(&self, sink: &str) -> bool {
        self.sink.as_deref() == Some(sink)
    }

    fn prefix_match_len(&self, category: &str) -> Option<usize> {
        match &self.category_prefix {
            Some(prefix) if category.starts_with(prefix.as_str()) => Some(prefix.len()),
            _ => None,
        }
    }
}

/// The complete rule set: static rules plus a global minimum level and an
/// optional predicate.
#[derive(Clone, Default)]
pub struct FilterSet {
    pub min_level: Option<LogLevel>,
    pub rules: Vec<FilterRule>,
    pub predicate: Option<FilterPredicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_predicate(mut self, predicate: FilterPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Resolve whether `level` is enabled for (`sink`, `category`).
    ///
    /// Tiered precedence, highest tier wins; within a prefix tier the
    /// longest matching prefix wins and ties go to the first rule:
    /// 1. sink-scoped rule with a category-prefix match
    /// 2. sink-scoped rule with no category restriction
    /// 3. unscoped rule with a category-prefix match
    /// 4. the global minimum level
    /// 5. the default level (`Information`)
    ///
    /// The predicate, if present, is ANDed over the result.
    pub fn is_enabled(&self, sink: &str, category: &str, level: LogLevel) -> bool {
        if let Some(predicate) = &self.predicate {
            if !predicate(category, level) {
                return false;
            }
        }
        level >= self.effective_level(sink, category)
    }

    /// The minimum level the tiers resolve to for (`sink`, `category`)
    pub fn effective_level(&self, sink: &str, category: &str) -> LogLevel {
        // Tier 1: sink-scoped, category-prefix match, longest prefix wins.
        if let Some(rule) = self.best_prefix_rule(category, |r| r.matches_sink(sink)) {
            return rule.min_level;
        }

        // Tier 2: sink-scoped, no category restriction.
        if let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.matches_sink(sink) && r.category_prefix.is_none())
        {
            return rule.min_level;
        }

        // Tier 3: unscoped, category-prefix match, longest prefix wins.
        if let Some(rule) = self.best_prefix_rule(category, |r| r.sink.is_none()) {
            return rule.min_level;
        }

        // Tier 4/5: global minimum, else the default.
        self.min_level.unwrap_or_default()
    }

    fn best_prefix_rule(
        &self,
        category: &str,
        scope: impl Fn(&FilterRule) -> bool,
    ) -> Option<&FilterRule> {
        let mut best: Option<(usize, &FilterRule)> = None;
        for rule in self.rules.iter().filter(|r| scope(r)) {
            if let Some(len) = rule.prefix_match_len(category) {
                // Strict comparison keeps the first rule on equal length.
                if best.map(|(best_len, _)| len > best_len).unwrap_or(true) {
                    best = Some((len, rule));
                }
            }
        }
        best.map(|(_, rule)| rule)
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("min_level", &self.min_level)
            .field("rules", &self.rules)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
