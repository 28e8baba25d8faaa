use std::collections::BTreeSet;
use std::fmt::Debug;

/// A scalar a predicate compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Int(i64),
    Text(String),
}

impl Operand {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Operand::Int(v) => Some(*v),
            Operand::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Operand::Int(v) => v.to_string(),
            Operand::Text(s) => s.clone(),
        }
    }
}

/// A single typed filter condition over a field `F`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F> {
    Equals { field: F, value: Operand },
    AtLeast { field: F, value: i64 },
    AtMost { field: F, value: i64 },
    /// Matches when the field shares at least one bit with `mask`.
    BitsOverlap { field: F, mask: i64 },
    InSet { field: F, values: BTreeSet<i64> },
    /// Substring match where each space in `pattern` matches any run of characters.
    Contains { field: F, pattern: String },
}

impl<F: Copy> Predicate<F> {
    pub fn field(&self) -> F {
        match self {
            Predicate::Equals { field, .. }
            | Predicate::AtLeast { field, .. }
            | Predicate::AtMost { field, .. }
            | Predicate::BitsOverlap { field, .. }
            | Predicate::InSet { field, .. }
            | Predicate::Contains { field, .. } => *field,
        }
    }

    /// Evaluate this predicate against a value already read from a record.
    pub fn matches(&self, actual: &Operand) -> bool {
        match self {
            Predicate::Equals { value, .. } => actual == value,
            Predicate::AtLeast { value, .. } => actual.as_int().is_some_and(|v| v >= *value),
            Predicate::AtMost { value, .. } => actual.as_int().is_some_and(|v| v <= *value),
            Predicate::BitsOverlap { mask, .. } => actual.as_int().is_some_and(|v| v & mask != 0),
            Predicate::InSet { values, .. } => actual.as_int().is_some_and(|v| values.contains(&v)),
            Predicate::Contains { pattern, .. } => contains_with_gaps(&actual.as_text(), pattern),
        }
    }
}

/// Case-insensitive substring test where spaces in `pattern` are wildcard gaps.
pub fn contains_with_gaps(haystack: &str, pattern: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let mut from = 0;
    for piece in pattern.to_lowercase().split(' ').filter(|p| !p.is_empty()) {
        match haystack[from..].find(piece) {
            Some(at) => from += at + piece.len(),
            None => return false,
        }
    }
    true
}

/// Renders `pattern` as a SQL `LIKE` pattern with the same gap semantics.
pub fn like_pattern(pattern: &str) -> String {
    format!("%{}%", pattern.replace(' ', "%"))
}

/// Records that can be filtered in process expose their fields by name.
pub trait FieldSource<F> {
    fn field_value(&self, field: F) -> Operand;
}

/// A conjunction of predicates. An empty condition constrains nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<F> {
    predicates: Vec<Predicate<F>>,
}

impl<F> Default for Condition<F> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<F: Copy + Debug> Condition<F> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_predicates(predicates: Vec<Predicate<F>>) -> Self {
        Self { predicates }
    }

    pub fn and(mut self, predicate: Predicate<F>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds the predicate produced by `make` only when `value` is present.
    pub fn and_some<T>(self, value: Option<T>, make: impl FnOnce(T) -> Predicate<F>) -> Self {
        match value {
            Some(value) => self.and(make(value)),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[Predicate<F>] {
        &self.predicates
    }

    pub fn is_unconstrained(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<R: FieldSource<F>>(&self, record: &R) -> bool {
        self.predicates
            .iter()
            .all(|p| p.matches(&record.field_value(p.field())))
    }

    /// Splits every set-membership predicate larger than `max_values` into
    /// chunks. A record matches `self` exactly when it matches one of the
    /// returned conditions, and the chunks never overlap.
    pub fn split_sets(&self, max_values: usize) -> Vec<Condition<F>> {
        let max_values = max_values.max(1);
        let oversized = self
            .predicates
            .iter()
            .enumerate()
            .find_map(|(at, predicate)| match predicate {
                Predicate::InSet { field, values } if values.len() > max_values => {
                    Some((at, *field, values))
                }
                _ => None,
            });
        let Some((at, field, values)) = oversized else {
            return vec![self.clone()];
        };

        let values: Vec<i64> = values.iter().copied().collect();
        values
            .chunks(max_values)
            .flat_map(|chunk| {
                let mut piece = self.clone();
                piece.predicates[at] = Predicate::InSet {
                    field,
                    values: chunk.iter().copied().collect(),
                };
                piece.split_sets(max_values)
            })
            .collect()
    }
}
