//! Composable record predicates.

use crate::record::Record;
use crate::similarity::similarity;

/// Default minimum similarity score for [`Filter::fuzzy`].
pub const DEFAULT_FUZZY_CUTOFF: f64 = 60.0;

/// A boolean test over a single record.
///
/// Implemented by [`Filter`] and by any `Fn(&Record) -> bool` closure, so
/// collection queries accept either.
pub trait Predicate {
    /// Whether the record satisfies the predicate.
    fn matches(&self, record: &Record) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Record) -> bool,
{
    fn matches(&self, record: &Record) -> bool {
        self(record)
    }
}

/// Declarative record filter.
///
/// Leaf filters read one field and evaluate to `false` when that field is
/// missing or has the wrong type. [`Filter::All`] over no children is `true`
/// and [`Filter::Any`] over no children is `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// String field contains any of the needles, ignoring case.
    ContainsAny {
        field: String,
        /// Stored lowercased.
        needles: Vec<String>,
    },
    /// Numeric field strictly greater than the threshold.
    Above { field: String, threshold: f64 },
    /// Numeric field strictly less than the threshold.
    Below { field: String, threshold: f64 },
    /// Numeric field within `[min, max]`.
    Range { field: String, min: f64, max: f64 },
    /// String field similar to the term with a score of at least `cutoff`.
    Fuzzy {
        field: String,
        term: String,
        cutoff: f64,
    },
    /// Every child matches.
    All(Vec<Filter>),
    /// At least one child matches.
    Any(Vec<Filter>),
    /// The child does not match.
    Not(Box<Filter>),
}

impl Filter {
    /// Match records whose string `field` contains any of `values` as a
    /// case-insensitive substring.
    pub fn contains_any<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::ContainsAny {
            field: field.into(),
            needles: values
                .into_iter()
                .map(|v| v.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Match records whose numeric `field` is strictly above `threshold`.
    pub fn above(field: impl Into<String>, threshold: f64) -> Self {
        Self::Above {
            field: field.into(),
            threshold,
        }
    }

    /// Match records whose numeric `field` is strictly below `threshold`.
    pub fn below(field: impl Into<String>, threshold: f64) -> Self {
        Self::Below {
            field: field.into(),
            threshold,
        }
    }

    /// Match records whose numeric `field` lies in `[min, max]`.
    pub fn range(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::Range {
            field: field.into(),
            min,
            max,
        }
    }

    /// Fuzzy match with [`DEFAULT_FUZZY_CUTOFF`].
    pub fn fuzzy(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::fuzzy_with_cutoff(field, term, DEFAULT_FUZZY_CUTOFF)
    }

    /// Match records whose string `field` scores at least `cutoff` against
    /// `term`. See [`crate::similarity`] for the scoring rules.
    pub fn fuzzy_with_cutoff(
        field: impl Into<String>,
        term: impl Into<String>,
        cutoff: f64,
    ) -> Self {
        Self::Fuzzy {
            field: field.into(),
            term: term.into(),
            cutoff,
        }
    }

    /// Conjunction of all filters. Empty means match everything.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::All(filters.into_iter().collect())
    }

    /// Disjunction of all filters. Empty means match nothing.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Any(filters.into_iter().collect())
    }

    /// Negate a filter.
    pub fn not(filter: Filter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Combine with another filter; both must match.
    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::All(mut filters) => {
                filters.push(other);
                Self::All(filters)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Combine with another filter; either may match.
    pub fn or(self, other: Filter) -> Self {
        match self {
            Self::Any(mut filters) => {
                filters.push(other);
                Self::Any(filters)
            }
            first => Self::Any(vec![first, other]),
        }
    }
}

impl Predicate for Filter {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Self::ContainsAny { field, needles } => record.get_str(field).is_some_and(|raw| {
                let value = raw.to_lowercase();
                needles.iter().any(|n| value.contains(n.as_str()))
            }),
            Self::Above { field, threshold } => record
                .get_number(field)
                .is_some_and(|value| value > *threshold),
            Self::Below { field, threshold } => record
                .get_number(field)
                .is_some_and(|value| value < *threshold),
            Self::Range { field, min, max } => record
                .get_number(field)
                .is_some_and(|value| value >= *min && value <= *max),
            Self::Fuzzy {
                field,
                term,
                cutoff,
            } => record
                .get_str(field)
                .is_some_and(|raw| similarity(raw, term) >= *cutoff),
            Self::All(filters) => filters.iter().all(|f| f.matches(record)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(record)),
            Self::Not(filter) => !filter.matches(record),
        }
    }
}

/// Keep the records that satisfy `predicate`, preserving order.
pub fn filter_records<'a, P>(
    records: impl IntoIterator<Item = &'a Record>,
    predicate: &P,
) -> Vec<Record>
where
    P: Predicate + ?Sized,
{
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect()
}
