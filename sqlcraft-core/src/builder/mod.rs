//! Statement builders and the conversion traits shared between them

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::Result;

/// Core trait for all statement builders
pub trait Statement {
    /// Render the accumulated clause state into final SQL text.
    ///
    /// Rendering is pure: calling it twice with no intervening mutation
    /// yields byte-identical text both times.
    fn sql(&self) -> Result<String>;
}

/// Conversion into a list of WHERE predicates.
///
/// Accepts either a single predicate string or a collection of them, so
/// `where_("id = 5")` and `where_(vec!["id = 5", "status = 'x'"])` both
/// work. Predicates are always AND-joined; OR logic belongs inside a single
/// predicate string.
pub trait IntoPredicates {
    fn into_predicates(self) -> Vec<String>;
}

impl IntoPredicates for &str {
    fn into_predicates(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoPredicates for String {
    fn into_predicates(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoPredicates for Vec<&str> {
    fn into_predicates(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

impl IntoPredicates for Vec<String> {
    fn into_predicates(self) -> Vec<String> {
        self
    }
}

impl<const N: usize> IntoPredicates for [&str; N] {
    fn into_predicates(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

// `()` stands in for an absent where specification
impl IntoPredicates for () {
    fn into_predicates(self) -> Vec<String> {
        Vec::new()
    }
}

impl<T> IntoPredicates for Option<T>
where
    T: IntoPredicates,
{
    fn into_predicates(self) -> Vec<String> {
        match self {
            Some(inner) => inner.into_predicates(),
            None => Vec::new(),
        }
    }
}

/// Conversion into an optional SELECT column expression.
///
/// `()` selects everything (`SELECT *`); a string is passed through
/// verbatim as the column expression.
pub trait IntoColumns {
    fn into_columns(self) -> Option<String>;
}

impl IntoColumns for () {
    fn into_columns(self) -> Option<String> {
        None
    }
}

impl IntoColumns for &str {
    fn into_columns(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Option<String> {
        Some(self)
    }
}

impl<T> IntoColumns for Option<T>
where
    T: Into<String>,
{
    fn into_columns(self) -> Option<String> {
        self.map(Into::into)
    }
}

/// JOIN variants.
///
/// `Inner` renders with no kind keyword (a plain `JOIN`); the others prefix
/// their keyword. `Other` carries any caller-supplied keyword verbatim,
/// e.g. `"LEFT OUTER"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Outer,
    Other(String),
}

impl JoinKind {
    fn keyword(&self) -> &str {
        match self {
            JoinKind::Inner => "",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Outer => "OUTER",
            JoinKind::Other(kw) => kw,
        }
    }
}

impl From<&str> for JoinKind {
    fn from(kw: &str) -> Self {
        JoinKind::Other(kw.to_string())
    }
}

impl From<String> for JoinKind {
    fn from(kw: String) -> Self {
        JoinKind::Other(kw)
    }
}

/// One JOIN entry of a SELECT statement
#[derive(Debug, Clone)]
pub(crate) struct JoinClause {
    pub target: String,
    pub predicate: String,
    pub kind: JoinKind,
}

impl JoinClause {
    pub(crate) fn render(&self) -> String {
        let keyword = self.kind.keyword();
        if keyword.is_empty() {
            format!("JOIN {} ON {}", self.target, self.predicate)
        } else {
            format!("{} JOIN {} ON {}", keyword, self.target, self.predicate)
        }
    }
}

/// Join predicates with ` AND `, leaving no trailing connective.
pub(crate) fn and_join(predicates: &[String]) -> String {
    predicates.join(" AND ")
}
