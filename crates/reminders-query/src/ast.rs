//! Logic tree and clause types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::SearchValue;

/// A record attribute a clause can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Title,
    Notes,
    List,
    ListId,
    Priority,
    Tag,
    DueDate,
    CreatedAt,
    UpdatedAt,
    Completed,
    HasDueDate,
    HasNotes,
}

/// How a field's value is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Compared as text.
    String,
    /// Compared as a boolean.
    Bool,
    /// Compared as an instant.
    Date,
    /// Compared as a set of strings.
    Collection,
}

impl SearchField {
    /// Every field, in wire order.
    pub const ALL: [SearchField; 12] = [
        SearchField::Title,
        SearchField::Notes,
        SearchField::List,
        SearchField::ListId,
        SearchField::Priority,
        SearchField::Tag,
        SearchField::DueDate,
        SearchField::CreatedAt,
        SearchField::UpdatedAt,
        SearchField::Completed,
        SearchField::HasDueDate,
        SearchField::HasNotes,
    ];

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Notes => "notes",
            SearchField::List => "list",
            SearchField::ListId => "listId",
            SearchField::Priority => "priority",
            SearchField::Tag => "tag",
            SearchField::DueDate => "dueDate",
            SearchField::CreatedAt => "createdAt",
            SearchField::UpdatedAt => "updatedAt",
            SearchField::Completed => "completed",
            SearchField::HasDueDate => "hasDueDate",
            SearchField::HasNotes => "hasNotes",
        }
    }

    /// Looks a field up by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns how values of this field are compared.
    pub fn kind(&self) -> FieldKind {
        match self {
            SearchField::Title
            | SearchField::Notes
            | SearchField::List
            | SearchField::ListId
            | SearchField::Priority => FieldKind::String,
            SearchField::Completed | SearchField::HasDueDate | SearchField::HasNotes => {
                FieldKind::Bool
            }
            SearchField::DueDate | SearchField::CreatedAt | SearchField::UpdatedAt => {
                FieldKind::Date
            }
            SearchField::Tag => FieldKind::Collection,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Like,
    NotLike,
    Matches,
    NotMatches,
    In,
    NotIn,
    Before,
    After,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Exists,
    NotExists,
    Includes,
    Excludes,
}

impl Operator {
    /// Every operator, in wire order.
    pub const ALL: [Operator; 20] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::Like,
        Operator::NotLike,
        Operator::Matches,
        Operator::NotMatches,
        Operator::In,
        Operator::NotIn,
        Operator::Before,
        Operator::After,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Exists,
        Operator::NotExists,
        Operator::Includes,
        Operator::Excludes,
    ];

    /// Returns the wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::Like => "like",
            Operator::NotLike => "notLike",
            Operator::Matches => "matches",
            Operator::NotMatches => "notMatches",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Before => "before",
            Operator::After => "after",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::GreaterOrEqual => "greaterOrEqual",
            Operator::LessOrEqual => "lessOrEqual",
            Operator::Exists => "exists",
            Operator::NotExists => "notExists",
            Operator::Includes => "includes",
            Operator::Excludes => "excludes",
        }
    }

    /// Looks an operator up by wire name (ignoring case) or symbol.
    pub fn from_name(name: &str) -> Option<Self> {
        let symbolic = match name {
            "=" | "==" => Some(Operator::Equals),
            "!=" | "<>" => Some(Operator::NotEquals),
            "<" => Some(Operator::LessThan),
            ">" => Some(Operator::GreaterThan),
            "<=" => Some(Operator::LessOrEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            "~" => Some(Operator::Matches),
            "!~" => Some(Operator::NotMatches),
            _ => None,
        };
        symbolic.or_else(|| {
            Self::ALL
                .into_iter()
                .find(|op| op.as_str().eq_ignore_ascii_case(name))
        })
    }

    /// Returns true for operators that take no operand.
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Exists | Operator::NotExists)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic `(field, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchClause {
    /// The field under test.
    pub field: SearchField,
    /// The comparison.
    pub op: Operator,
    /// The operand; absent for `exists`/`notExists`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SearchValue>,
}

impl SearchClause {
    /// Creates a clause with an operand.
    pub fn new(field: SearchField, op: Operator, value: impl Into<SearchValue>) -> Self {
        Self {
            field,
            op,
            value: Some(value.into()),
        }
    }

    /// Creates a clause without an operand.
    pub fn unary(field: SearchField, op: Operator) -> Self {
        Self {
            field,
            op,
            value: None,
        }
    }
}

/// A node of the logic tree.
///
/// Several branches may be populated at once; the node then requires all of
/// them to hold. A node with nothing populated is *empty* and matches every
/// record.
///
/// # Example
///
/// ```
/// use reminders_query_rs::{LogicNode, Operator, SearchClause, SearchField};
///
/// let high = LogicNode::clause(SearchClause::new(SearchField::Priority, Operator::Equals, "high"));
/// let open = LogicNode::clause(SearchClause::new(SearchField::Completed, Operator::Equals, false));
/// let node = LogicNode::all(vec![high, open]);
/// assert!(!node.is_empty());
/// assert!(LogicNode::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicNode {
    /// A single clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<SearchClause>,

    /// Every child must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<LogicNode>>,

    /// At least one child must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<LogicNode>>,

    /// Exactly one child must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xor: Option<Vec<LogicNode>>,

    /// The child must not hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<LogicNode>>,
}

impl LogicNode {
    /// Creates a node holding a single clause.
    pub fn clause(clause: SearchClause) -> Self {
        Self {
            clause: Some(clause),
            ..Self::default()
        }
    }

    /// Creates an `all` node.
    pub fn all(children: Vec<LogicNode>) -> Self {
        Self {
            all: Some(children),
            ..Self::default()
        }
    }

    /// Creates an `any` node.
    pub fn any(children: Vec<LogicNode>) -> Self {
        Self {
            any: Some(children),
            ..Self::default()
        }
    }

    /// Creates an `xor` node.
    pub fn xor(children: Vec<LogicNode>) -> Self {
        Self {
            xor: Some(children),
            ..Self::default()
        }
    }

    /// Creates a `not` node.
    pub fn negate(inner: LogicNode) -> Self {
        Self {
            not: Some(Box::new(inner)),
            ..Self::default()
        }
    }

    /// Returns true if the node has no clause and every branch is absent or empty.
    pub fn is_empty(&self) -> bool {
        self.clause.is_none()
            && self.all.as_ref().map_or(true, Vec::is_empty)
            && self.any.as_ref().map_or(true, Vec::is_empty)
            && self.xor.as_ref().map_or(true, Vec::is_empty)
            && self.not.is_none()
    }
}
