//! Search request and response envelopes.

use std::fmt;

use reminders_model_rs::models::Record;
use serde::{Deserialize, Serialize};

use crate::ast::LogicNode;

/// A field records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupField {
    Priority,
    List,
    Tag,
    DueDate,
}

impl GroupField {
    pub const ALL: [GroupField; 4] = [
        GroupField::Priority,
        GroupField::List,
        GroupField::Tag,
        GroupField::DueDate,
    ];

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Priority => "priority",
            GroupField::List => "list",
            GroupField::Tag => "tag",
            GroupField::DueDate => "dueDate",
        }
    }

    /// Looks a field up by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket size for date grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Granularity::Day, Granularity::Week, Granularity::Month]
            .into_iter()
            .find(|granularity| granularity.as_str().eq_ignore_ascii_case(name))
    }
}

/// One level of grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchGrouping {
    pub field: GroupField,

    /// Only meaningful for [`GroupField::DueDate`]; defaults to days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
}

impl SearchGrouping {
    pub fn new(field: GroupField) -> Self {
        Self {
            field,
            granularity: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }
}

/// A field records can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Priority,
    List,
    Tag,
    Title,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Priority,
        SortField::List,
        SortField::Tag,
        SortField::Title,
        SortField::DueDate,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Priority => "priority",
            SortField::List => "list",
            SortField::Tag => "tag",
            SortField::Title => "title",
            SortField::DueDate => "dueDate",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Looks a field up by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSortDescriptor {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SearchSortDescriptor {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Page window. Signed so that out-of-range input can be clamped instead of rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl SearchPagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }
}

/// A complete search request.
///
/// `include_completed` and `lists` select which records the snapshot store
/// hands to the engine; the rest drive the engine itself.
///
/// # Example
///
/// ```
/// use reminders_query_rs::SearchRequest;
///
/// let request: SearchRequest = serde_json::from_str(
///     r#"{"logic":{"clause":{"field":"priority","op":"equals","value":"high"}},
///         "sort":[{"field":"dueDate","direction":"desc"}],
///         "pagination":{"limit":10}}"#,
/// ).unwrap();
/// assert_eq!(request.pagination.unwrap().limit, Some(10));
/// assert!(!request.include_completed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<LogicNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<SearchGrouping>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SearchSortDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<SearchPagination>,

    #[serde(default)]
    pub include_completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logic(mut self, logic: LogicNode) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn with_group_by(mut self, group_by: Vec<SearchGrouping>) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn with_sort(mut self, sort: Vec<SearchSortDescriptor>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pagination(mut self, limit: Option<i64>, offset: Option<i64>) -> Self {
        self.pagination = Some(SearchPagination::new(limit, offset));
        self
    }

    pub fn with_include_completed(mut self, include_completed: bool) -> Self {
        self.include_completed = include_completed;
        self
    }

    pub fn with_lists<I, S>(mut self, lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists = Some(lists.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// A named bucket of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGroup {
    pub field: String,
    pub value: String,
    pub count: usize,
    pub member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SearchGroup>>,
}

/// The result of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub records: Vec<Record>,
    pub total_count: usize,
    pub returned_count: usize,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<SearchGroup>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, SearchRequest::default());
        assert!(!request.include_completed);
    }

    #[test]
    fn test_request_wire_names() {
        let request: SearchRequest = serde_json::from_str(
            r#"{
                "groupBy": [{"field": "dueDate", "granularity": "week"}, {"field": "tag"}],
                "sort": [{"field": "createdAt"}],
                "includeCompleted": true,
                "lists": ["Work"],
                "query": "milk"
            }"#,
        )
        .unwrap();

        let group_by = request.group_by.unwrap();
        assert_eq!(group_by[0].field, GroupField::DueDate);
        assert_eq!(group_by[0].granularity, Some(Granularity::Week));
        assert_eq!(group_by[1].granularity, None);
        assert_eq!(
            request.sort.unwrap()[0],
            SearchSortDescriptor::asc(SortField::CreatedAt)
        );
        assert!(request.include_completed);
        assert_eq!(request.lists.unwrap(), vec!["Work"]);
        assert_eq!(request.query.as_deref(), Some("milk"));
    }

    #[test]
    fn test_unknown_group_field_rejected() {
        let result: Result<SearchRequest, _> =
            serde_json::from_str(r#"{"groupBy":[{"field":"title"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let response = SearchResponse::default();
        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("records"));
        assert!(object.contains_key("totalCount"));
        assert!(object.contains_key("returnedCount"));
        assert!(object.contains_key("hasMore"));
        assert!(!object.contains_key("limit"));
        assert!(!object.contains_key("offset"));
        assert!(!object.contains_key("groups"));
    }

    #[test]
    fn test_group_serializes_member_ids() {
        let group = SearchGroup {
            field: "priority".to_string(),
            value: "high".to_string(),
            count: 1,
            member_ids: vec!["1".to_string()],
            children: None,
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["memberIds"][0], "1");
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(GroupField::from_name("DUEDATE"), Some(GroupField::DueDate));
        assert_eq!(SortField::from_name("updatedat"), Some(SortField::UpdatedAt));
        assert_eq!(Granularity::from_name("Month"), Some(Granularity::Month));
        assert_eq!(SortDirection::from_name("descending"), Some(SortDirection::Desc));
        assert_eq!(SortField::from_name("notes"), None);
    }
}
