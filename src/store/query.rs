//! Typed condition builder for the email listing query.

use serde::Deserialize;

/// Which subset of the mailbox a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
  #[default]
  All,
  Unread,
  Archived,
}

/// Columns probed by a text search, in bind order.
const SEARCH_COLUMNS: [&str; 7] = [
  "sender_name",
  "sender_email",
  "recipient_name",
  "recipient_email",
  "subject",
  "preview",
  "body",
];

/// One predicate of the listing WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
  Archived,
  NotArchived,
  Unread,
  /// Substring match against every column in [`SEARCH_COLUMNS`].
  TextMatch(String),
}

impl Condition {
  fn sql(&self) -> String {
    match self {
      Condition::Archived => "is_archived = 1".to_string(),
      Condition::NotArchived => "is_archived = 0".to_string(),
      Condition::Unread => "is_read = 0".to_string(),
      Condition::TextMatch(_) => {
        let clauses: Vec<String> = SEARCH_COLUMNS
          .iter()
          .map(|column| format!("{column} LIKE ?"))
          .collect();
        format!("({})", clauses.join(" OR "))
      }
    }
  }

  fn params(&self) -> Vec<String> {
    match self {
      Condition::TextMatch(term) => vec![format!("%{term}%"); SEARCH_COLUMNS.len()],
      _ => Vec::new(),
    }
  }
}

/// Condition set for one listing request.
///
/// Archived mail is only visible under [`ListFilter::Archived`]; both
/// `all` and `unread` exclude it. Conditions are combined with AND.
#[derive(Debug)]
pub struct ListQuery {
  conditions: Vec<Condition>,
}

impl ListQuery {
  /// Compose the conditions for a filter and optional search term.
  ///
  /// The search term is trimmed first; a blank term adds no condition.
  pub fn new(filter: ListFilter, search: Option<&str>) -> Self {
    let mut conditions = Vec::new();
    match filter {
      ListFilter::Archived => conditions.push(Condition::Archived),
      ListFilter::All => conditions.push(Condition::NotArchived),
      ListFilter::Unread => {
        conditions.push(Condition::NotArchived);
        conditions.push(Condition::Unread);
      }
    }
    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
      conditions.push(Condition::TextMatch(term.to_string()));
    }
    ListQuery { conditions }
  }

  /// WHERE clause body; `1 = 1` when no condition applies.
  pub fn where_clause(&self) -> String {
    if self.conditions.is_empty() {
      return "1 = 1".to_string();
    }
    self
      .conditions
      .iter()
      .map(Condition::sql)
      .collect::<Vec<_>>()
      .join(" AND ")
  }

  /// Bind parameters in the order their conditions were appended.
  pub fn params(&self) -> Vec<String> {
    self.conditions.iter().flat_map(Condition::params).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::{Condition, ListFilter, ListQuery};

  #[test]
  fn filters_map_to_expected_conditions() {
    let all = ListQuery::new(ListFilter::All, None);
    assert_eq!(all.where_clause(), "is_archived = 0");
    assert!(all.params().is_empty());

    let unread = ListQuery::new(ListFilter::Unread, None);
    assert_eq!(unread.where_clause(), "is_archived = 0 AND is_read = 0");

    let archived = ListQuery::new(ListFilter::Archived, None);
    assert_eq!(archived.where_clause(), "is_archived = 1");
  }

  #[test]
  fn search_binds_term_once_per_column() {
    let query = ListQuery::new(ListFilter::All, Some("  hello "));
    let params = query.params();
    assert_eq!(params.len(), 7);
    assert!(params.iter().all(|param| param == "%hello%"));
    assert!(query.where_clause().contains("sender_name LIKE ?"));
    assert!(query.where_clause().contains("body LIKE ?"));
  }

  #[test]
  fn blank_search_adds_no_condition() {
    let query = ListQuery::new(ListFilter::All, Some("   "));
    assert_eq!(query.where_clause(), "is_archived = 0");
    assert!(query.params().is_empty());
  }

  #[test]
  fn text_match_condition_parenthesizes_or_group() {
    let condition = Condition::TextMatch("x".to_string());
    let query = ListQuery::new(ListFilter::Archived, Some("x"));
    assert!(query.where_clause().starts_with("is_archived = 1 AND ("));
    assert!(query.where_clause().ends_with(')'));
    assert_eq!(condition.params().len(), 7);
  }
}
