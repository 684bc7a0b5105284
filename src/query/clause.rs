//! Clause builders
//!
//! Quoting helpers plus the FROM and WHERE clause builders shared by every
//! explore query kind. Builders return `None` when the clause is absent so
//! the caller can join fragments without producing stray whitespace.
//!
//! Values are wrapped but never escaped: embedded `"` or `'` characters are
//! passed through as-is, and callers are expected to supply values that do
//! not contain unescaped delimiters.

use crate::query::ast::{Tag, TagOperator, Target};

/// Whether a value is written as a `/regex/` literal.
///
/// This is a lexical convention shared by measurements and tag values: the
/// value must start and end with `/` and be at least two characters long.
pub fn is_regex_literal(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('/') && value.ends_with('/')
}

/// Quote an identifier (measurement, policy, tag key) with double quotes.
/// Regex literals are returned unchanged.
pub fn quote_identifier(name: &str) -> String {
    if is_regex_literal(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}

/// Quote a literal value with single quotes. Regex literals are returned
/// unchanged.
pub fn quote_literal(value: &str) -> String {
    if is_regex_literal(value) {
        value.to_string()
    } else {
        format!("'{}'", value)
    }
}

/// Build `FROM [<policy>.]<measurement>` for a target.
///
/// Returns `None` when the measurement is empty, whatever the policy.
pub fn from_clause(target: &Target) -> Option<String> {
    if target.measurement.is_empty() {
        return None;
    }

    let measurement = quote_identifier(&target.measurement);
    Some(match target.effective_policy() {
        Some(policy) => format!("FROM {}.{}", quote_identifier(policy), measurement),
        None => format!("FROM {}", measurement),
    })
}

/// Render one tag as `"<key>" <op> <value>`
pub fn tag_condition(tag: &Tag) -> String {
    let op = tag.operator();
    let value = match op {
        TagOperator::RegexMatch => tag.value.clone(),
        TagOperator::Eq => quote_literal(&tag.value),
    };
    format!("{} {} {}", quote_identifier(&tag.key), op, value)
}

/// Build `WHERE <cond> AND <cond> ...` from the tags, in order.
///
/// Every tag whose key equals `exclude_key` is skipped. Returns `None` when
/// no tag remains.
pub fn where_clause(tags: &[Tag], exclude_key: Option<&str>) -> Option<String> {
    let conditions: Vec<String> = tags
        .iter()
        .filter(|tag| exclude_key != Some(tag.key.as_str()))
        .map(tag_condition)
        .collect();

    if conditions.is_empty() {
        None
    } else {
        Some(format!("WHERE {}", conditions.join(" AND ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_regex_literal() {
        assert!(is_regex_literal("/.*/"));
        assert!(is_regex_literal("/server.*/"));
        assert!(is_regex_literal("//"));

        assert!(!is_regex_literal("/"));
        assert!(!is_regex_literal("/cpu"));
        assert!(!is_regex_literal("cpu/"));
        assert!(!is_regex_literal("cpu"));
        assert!(!is_regex_literal(""));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_identifier("cpu"), "\"cpu\"");
        assert_eq!(quote_identifier("/$var/"), "/$var/");
        assert_eq!(quote_literal("se1"), "'se1'");
        assert_eq!(quote_literal("/se.*/"), "/se.*/");

        // Embedded delimiters pass through untouched
        assert_eq!(quote_literal("it's"), "'it's'");
    }

    #[test]
    fn test_from_clause() {
        assert_eq!(from_clause(&Target::new("")), None);
        assert_eq!(from_clause(&Target::new("").policy("one_week")), None);
        assert_eq!(from_clause(&Target::new("cpu")).as_deref(), Some("FROM \"cpu\""));
        assert_eq!(from_clause(&Target::new("/.*/")).as_deref(), Some("FROM /.*/"));
        assert_eq!(
            from_clause(&Target::new("cpu").policy("one_week")).as_deref(),
            Some("FROM \"one_week\".\"cpu\"")
        );
        assert_eq!(
            from_clause(&Target::new("cpu").policy("default")).as_deref(),
            Some("FROM \"cpu\"")
        );
        assert_eq!(
            from_clause(&Target::new("/cpu.*/").policy("one_week")).as_deref(),
            Some("FROM \"one_week\"./cpu.*/")
        );
    }

    #[test]
    fn test_where_clause_preserves_order() {
        let tags = vec![
            Tag::new("host", "server1"),
            Tag::new("app", "/mail.*/"),
            Tag::new("dc", "eu"),
        ];

        assert_eq!(
            where_clause(&tags, None).as_deref(),
            Some("WHERE \"host\" = 'server1' AND \"app\" =~ /mail.*/ AND \"dc\" = 'eu'")
        );
    }

    #[test]
    fn test_where_clause_exclusion() {
        let tags = vec![
            Tag::new("host", "server1"),
            Tag::new("app", "email"),
            Tag::new("dc", "eu"),
        ];

        assert_eq!(
            where_clause(&tags, Some("app")).as_deref(),
            Some("WHERE \"host\" = 'server1' AND \"dc\" = 'eu'")
        );
        assert_eq!(
            where_clause(&tags, Some("dc")).as_deref(),
            Some("WHERE \"host\" = 'server1' AND \"app\" = 'email'")
        );
        assert_eq!(where_clause(&tags[1..2], Some("app")), None);
        assert_eq!(where_clause(&[], None), None);
    }
}
