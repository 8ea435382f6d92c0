// Column conventions shared by reads and writes.
//
// Ingredients and steps live in one TEXT column each, joined with '|'.
// Published dates come back from SQLite as text and are shown as 02/Jan/2021.

use crate::error::{RecipeError, Result};
use chrono::NaiveDate;

pub const LIST_DELIMITER: char = '|';

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d/%b/%Y";

/// Split a stored list column into its items, keeping order.
/// An empty column is an empty list.
pub fn split_list(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Join list items for storage. Items containing the delimiter or empty
/// items would not read back the same, so they are rejected.
pub fn join_list(field: &'static str, items: &[String]) -> Result<String> {
    if items.iter().any(|item| item.is_empty()) {
        return Err(RecipeError::validation(field, "items must not be empty"));
    }
    if let Some(bad) = items.iter().find(|item| item.contains(LIST_DELIMITER)) {
        return Err(RecipeError::validation(
            field,
            format!("item '{}' contains the reserved '{}' character", bad, LIST_DELIMITER),
        ));
    }
    Ok(items.join(&LIST_DELIMITER.to_string()))
}

/// Turn a stored timestamp into the display date.
///
/// Only the first ten characters (YYYY-MM-DD) are looked at, so RFC 3339
/// values and SQLite's `CURRENT_TIMESTAMP` text both work.
pub fn format_published_date(stored: &str) -> Result<String> {
    let date_part = stored
        .get(..10)
        .ok_or_else(|| RecipeError::InvalidDate(stored.to_string()))?;

    let date = NaiveDate::parse_from_str(date_part, STORED_DATE_FORMAT)
        .map_err(|_| RecipeError::InvalidDate(stored.to_string()))?;

    Ok(date.format(DISPLAY_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("eggs|flour|milk"), vec!["eggs", "flour", "milk"]);
        assert_eq!(split_list("x"), vec!["x"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_split_keeps_empty_middle_items() {
        assert_eq!(split_list("a||b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_join_list() {
        let items = vec!["eggs".to_string(), "flour".to_string()];
        assert_eq!(join_list("ingredients", &items).unwrap(), "eggs|flour");
        assert_eq!(join_list("steps", &[]).unwrap(), "");
    }

    #[test]
    fn test_join_rejects_delimiter() {
        let items = vec!["salt|pepper".to_string()];
        let err = join_list("ingredients", &items).unwrap_err();

        match err {
            RecipeError::Validation { field, .. } => assert_eq!(field, "ingredients"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_join_rejects_empty_item() {
        let only_empty = vec![String::new()];
        assert!(join_list("steps", &only_empty).unwrap_err().is_validation());

        let empty_middle = vec!["a".to_string(), String::new(), "b".to_string()];
        assert!(join_list("steps", &empty_middle).is_err());
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_published_date("2021-01-02T00:00:00Z").unwrap(), "02/Jan/2021");
    }

    #[test]
    fn test_format_sqlite_timestamp() {
        assert_eq!(format_published_date("2023-11-30 18:45:12").unwrap(), "30/Nov/2023");
    }

    #[test]
    fn test_format_rejects_garbage() {
        assert!(matches!(
            format_published_date("yesterday"),
            Err(RecipeError::InvalidDate(_))
        ));
        assert!(format_published_date("2021-13-45T00:00:00Z").is_err());
    }
}
