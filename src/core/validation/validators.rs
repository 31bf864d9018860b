//! Reusable field validators
//!
//! These validators are used by the built-in field types. Each takes the
//! field label and value and ignores values of a kind it does not check, so
//! they can be chained.

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

/// Validator: value must be a string
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(format!("{} must be text.", field))
        }
    }
}

/// Validator: value must be a number
pub fn number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_number() {
            Ok(())
        } else {
            Err(format!("{} must be a number.", field))
        }
    }
}

/// Validator: value must be a boolean
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(format!("{} must be true or false.", field))
        }
    }
}

/// Validator: number must be a whole number
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            Err(format!("{} must be a whole number.", field))
        }
        _ => Ok(()),
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: Option<usize>,
    max: Option<usize>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };

        let len = s.chars().count();
        match (min, max) {
            (Some(min), _) if len < min => Err(format!(
                "{} must be at least {} characters long.",
                field, min
            )),
            (_, Some(max)) if len > max => Err(format!(
                "{} cannot be longer than {} characters.",
                field, max
            )),
            _ => Ok(()),
        }
    }
}

/// Validator: number must be within range
pub fn value_range(
    min: Option<f64>,
    max: Option<f64>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(num) = value.as_f64() else {
            return Ok(());
        };

        match (min, max) {
            (Some(min), _) if num < min => Err(format!("{} must be at least {}.", field, min)),
            (_, Some(max)) if num > max => Err(format!("{} cannot exceed {}.", field, max)),
            _ => Ok(()),
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.iter().any(|a| a == s) {
                return Err(format!(
                    "{} must be one of: {}.",
                    field,
                    allowed.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// Validator: string must match a regular expression
pub fn pattern(regex: Regex) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !regex.is_match(s) {
                return Err(format!("{} has an invalid format.", field));
            }
        }
        Ok(())
    }
}

/// Validator: string must be an email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !s.validate_email() {
                return Err(format!("{} must be a valid email address.", field));
            }
        }
        Ok(())
    }
}

/// Validator: date must match format
pub fn date_format(
    format: String,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if chrono::NaiveDate::parse_from_str(s, &format).is_err() {
                return Err(format!("{} must be a date formatted as {}.", field, format));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === kind validators ===

    #[test]
    fn test_string_rejects_number() {
        let v = string();
        assert_eq!(v("Name", &json!(3)), Err("Name must be text.".to_string()));
        assert!(v("Name", &json!("x")).is_ok());
    }

    #[test]
    fn test_number_rejects_string() {
        let v = number();
        assert!(v("Age", &json!("12")).is_err());
        assert!(v("Age", &json!(12)).is_ok());
        assert!(v("Age", &json!(1.5)).is_ok());
    }

    #[test]
    fn test_boolean_rejects_string() {
        let v = boolean();
        assert!(v("Active", &json!("true")).is_err());
        assert!(v("Active", &json!(false)).is_ok());
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let v = integer();
        assert!(v("Count", &json!(1.5)).is_err());
        assert!(v("Count", &json!(-3)).is_ok());
        assert!(v("Count", &json!("x")).is_ok());
    }

    // === string_length() ===

    #[test]
    fn test_string_length_too_short() {
        let v = string_length(Some(3), None);
        assert_eq!(
            v("Name", &json!("ab")),
            Err("Name must be at least 3 characters long.".to_string())
        );
    }

    #[test]
    fn test_string_length_too_long() {
        let v = string_length(None, Some(5));
        assert_eq!(
            v("Name", &json!("abcdef")),
            Err("Name cannot be longer than 5 characters.".to_string())
        );
    }

    #[test]
    fn test_string_length_bounds_inclusive() {
        let v = string_length(Some(3), Some(5));
        assert!(v("Name", &json!("abc")).is_ok());
        assert!(v("Name", &json!("abcde")).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let v = string_length(None, Some(3));
        assert!(v("Name", &json!("été")).is_ok());
    }

    #[test]
    fn test_string_length_non_string_passthrough() {
        let v = string_length(Some(5), Some(10));
        assert!(v("Age", &json!(42)).is_ok());
    }

    // === value_range() ===

    #[test]
    fn test_value_range_below_min() {
        let v = value_range(Some(0.0), None);
        assert_eq!(v("Price", &json!(-1)), Err("Price must be at least 0.".to_string()));
    }

    #[test]
    fn test_value_range_above_max() {
        let v = value_range(None, Some(100.0));
        assert_eq!(v("Score", &json!(101)), Err("Score cannot exceed 100.".to_string()));
        assert!(v("Score", &json!(100)).is_ok());
    }

    #[test]
    fn test_value_range_non_number_passthrough() {
        let v = value_range(Some(1.0), Some(2.0));
        assert!(v("Score", &json!("high")).is_ok());
    }

    // === in_list() ===

    #[test]
    fn test_in_list_accepts_member() {
        let v = in_list(vec!["draft".into(), "published".into()]);
        assert!(v("Status", &json!("draft")).is_ok());
    }

    #[test]
    fn test_in_list_rejects_other() {
        let v = in_list(vec!["draft".into(), "published".into()]);
        assert_eq!(
            v("Status", &json!("deleted")),
            Err("Status must be one of: draft, published.".to_string())
        );
    }

    // === pattern() ===

    #[test]
    fn test_pattern_match() {
        let v = pattern(Regex::new("^[a-z-]+$").unwrap());
        assert!(v("Slug", &json!("hello-world")).is_ok());
        assert!(v("Slug", &json!("Hello World")).is_err());
    }

    // === email() ===

    #[test]
    fn test_email_valid() {
        let v = email();
        assert!(v("Email", &json!("ada@example.com")).is_ok());
    }

    #[test]
    fn test_email_invalid() {
        let v = email();
        assert_eq!(
            v("Email", &json!("not-an-email")),
            Err("Email must be a valid email address.".to_string())
        );
    }

    // === date_format() ===

    #[test]
    fn test_date_format_valid() {
        let v = date_format("%Y-%m-%d".to_string());
        assert!(v("Birthday", &json!("2024-01-15")).is_ok());
    }

    #[test]
    fn test_date_format_invalid() {
        let v = date_format("%Y-%m-%d".to_string());
        let result = v("Birthday", &json!("15/01/2024"));
        assert_eq!(
            result,
            Err("Birthday must be a date formatted as %Y-%m-%d.".to_string())
        );
    }

    #[test]
    fn test_date_format_custom() {
        let v = date_format("%d/%m/%Y".to_string());
        assert!(v("Date", &json!("15/01/2024")).is_ok());
    }
}
