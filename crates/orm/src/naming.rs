//! Naming conventions used to derive default keys and junction tables

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SEPARATED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]+(.)").expect("separator pattern is valid"));

/// `SomeModel` -> `some_model`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_lowercase());
        } else if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `some_model` -> `SomeModel`
///
/// Only guaranteed to invert [`to_snake_case`] for capitalized word concatenations.
pub fn to_camel_case(name: &str) -> String {
    let joined = SEPARATED.replace_all(name, |caps: &Captures| caps[1].to_uppercase());
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Default foreign key pointing at a model: `User` -> `user_id`
pub fn foreign_key(model_name: &str) -> String {
    format!("{}_id", to_snake_case(model_name))
}

/// Default junction table for two tables: sorted, then joined by `_`
pub fn junction_table(left: &str, right: &str) -> String {
    let mut tables = [left, right];
    tables.sort_unstable();
    tables.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Simple"), "simple");
        assert_eq!(to_snake_case("SomeModel"), "some_model");
        assert_eq!(to_snake_case("AModel"), "a_model");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("simple"), "Simple");
        assert_eq!(to_camel_case("some_model"), "SomeModel");
        assert_eq!(to_camel_case("a_model"), "AModel");
        assert_eq!(to_camel_case("user-account id"), "UserAccountId");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_round_trip_on_capitalized_words() {
        for name in ["User", "UserAccount", "AModel", "HttpRequestLog"] {
            assert_eq!(to_camel_case(&to_snake_case(name)), name);
        }
    }

    #[test]
    fn test_foreign_key() {
        assert_eq!(foreign_key("User"), "user_id");
        assert_eq!(foreign_key("BlogPost"), "blog_post_id");
    }

    #[test]
    fn test_junction_table_is_sorted() {
        assert_eq!(junction_table("users", "accounts"), "accounts_users");
        assert_eq!(junction_table("accounts", "users"), "accounts_users");
    }
}
