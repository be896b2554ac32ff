//! The `format` keyword and the built-in format checkers

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::read_string;
use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

fn is_email(text: &str) -> bool {
    // RFC 5321 length limit on the local part
    match text.split_once('@') {
        Some((local, _)) if local.len() <= 64 => EMAIL.is_match(text),
        _ => false,
    }
}

fn is_date(text: &str) -> bool {
    chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

fn is_date_time(text: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(text).is_ok()
}

fn is_uuid(text: &str) -> bool {
    text.len() == 36 && uuid::Uuid::parse_str(text).is_ok()
}

fn is_uri(text: &str) -> bool {
    url::Url::parse(text).is_ok()
}

fn checker(name: &str) -> Option<fn(&str) -> bool> {
    match name {
        "email" => Some(is_email),
        "date" => Some(is_date),
        "date-time" => Some(is_date_time),
        "uuid" => Some(is_uuid),
        "uri" => Some(is_uri),
        _ => None,
    }
}

#[derive(Debug)]
pub struct FormatKeyword {
    format: String,
    check: fn(&str) -> bool,
}

impl Keyword for FormatKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(text) = value.as_str() else {
            return;
        };
        if !(self.check)(text) {
            scope.report(
                "format",
                json!({ "format": self.format }),
                format!("should match format \"{}\"", self.format),
            );
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let Some(format) = read_string(map, "format", path)? else {
        return Ok(Vec::new());
    };
    let check = checker(format).ok_or_else(|| SchemaError::UnknownFormat {
        path: path.to_string(),
        name: format.to_string(),
    })?;
    let keyword: Box<dyn Keyword> = Box::new(FormatKeyword {
        format: format.to_string(),
        check,
    });
    Ok(vec![keyword])
}
