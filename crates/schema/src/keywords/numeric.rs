//! Numeric keywords: `maximum`, `minimum`, their exclusive forms and `multipleOf`

use serde_json::{json, Map, Number, Value};

use super::read_number;
use crate::error::SchemaError;
use crate::traits::{Keyword, Scope};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Comparison {
    AtMost,
    AtLeast,
    Below,
    Above,
}

impl Comparison {
    fn holds(self, actual: f64, limit: f64) -> bool {
        match self {
            Comparison::AtMost => actual <= limit,
            Comparison::AtLeast => actual >= limit,
            Comparison::Below => actual < limit,
            Comparison::Above => actual > limit,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::AtMost => "<=",
            Comparison::AtLeast => ">=",
            Comparison::Below => "<",
            Comparison::Above => ">",
        }
    }

    fn is_exclusive(self) -> bool {
        matches!(self, Comparison::Below | Comparison::Above)
    }
}

/// Inclusive or exclusive numeric bound
#[derive(Debug)]
pub struct BoundKeyword {
    keyword: &'static str,
    comparison: Comparison,
    limit: Number,
}

impl Keyword for BoundKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let (Some(actual), Some(limit)) = (value.as_f64(), self.limit.as_f64()) else {
            return;
        };
        if self.comparison.holds(actual, limit) {
            return;
        }
        let symbol = self.comparison.symbol();
        let params = if self.comparison.is_exclusive() {
            json!({ "comparison": symbol, "limit": self.limit })
        } else {
            json!({ "comparison": symbol, "limit": self.limit, "exclusive": false })
        };
        scope.report(self.keyword, params, format!("should be {} {}", symbol, self.limit));
    }
}

#[derive(Debug)]
pub struct MultipleOfKeyword {
    divisor: Number,
}

impl Keyword for MultipleOfKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let (Some(actual), Some(divisor)) = (value.as_f64(), self.divisor.as_f64()) else {
            return;
        };
        let quotient = actual / divisor;
        if (quotient - quotient.round()).abs() > f64::EPSILON * quotient.abs().max(1.0) {
            scope.report(
                "multipleOf",
                json!({ "multipleOf": self.divisor }),
                format!("should be multiple of {}", self.divisor),
            );
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let mut keywords: Vec<Box<dyn Keyword>> = Vec::new();

    let bounds = [
        ("maximum", Comparison::AtMost),
        ("minimum", Comparison::AtLeast),
        ("exclusiveMaximum", Comparison::Below),
        ("exclusiveMinimum", Comparison::Above),
    ];
    for (keyword, comparison) in bounds {
        if let Some(limit) = read_number(map, keyword, path)? {
            keywords.push(Box::new(BoundKeyword {
                keyword,
                comparison,
                limit,
            }));
        }
    }

    if let Some(divisor) = read_number(map, "multipleOf", path)? {
        if divisor.as_f64().map(|d| d <= 0.0).unwrap_or(true) {
            return Err(SchemaError::InvalidKeyword {
                path: path.to_string(),
                keyword: "multipleOf",
                reason: "expected a number greater than 0".to_string(),
            });
        }
        keywords.push(Box::new(MultipleOfKeyword { divisor }));
    }

    Ok(keywords)
}
