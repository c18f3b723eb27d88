//! Catalog listing query builder
//!
//! Translates raw query parameters into a MongoDB filter document plus
//! pagination, in a fixed order: search, then field filters, then
//! pagination. The same filter document backs both the page fetch and
//! the independent matching count.

use mongodb::bson::{Bson, Document, doc};
use std::collections::HashMap;

/// Fixed page size for the public catalog listing
pub const RESULTS_PER_PAGE: i64 = 8;

/// Parameter names consumed by the search and pagination stages
const RESERVED_KEYS: [&str; 3] = ["keyword", "limit", "page"];

/// Comparison suffix allow-list
const OPERATOR_SUFFIXES: [(&str, &str); 4] =
    [("gt", "$gt"), ("gte", "$gte"), ("lt", "$lt"), ("lte", "$lte")];

/// A parsed catalog query: filter document plus page number
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    filter: Document,
    page: i64,
}

impl ProductQuery {
    /// Build a query from raw request parameters.
    ///
    /// Keys are processed in sorted order so the resulting document is
    /// deterministic regardless of map iteration order.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut filter = Document::new();

        // Search stage: case-insensitive substring match on the name.
        if let Some(keyword) = params.get("keyword") {
            if !keyword.is_empty() {
                filter.insert(
                    "name",
                    doc! { "$regex": regex::escape(keyword), "$options": "i" },
                );
            }
        }

        // Filter stage: everything except the reserved keys.
        let mut keys: Vec<&String> = params
            .keys()
            .filter(|k| !RESERVED_KEYS.contains(&k.as_str()))
            .collect();
        keys.sort();

        for key in keys {
            let value = &params[key];
            match split_bracketed(key) {
                Some((field, suffix)) => match operator_for(suffix) {
                    Some(operator) => apply_operator(&mut filter, field, operator, value),
                    // Unknown suffixes become a literal equality
                    // constraint on the bracketed name as written.
                    None => {
                        filter.insert(key.clone(), value.clone());
                    }
                },
                None => {
                    filter.insert(key.clone(), scalar(value));
                }
            }
        }

        // Pagination stage: absent or unparsable page means page 1.
        let page = params
            .get("page")
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Self { filter, page }
    }

    /// Filter document shared by the page fetch and the count
    pub fn filter(&self) -> &Document {
        &self.filter
    }

    /// Requested page, 1-based
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Documents to skip for the requested page
    pub fn skip(&self) -> u64 {
        ((self.page - 1) * RESULTS_PER_PAGE) as u64
    }

    /// Page size
    pub fn limit(&self) -> i64 {
        RESULTS_PER_PAGE
    }
}

/// Split `field[suffix]` into its parts
fn split_bracketed(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    if !key.ends_with(']') || open == 0 {
        return None;
    }
    let field = &key[..open];
    let suffix = &key[open + 1..key.len() - 1];
    Some((field, suffix))
}

/// Map an allow-listed suffix to its MongoDB operator
fn operator_for(suffix: &str) -> Option<&'static str> {
    OPERATOR_SUFFIXES
        .iter()
        .find(|(name, _)| *name == suffix)
        .map(|(_, operator)| *operator)
}

/// Add a comparison to the field's operator document, merging with any
/// operator already present (e.g. `price[gte]` and `price[lte]`).
fn apply_operator(filter: &mut Document, field: &str, operator: &'static str, value: &str) {
    let number = match parse_number(value) {
        Some(number) => number,
        // Non-numeric comparison values degrade to string equality
        // on the bare field.
        None => {
            filter.insert(field.to_string(), value.to_string());
            return;
        }
    };

    match filter.get_document_mut(field) {
        Ok(operators) => {
            operators.insert(operator.to_string(), number);
        }
        Err(_) => {
            let mut operators = Document::new();
            operators.insert(operator.to_string(), number);
            filter.insert(field.to_string(), operators);
        }
    }
}

/// Bare values compare numerically when they parse as numbers
fn scalar(value: &str) -> Bson {
    parse_number(value).unwrap_or_else(|| Bson::String(value.to_string()))
}

fn parse_number(value: &str) -> Option<Bson> {
    if let Ok(int) = value.parse::<i64>() {
        return Some(Bson::Int64(int));
    }
    if let Ok(float) = value.parse::<f64>() {
        return Some(Bson::Double(float));
    }
    None
}
