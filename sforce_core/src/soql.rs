//! Builders for the fixed SOQL statements issued by the tools.
//!
//! Object and field names are interpolated as given. Only string literals in
//! `WHERE` clauses are escaped.

/// `select COUNT() from <sobject>`
pub fn count(sobject: &str) -> String {
    format!("select COUNT() from {}", sobject)
}

/// `select <fields> from <sobject> limit <limit>`
pub fn projection(fields: &str, sobject: &str, limit: u32) -> String {
    format!("select {} from {} limit {}", fields, sobject, limit)
}

/// `SELECT <fields> FROM <sobject> WHERE a = 'x' AND b = 'y'`
pub fn find(sobject: &str, fields: &[&str], filter: &[(&str, &str)]) -> String {
    let mut soql = format!("SELECT {} FROM {}", fields.join(", "), sobject);

    if !filter.is_empty() {
        let conditions: Vec<String> = filter
            .iter()
            .map(|(field, value)| format!("{} = '{}'", field, escape_literal(value)))
            .collect();
        soql.push_str(" WHERE ");
        soql.push_str(&conditions.join(" AND "));
    }

    soql
}

/// Escapes a value for use inside a single-quoted SOQL string literal.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
