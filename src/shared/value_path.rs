use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FIELD_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)+")
        .expect("field reference pattern is a valid regex")
});

pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

pub fn referenced_field_paths(expression: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for found in FIELD_REFERENCE.find_iter(expression) {
        let segments: Vec<&str> = found
            .as_str()
            .split('.')
            .skip_while(|segment| segment.starts_with('$'))
            .collect();
        if segments.is_empty() {
            continue;
        }
        let path = segments.join(".");
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        let trimmed = expression.trim();
        if is_identifier(trimmed) {
            paths.push(trimmed.to_string());
        }
    }
    paths
}

fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
