//! `${VAR}` and `${VAR:-default}` expansion for config values

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),

    #[error("Recursive interpolation limit exceeded")]
    RecursionLimit,
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

const MAX_RECURSION_DEPTH: usize = 10;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

pub fn interpolate(input: &str) -> InterpolationResult<String> {
    expand(input, 0)
}

fn expand(input: &str, depth: usize) -> InterpolationResult<String> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(InterpolationError::RecursionLimit);
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for cap in VAR_PATTERN.captures_iter(input) {
        let Some(whole) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];

        output.push_str(&input[last..whole.start()]);
        match std::env::var(var_name) {
            Ok(value) => output.push_str(&value),
            Err(_) => match cap.get(2) {
                Some(default) => output.push_str(&expand(default.as_str(), depth + 1)?),
                None => {
                    return Err(InterpolationError::RequiredVarNotFound(
                        var_name.to_string(),
                    ))
                }
            },
        }
        last = whole.end();
    }

    output.push_str(&input[last..]);

    // A default can itself contain a reference; `[^}]*` stops at its first
    // closing brace, so the remainder only resolves on a second pass.
    if output != input && has_variables(&output) {
        return expand(&output, depth + 1);
    }
    Ok(output)
}

/// Expands every string in a parsed TOML tree in place.
pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate(s)?;
        }
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                interpolate_toml(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn has_variables(input: &str) -> bool {
    VAR_PATTERN.is_match(input)
}
