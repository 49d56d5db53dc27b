// src/core/commons.rs

//! Small helpers shared by the core modules.

/// Wraps a value in double quotes, escaping any quotes it already contains.
pub fn wrap_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_value_escapes_inner_quotes() {
        assert_eq!(wrap_value("a;b"), "\"a;b\"");
        assert_eq!(wrap_value("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
