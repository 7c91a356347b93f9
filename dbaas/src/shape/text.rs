//! String casing helpers.

/// Normalize human text into hyphen-delimited lowercase tokens.
///
/// Lowercases, treats `-`/`_` runs as whitespace, trims, and joins the
/// remaining tokens with single hyphens.
///
/// # Examples
/// ```
/// # use dbaas::shape::kebab_case;
/// assert_eq!(
///     kebab_case("  Yet Another__RANDOM    string"),
///     "yet-another-random-string"
/// );
/// ```
pub fn kebab_case(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators_and_whitespace() {
        assert_eq!(
            kebab_case("  Yet Another__RANDOM    string"),
            "yet-another-random-string"
        );
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
        assert_eq!(kebab_case("snake_case_name"), "snake-case-name");
        assert_eq!(kebab_case(""), "");
        assert_eq!(kebab_case("   "), "");
    }
}
