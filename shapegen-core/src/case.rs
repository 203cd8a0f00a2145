//! Case conversion helpers used for generated names.

/// Uppercase the first character (e.g., "hero" -> "Hero").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character (e.g., "Hero" -> "hero").
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "all_posts-query" -> "AllPostsQuery").
///
/// Words are split on `_`, `-`, `.` and whitespace; the rest of each word is kept as is.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .map(capitalize)
        .collect()
}

/// Convert a type name to a constant identifier (e.g., "AWSDateTime" -> "AWSDATETIME").
///
/// A trailing `!` is dropped and separators become `_`.
pub fn to_constant_case(s: &str) -> String {
    s.trim_end_matches('!')
        .chars()
        .map(|c| if c == '-' || c == '.' || c.is_whitespace() { '_' } else { c })
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hero"), "Hero");
        assert_eq!(capitalize("Hero"), "Hero");
        assert_eq!(capitalize("allPosts"), "AllPosts");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Droid"), "droid");
        assert_eq!(decapitalize("AsDroid"), "asDroid");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("all_posts"), "AllPosts");
        assert_eq!(to_pascal_case("get-post.query"), "GetPostQuery");
        assert_eq!(to_pascal_case("create post"), "CreatePost");
        assert_eq!(to_pascal_case("hElLo"), "HElLo");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_constant_case() {
        assert_eq!(to_constant_case("Date"), "DATE");
        assert_eq!(to_constant_case("ID!"), "ID");
        assert_eq!(to_constant_case("AWSDateTime"), "AWSDATETIME");
        assert_eq!(to_constant_case("geo-point"), "GEO_POINT");
    }
}
