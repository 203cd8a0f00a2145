//! Package derivation from source file locations.

use thiserror::Error;

/// Directory layout GraphQL sources must follow for package derivation.
pub const PACKAGE_CONVENTION: &str = "src/main/graphql/...";

/// Error returned when a path does not follow [`PACKAGE_CONVENTION`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot derive a package from `{path}`: files must be organized like src/main/graphql/...")]
pub struct PackagePathMalformed {
    pub path: String,
}

/// Derive a dotted package name from a GraphQL source file path.
///
/// Scanning from the end, the first `graphql` segment whose second
/// predecessor is `src` marks the package root. The segments between it and
/// the file name form the package. Both `/` and `\` separate segments.
///
/// # Examples
///
/// ```
/// use shapegen_core::format_package_name;
///
/// let package = format_package_name("app/src/main/graphql/com/foo/Query.graphql").unwrap();
/// assert_eq!(package, "com.foo");
/// ```
pub fn format_package_name(path: &str) -> Result<String, PackagePathMalformed> {
    let parts: Vec<&str> = path.split(['/', '\\']).collect();

    (2..parts.len())
        .rev()
        .find(|&i| parts[i - 2] == "src" && parts[i] == "graphql")
        .map(|i| {
            let after = &parts[i + 1..];
            after[..after.len().saturating_sub(1)].join(".")
        })
        .ok_or_else(|| PackagePathMalformed {
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_package_name() {
        assert_eq!(
            format_package_name("/work/app/src/main/graphql/com/foo/Query.graphql").unwrap(),
            "com.foo"
        );
        assert_eq!(
            format_package_name("src/debug/graphql/com/example/api/posts.graphql").unwrap(),
            "com.example.api"
        );
    }

    #[test]
    fn test_file_directly_under_marker() {
        assert_eq!(format_package_name("src/main/graphql/Query.graphql").unwrap(), "");
    }

    #[test]
    fn test_backslash_separators() {
        assert_eq!(
            format_package_name(r"C:\app\src\main\graphql\com\foo\Query.graphql").unwrap(),
            "com.foo"
        );
    }

    #[test]
    fn test_innermost_marker_wins() {
        assert_eq!(
            format_package_name("src/main/graphql/vendored/src/main/graphql/com/bar/Q.graphql")
                .unwrap(),
            "com.bar"
        );
    }

    #[test]
    fn test_missing_marker() {
        let err = format_package_name("app/graphql/com/foo/Query.graphql").unwrap_err();
        assert_eq!(err.path, "app/graphql/com/foo/Query.graphql");
        assert!(err.to_string().contains("src/main/graphql/..."));
    }

    #[test]
    fn test_graphql_must_be_two_segments_after_src() {
        assert!(format_package_name("src/graphql/com/foo/Query.graphql").is_err());
        assert!(format_package_name("src/a/b/graphql/Query.graphql").is_err());
    }
}
