//! HTTP span naming helpers.

use uuid::Uuid;

/// Replace UUID path segments so routes have bounded cardinality.
pub(super) fn normalise_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
