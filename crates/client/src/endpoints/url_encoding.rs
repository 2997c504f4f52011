//! Percent-encoding for index names used as URL path segments.
//!
//! An index name is always a single path segment. Characters that would
//! split it (`/`), start a query or fragment (`?`, `#`), or be decoded twice
//! (`%`) are encoded.
//!
//! ```
//! use autoindex_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("logs20240615"), "logs20240615");
//! assert_eq!(encode_path_segment("a/b"), "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded in a path segment (RFC 3986 section 3.3 plus
/// characters with special meaning in cluster REST paths).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b'[')
    .add(b']');

/// Percent-encode `segment` for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_index_names_unchanged() {
        assert_eq!(encode_path_segment("logs20240615"), "logs20240615");
        assert_eq!(encode_path_segment("app-logs_20240615"), "app-logs_20240615");
        assert_eq!(encode_path_segment("metrics.v2-20240615"), "metrics.v2-20240615");
    }

    #[test]
    fn test_slash_cannot_escape_segment() {
        assert_eq!(encode_path_segment("../_cluster"), "..%2F_cluster");
    }

    #[test]
    fn test_query_and_fragment_encoded() {
        assert_eq!(encode_path_segment("logs?pretty"), "logs%3Fpretty");
        assert_eq!(encode_path_segment("logs#x"), "logs%23x");
    }

    #[test]
    fn test_percent_and_comma_encoded() {
        assert_eq!(encode_path_segment("100%"), "100%25");
        assert_eq!(encode_path_segment("a,b"), "a%2Cb");
    }
}
