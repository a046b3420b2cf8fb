//! HTTP date handling (RFC 7231 IMF-fixdate)

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let dt: DateTime<Utc> = time.into();
    dt.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an `If-Modified-Since` style header value.
///
/// Returns `None` for anything that is not a valid date; callers then ignore
/// the header.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether a resource modified at `modified` is unchanged since the client's
/// `If-Modified-Since` value. Sub-second precision is dropped, matching the
/// resolution of the header.
pub fn not_modified_since(modified: SystemTime, if_modified_since: Option<&str>) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_format_http_date() {
        let t = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(format_http_date(t), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let dt = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(dt.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified_since() {
        let t = UNIX_EPOCH + Duration::from_millis(784_111_777_500);
        let header = "Sun, 06 Nov 1994 08:49:37 GMT";
        assert!(not_modified_since(t, Some(header)));
        assert!(!not_modified_since(t + Duration::from_secs(1), Some(header)));
        assert!(!not_modified_since(t, Some("garbage")));
        assert!(!not_modified_since(t, None));
    }
}
