//! Resource paths carried by request urls.

use url::Url;

const TRACK_ID_MARK: &str = "/trackID=";

/// Path of an RTSP url without the leading slash, the query is not part of it.
pub fn rtsp_path(url: &Url) -> String {
    url.path().trim_start_matches('/').to_owned()
}

/// Splits a SETUP url into the stream path and the track id.
///
/// `stream/trackID=N` selects track `N`, `stream/` and `stream` select track 0.
/// Returns `None` when the track id is not a number or the path is empty.
pub fn setup_path(url: &Url) -> Option<(String, usize)> {
    let path = url.path();
    let (path, track_id) = match path.rfind(TRACK_ID_MARK) {
        Some(index) => {
            let track_id = path[index + TRACK_ID_MARK.len()..].parse::<usize>().ok()?;
            (&path[..index], track_id)
        }
        None => (path.strip_suffix('/').unwrap_or(path), 0),
    };

    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some((path.to_owned(), track_id))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{rtsp_path, setup_path};

    fn url(s: &str) -> Url {
        s.parse().unwrap()
    }

    #[test]
    fn test_rtsp_path() {
        assert_eq!(rtsp_path(&url("rtsp://localhost:8554/teststream")), "teststream");
        assert_eq!(
            rtsp_path(&url("rtsp://localhost:8554/test/stream?user=a")),
            "test/stream"
        );
        assert_eq!(rtsp_path(&url("rtsp://localhost:8554")), "");
    }

    #[test]
    fn test_setup_path() {
        assert_eq!(
            setup_path(&url("rtsp://localhost:8554/teststream/trackID=1")),
            Some(("teststream".to_owned(), 1))
        );
        assert_eq!(
            setup_path(&url("rtsp://localhost:8554/teststream/")),
            Some(("teststream".to_owned(), 0))
        );
        assert_eq!(
            setup_path(&url("rtsp://localhost:8554/test/stream?key=v")),
            Some(("test/stream".to_owned(), 0))
        );
        assert_eq!(
            setup_path(&url("rtsp://localhost:8554/teststream/trackID=x")),
            None
        );
        assert_eq!(setup_path(&url("rtsp://localhost:8554/trackID=0")), None);
        assert_eq!(setup_path(&url("rtsp://localhost:8554/")), None);
    }
}
