//! RTSP specific use of session descriptions, RFC 2326 C.1

use attribute::RtspSDPControl;
use sdp_formats::session::SDPMediaDescription;

pub mod attribute;

pub const SDP_CONTENT_TYPE: &str = "application/sdp";

/// Control url of a media description, `None` when absent or malformed.
pub fn media_control(media: &SDPMediaDescription) -> Option<RtspSDPControl> {
    media.attribute(attribute::CONTROL)?.parse().ok()
}
