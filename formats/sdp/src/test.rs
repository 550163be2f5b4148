#[cfg(test)]
mod tests {
    use crate::{
        attributes::{
            SDPAttribute, SDPTrivialAttribute, fmtp::FormatParameters, rtpmap::RtpMap,
        },
        errors::SDPError,
        session::{
            SDPMediaDescription, SDPMediaLine, SDPMediaType, SDPTimeInformation,
            SessionDescription,
        },
    };

    // what ffmpeg sends when announcing an aac stream
    const ANNOUNCE_SDP: &str = "v=0\n\
o=- 0 0 IN IP4 127.0.0.1\n\
s=No Name\n\
c=IN IP4 127.0.0.1\n\
t=0 0\n\
a=tool:libavformat 60.16.100\n\
m=audio 0 RTP/AVP 97\n\
b=AS:128\n\
a=rtpmap:97 MPEG4-GENERIC/44100/2\n\
a=fmtp:97 profile-level-id=1;mode=AAC-hbr;sizelength=13;indexlength=3;indexdeltalength=3; config=121056E500\n\
a=control:streamid=0\n";

    #[test]
    fn test_unmarshal_announce() {
        let sdp: SessionDescription = ANNOUNCE_SDP.parse().unwrap();
        assert_eq!(sdp.version, 0);
        assert_eq!(sdp.session_name, "No Name");
        assert_eq!(sdp.origin.unicast_address, "127.0.0.1");
        assert_eq!(sdp.time_information, vec![SDPTimeInformation::default()]);
        assert_eq!(sdp.attributes.len(), 1);
        assert_eq!(sdp.media_descriptions.len(), 1);

        let media = &sdp.media_descriptions[0];
        assert_eq!(media.media_line.media_type, SDPMediaType::Audio);
        assert_eq!(media.payload_type(), Some(97));
        assert_eq!(
            media.rtpmap(),
            Some(&RtpMap {
                payload_type: 97,
                encoding_name: "MPEG4-GENERIC".to_owned(),
                clock_rate: 44100,
                encoding_params: Some(2),
            })
        );
        let fmtp = media.fmtp().unwrap();
        assert_eq!(fmtp.payload_type, 97);
        assert_eq!(fmtp.get("SizeLength"), Some("13"));
        assert_eq!(fmtp.get("config"), Some("121056E500"));
        assert_eq!(fmtp.get("streamtype"), None);
        assert_eq!(media.attribute("control"), Some("streamid=0"));
        assert_eq!(media.attribute("range"), None);
    }

    #[test]
    fn test_marshal() {
        let mut media = SDPMediaDescription::new(SDPMediaLine {
            media_type: SDPMediaType::Audio,
            port: 0,
            protocol: "RTP/AVP".to_owned(),
            formats: vec!["96".to_owned()],
        });
        media.attributes = vec![
            SDPAttribute::RtpMap("96 mpeg4-generic/48000/2".parse().unwrap()),
            SDPAttribute::Fmtp(FormatParameters {
                payload_type: 96,
                params: vec![
                    ("profile-level-id".to_owned(), "1".to_owned()),
                    ("mode".to_owned(), "AAC-hbr".to_owned()),
                    ("config".to_owned(), "1190".to_owned()),
                ],
            }),
            SDPTrivialAttribute::new("control", Some("trackID=0".to_owned())).into(),
        ];
        let sdp = SessionDescription {
            attributes: vec![SDPTrivialAttribute::new("control", Some("*".to_owned())).into()],
            media_descriptions: vec![media],
            ..Default::default()
        };

        let text = "v=0\r\n\
o=- 0 0 IN IP4 127.0.0.1\r\n\
s=Stream\r\n\
t=0 0\r\n\
a=control:*\r\n\
m=audio 0 RTP/AVP 96\r\n\
a=rtpmap:96 mpeg4-generic/48000/2\r\n\
a=fmtp:96 profile-level-id=1; mode=AAC-hbr; config=1190\r\n\
a=control:trackID=0\r\n";
        assert_eq!(format!("{}", sdp), text);
        assert_eq!(text.parse::<SessionDescription>().unwrap(), sdp);
    }

    #[test]
    fn test_flag_attribute() {
        let attribute: SDPAttribute = "recvonly".parse().unwrap();
        assert_eq!(attribute.name(), "recvonly");
        assert_eq!(format!("{}", attribute), "recvonly");

        let sdp: SessionDescription = "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\nm=video 0 RTP/AVP 96\r\na=sendonly\r\n"
            .parse()
            .unwrap();
        assert_eq!(sdp.media_descriptions[0].attribute("sendonly"), Some(""));
        assert!(sdp.time_information.is_empty());
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            "o=- 0 0 IN IP4 127.0.0.1\r\n".parse::<SessionDescription>(),
            Err(SDPError::MissingLine('v'))
        ));
        assert!(matches!(
            "v=0\r\ns=x\r\n".parse::<SessionDescription>(),
            Err(SDPError::MissingLine('o'))
        ));
        assert!(matches!(
            "v=0\r\no=- 0 IN IP4 127.0.0.1\r\ns=x\r\n".parse::<SessionDescription>(),
            Err(SDPError::SyntaxError(_))
        ));
        assert!(matches!(
            "v=0\r\no=- 0 0 IN IP4 127.0.0.1\r\ns=x\r\nm=audio 0 RTP/AVP 96\r\na=rtpmap:96 mpeg4-generic\r\n"
                .parse::<SessionDescription>(),
            Err(SDPError::InvalidAttributeLine(_))
        ));
        assert!("96 L16/abc".parse::<RtpMap>().is_err());
        assert!("96 mode".parse::<FormatParameters>().is_err());
        assert!("x mode=1".parse::<FormatParameters>().is_err());
    }
}
