use codec_aac::audio_specific_config::AudioSpecificConfig;
use rtp_formats::codec::{
    RtpDepacketizeError, RtpDepacketizer,
    mpeg4_generic::{RtpMpeg4AudioDepacketizer, parameters::RtpMpeg4AudioParams},
};
use rtsp_formats::sdp_extension::attribute::RtspSDPControl;
use sdp_formats::{
    attributes::{
        SDPAttribute, SDPTrivialAttribute, fmtp::FormatParameters, rtpmap::RtpMap,
    },
    session::{SDPMediaDescription, SDPMediaLine, SDPMediaType},
};
use utils::bytes::{bytes_to_hex, hex_to_bytes};

use crate::errors::{RtspServerError, RtspServerResult};

const MPEG4_GENERIC: &str = "mpeg4-generic";
const AAC_HBR: &str = "AAC-hbr";
const VIDEO_CLOCK_RATE: u32 = 90000;

/// One media track of a stream, immutable once the stream is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtspTrack {
    /// mpeg4-generic audio, RFC 3640
    Mpeg4Audio {
        payload_type: u8,
        sample_rate: u32,
        channel_count: u8,
        size_length: u8,
        index_length: u8,
        index_delta_length: u8,
    },
    /// forwarded as is, packets are never depacketized
    Generic {
        payload_type: u8,
        clock_rate: u32,
        encoding_name: String,
    },
}

impl RtspTrack {
    /// AAC-hbr track with the usual 13/3/3 AU-header layout
    pub fn aac_hbr(payload_type: u8, sample_rate: u32, channel_count: u8) -> Self {
        let params = RtpMpeg4AudioParams::default();
        Self::Mpeg4Audio {
            payload_type,
            sample_rate,
            channel_count,
            size_length: params.size_length,
            index_length: params.index_length,
            index_delta_length: params.index_delta_length,
        }
    }

    pub fn payload_type(&self) -> u8 {
        match self {
            Self::Mpeg4Audio { payload_type, .. } | Self::Generic { payload_type, .. } => {
                *payload_type
            }
        }
    }

    pub fn clock_rate(&self) -> u32 {
        match self {
            Self::Mpeg4Audio { sample_rate, .. } => *sample_rate,
            Self::Generic { clock_rate, .. } => *clock_rate,
        }
    }

    pub fn validate(&self) -> RtspServerResult<()> {
        match self {
            Self::Mpeg4Audio {
                sample_rate,
                channel_count,
                ..
            } => {
                audio_specific_config(*sample_rate, *channel_count)?;
                Ok(())
            }
            Self::Generic { clock_rate, .. } if *clock_rate == 0 => Err(
                RtspServerError::BadRequest("generic track clock rate is zero".to_owned()),
            ),
            Self::Generic { .. } => Ok(()),
        }
    }

    /// Fresh depacketizer state, `None` for tracks forwarded without decoding.
    pub fn depacketizer(&self) -> RtspServerResult<Option<RtpDepacketizer>> {
        match self {
            Self::Mpeg4Audio {
                sample_rate,
                size_length,
                index_length,
                index_delta_length,
                ..
            } => {
                let depacketizer = RtpMpeg4AudioDepacketizer::new(RtpMpeg4AudioParams {
                    sample_rate: *sample_rate,
                    size_length: *size_length,
                    index_length: *index_length,
                    index_delta_length: *index_delta_length,
                })
                .map_err(RtpDepacketizeError::from)?;
                Ok(Some(RtpDepacketizer::Mpeg4Audio(depacketizer)))
            }
            Self::Generic { .. } => Ok(None),
        }
    }

    /// `m=` section publishing this track, `control` is what a client SETUPs.
    pub fn media_description(
        &self,
        control: &RtspSDPControl,
    ) -> RtspServerResult<SDPMediaDescription> {
        let payload_type = self.payload_type();
        let (media_type, rtpmap, fmtp) = match self {
            Self::Mpeg4Audio {
                sample_rate,
                channel_count,
                size_length,
                index_length,
                index_delta_length,
                ..
            } => {
                let config = audio_specific_config(*sample_rate, *channel_count)?
                    .to_bytes()
                    .map_err(|err| RtspServerError::BadRequest(err.to_string()))?;
                let params = [
                    ("profile-level-id", "1".to_owned()),
                    ("mode", AAC_HBR.to_owned()),
                    ("sizelength", size_length.to_string()),
                    ("indexlength", index_length.to_string()),
                    ("indexdeltalength", index_delta_length.to_string()),
                    ("config", bytes_to_hex(&config)),
                ];
                (
                    SDPMediaType::Audio,
                    RtpMap {
                        payload_type,
                        encoding_name: MPEG4_GENERIC.to_owned(),
                        clock_rate: *sample_rate,
                        encoding_params: Some(*channel_count),
                    },
                    Some(FormatParameters {
                        payload_type,
                        params: params
                            .into_iter()
                            .map(|(k, v)| (k.to_owned(), v))
                            .collect(),
                    }),
                )
            }
            Self::Generic {
                clock_rate,
                encoding_name,
                ..
            } => (
                // the clock rate is all a generic track says about its kind
                if *clock_rate == VIDEO_CLOCK_RATE {
                    SDPMediaType::Video
                } else {
                    SDPMediaType::Audio
                },
                RtpMap {
                    payload_type,
                    encoding_name: encoding_name.clone(),
                    clock_rate: *clock_rate,
                    encoding_params: None,
                },
                None,
            ),
        };

        let mut media = SDPMediaDescription::new(SDPMediaLine {
            media_type,
            port: 0,
            protocol: "RTP/AVP".to_owned(),
            formats: vec![payload_type.to_string()],
        });
        media.attributes.push(SDPAttribute::RtpMap(rtpmap));
        if let Some(fmtp) = fmtp {
            media.attributes.push(SDPAttribute::Fmtp(fmtp));
        }
        media
            .attributes
            .push(SDPTrivialAttribute::from(control).into());
        Ok(media)
    }

    /// Track announced by a publisher, the caller still has to [`RtspTrack::validate`] it.
    pub fn from_media_description(media: &SDPMediaDescription) -> RtspServerResult<Self> {
        let payload_type = media
            .payload_type()
            .ok_or_else(|| bad_media("media line without payload type"))?;
        let rtpmap = media
            .rtpmap()
            .filter(|rtpmap| rtpmap.payload_type == payload_type)
            .ok_or_else(|| bad_media("rtpmap is missing"))?;
        if !rtpmap.encoding_name.eq_ignore_ascii_case(MPEG4_GENERIC) {
            return Ok(Self::Generic {
                payload_type,
                clock_rate: rtpmap.clock_rate,
                encoding_name: rtpmap.encoding_name.clone(),
            });
        }

        let fmtp = media
            .fmtp()
            .filter(|fmtp| fmtp.payload_type == payload_type)
            .ok_or_else(|| bad_media("fmtp is missing"))?;
        if let Some(mode) = fmtp.get("mode")
            && !mode.eq_ignore_ascii_case(AAC_HBR)
        {
            return Err(bad_media(&format!("unsupported mode {}", mode)));
        }
        // absent lengths are zero, RFC 3640 4.1
        let length = |key: &str| -> RtspServerResult<u8> {
            fmtp.get(key).map_or(Ok(0), |value| {
                value
                    .parse()
                    .map_err(|_| bad_media(&format!("invalid {}: {}", key, value)))
            })
        };
        let channel_count = match fmtp.get("config") {
            Some(config) => hex_to_bytes(config)
                .and_then(|config| AudioSpecificConfig::from_bytes(&config).ok())
                .and_then(|config| config.channel_count())
                .ok_or_else(|| bad_media(&format!("invalid config: {}", config)))?,
            None => rtpmap.encoding_params.unwrap_or(1),
        };

        Ok(Self::Mpeg4Audio {
            payload_type,
            sample_rate: rtpmap.clock_rate,
            channel_count,
            size_length: length("sizelength")?,
            index_length: length("indexlength")?,
            index_delta_length: length("indexdeltalength")?,
        })
    }
}

fn audio_specific_config(
    sample_rate: u32,
    channel_count: u8,
) -> RtspServerResult<AudioSpecificConfig> {
    AudioSpecificConfig::aac_lc(sample_rate, channel_count).map_err(|err| {
        RtspServerError::BadRequest(format!("unsupported mpeg4 audio track: {}", err))
    })
}

fn bad_media(reason: &str) -> RtspServerError {
    RtspServerError::BadRequest(format!("invalid media description: {}", reason))
}

#[cfg(test)]
mod tests {
    use rtsp_formats::sdp_extension::attribute::RtspSDPControl;
    use sdp_formats::session::SessionDescription;

    use super::RtspTrack;

    #[test]
    fn test_depacketizer() {
        let track = RtspTrack::aac_hbr(97, 44100, 2);
        assert!(track.validate().is_ok());
        let depacketizer = track.depacketizer().unwrap().unwrap();
        assert_eq!(depacketizer.clock_rate(), 44100);

        let video = RtspTrack::Generic {
            payload_type: 96,
            clock_rate: 90000,
            encoding_name: "H264".to_owned(),
        };
        assert!(video.validate().is_ok());
        assert!(video.depacketizer().unwrap().is_none());
        assert_eq!(video.clock_rate(), 90000);
    }

    #[test]
    fn test_invalid_tracks() {
        assert!(RtspTrack::aac_hbr(97, 12345, 2).validate().is_err());
        assert!(RtspTrack::aac_hbr(97, 48000, 0).validate().is_err());

        let broken = RtspTrack::Mpeg4Audio {
            payload_type: 97,
            sample_rate: 48000,
            channel_count: 2,
            size_length: 0,
            index_length: 3,
            index_delta_length: 3,
        };
        assert!(broken.depacketizer().is_err());
    }

    #[test]
    fn test_mpeg4_audio_media_description() {
        let track = RtspTrack::aac_hbr(96, 48000, 2);
        let media = track
            .media_description(&RtspSDPControl::Relative("trackID=0".to_owned()))
            .unwrap();
        assert_eq!(
            format!("{}", media),
            "m=audio 0 RTP/AVP 96\r\n\
a=rtpmap:96 mpeg4-generic/48000/2\r\n\
a=fmtp:96 profile-level-id=1; mode=AAC-hbr; sizelength=13; indexlength=3; indexdeltalength=3; config=1190\r\n\
a=control:trackID=0\r\n"
        );
        assert_eq!(RtspTrack::from_media_description(&media).unwrap(), track);
    }

    #[test]
    fn test_generic_media_description() {
        let video = RtspTrack::Generic {
            payload_type: 96,
            clock_rate: 90000,
            encoding_name: "H264".to_owned(),
        };
        let media = video.media_description(&RtspSDPControl::Asterisk).unwrap();
        assert_eq!(
            format!("{}", media),
            "m=video 0 RTP/AVP 96\r\na=rtpmap:96 H264/90000\r\na=control:*\r\n"
        );
        assert_eq!(RtspTrack::from_media_description(&media).unwrap(), video);
    }

    #[test]
    fn test_announced_tracks() {
        let sdp: SessionDescription = "v=0\r\n\
o=- 0 0 IN IP4 127.0.0.1\r\n\
s=No Name\r\n\
t=0 0\r\n\
m=audio 0 RTP/AVP 97\r\n\
a=rtpmap:97 MPEG4-GENERIC/44100/2\r\n\
a=fmtp:97 profile-level-id=1;mode=AAC-hbr;sizelength=13;indexlength=3;indexdeltalength=3; config=121056E500\r\n\
m=audio 0 RTP/AVP 98\r\n\
a=rtpmap:98 MPEG4-GENERIC/16000\r\n\
a=fmtp:98 mode=AAC-hbr;sizelength=13\r\n\
m=audio 0 RTP/AVP 99\r\n\
a=rtpmap:99 mpeg4-generic/48000/2\r\n\
a=fmtp:99 mode=CELP-cbr;constantsize=24\r\n\
m=audio 0 RTP/AVP 100\r\n\
a=rtpmap:100 mpeg4-generic/48000/2\r\n\
a=fmtp:100 mode=AAC-hbr;sizelength=13;config=zz\r\n\
m=audio 0 RTP/AVP 0\r\n"
            .parse()
            .unwrap();
        let media = &sdp.media_descriptions;

        assert_eq!(
            RtspTrack::from_media_description(&media[0]).unwrap(),
            RtspTrack::aac_hbr(97, 44100, 2)
        );
        let mono = RtspTrack::from_media_description(&media[1]).unwrap();
        assert_eq!(
            mono,
            RtspTrack::Mpeg4Audio {
                payload_type: 98,
                sample_rate: 16000,
                channel_count: 1,
                size_length: 13,
                index_length: 0,
                index_delta_length: 0,
            }
        );
        assert!(mono.validate().is_ok());
        assert!(RtspTrack::from_media_description(&media[2]).is_err());
        assert!(RtspTrack::from_media_description(&media[3]).is_err());
        assert!(RtspTrack::from_media_description(&media[4]).is_err());
    }
}
