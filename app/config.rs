use std::{env, net::IpAddr, path::PathBuf};

use config::{Config, ConfigError, Environment, File};
use rtsp_server::{config::RtspServerConfig, track::RtspTrack};
use serde::Deserialize;

use crate::{
    AppCli,
    errors::{AppError, AppResult},
    util::parse_log_level,
};

#[derive(Debug, Deserialize)]
pub(crate) struct Logger {
    pub(crate) level: String,
    pub(crate) dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RtspServer {
    pub(crate) address: IpAddr,
    pub(crate) port: u16,
    pub(crate) read_timeout_ms: u64,
    pub(crate) write_timeout_ms: u64,
    pub(crate) session_timeout_ms: u64,
    pub(crate) write_queue_capacity: usize,
}

impl From<&RtspServer> for RtspServerConfig {
    fn from(value: &RtspServer) -> Self {
        Self {
            address: value.address,
            port: value.port,
            read_timeout_ms: value.read_timeout_ms,
            write_timeout_ms: value.write_timeout_ms,
            session_timeout_ms: value.session_timeout_ms,
            write_queue_capacity: value.write_queue_capacity,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "codec", rename_all = "kebab-case")]
pub(crate) enum Track {
    Mpeg4Audio {
        payload_type: u8,
        sample_rate: u32,
        channel_count: u8,
    },
    Generic {
        payload_type: u8,
        clock_rate: u32,
        encoding_name: String,
    },
}

impl From<&Track> for RtspTrack {
    fn from(value: &Track) -> Self {
        match value {
            Track::Mpeg4Audio {
                payload_type,
                sample_rate,
                channel_count,
            } => RtspTrack::aac_hbr(*payload_type, *sample_rate, *channel_count),
            Track::Generic {
                payload_type,
                clock_rate,
                encoding_name,
            } => RtspTrack::Generic {
                payload_type: *payload_type,
                clock_rate: *clock_rate,
                encoding_name: encoding_name.clone(),
            },
        }
    }
}

/// A stream served under `rtsp://host:port/<name>`
#[derive(Debug, Deserialize)]
pub(crate) struct Path {
    pub(crate) name: String,
    pub(crate) tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppConfig {
    pub(crate) logger: Logger,
    pub(crate) rtsp_server: RtspServer,
    #[serde(default)]
    pub(crate) paths: Vec<Path>,
}

impl AppConfig {
    pub(crate) fn new(config_path: Option<PathBuf>) -> AppResult<Self> {
        let Some(config_path) = config_path.or_else(|| env::var_os("NVR_CONFIG").map(PathBuf::from))
        else {
            return Err(AppError::ConfigError(ConfigError::NotFound(
                "no config file is provided".to_owned(),
            )));
        };
        let result = Config::builder()
            .add_source(File::from(config_path))
            .add_source(Environment::with_prefix("nvr").separator("__"))
            .build()?;
        let config = result.try_deserialize()?;
        Ok(config)
    }

    pub(crate) fn apply(&mut self, cli_args: AppCli) {
        if let Some(level) = cli_args.log_level {
            self.logger.level = level;
        }

        if let Some(port) = cli_args.rtsp_port {
            self.rtsp_server.port = port;
        }
    }

    pub(crate) fn validate(&self) -> AppResult<()> {
        parse_log_level(&self.logger.level)?;

        if self.logger.dir.as_os_str().is_empty() {
            return Err(AppError::ConfigError(ConfigError::Message(
                "the log dir config is empty".to_owned(),
            )));
        }

        if self.rtsp_server.write_queue_capacity == 0 {
            return Err(AppError::ConfigError(ConfigError::Message(
                "write_queue_capacity must be positive".to_owned(),
            )));
        }

        for (index, path) in self.paths.iter().enumerate() {
            if path.name.is_empty() || path.name.starts_with('/') {
                return Err(AppError::ConfigError(ConfigError::Message(format!(
                    "invalid path name: {:?}",
                    path.name
                ))));
            }
            if self.paths[..index].iter().any(|other| other.name == path.name) {
                return Err(AppError::ConfigError(ConfigError::Message(format!(
                    "duplicated path: {}",
                    path.name
                ))));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::{AppConfig, Track};

    const CONFIG: &str = r#"
[logger]
level = "info"
dir = "logs"

[rtsp_server]
address = "0.0.0.0"
port = 8554
read_timeout_ms = 10000
write_timeout_ms = 10000
session_timeout_ms = 60000
write_queue_capacity = 256

[[paths]]
name = "camera1"
tracks = [
    { codec = "mpeg4-audio", payload_type = 97, sample_rate = 48000, channel_count = 2 },
]
"#;

    fn parse(source: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_parse_config() {
        let config = parse(CONFIG);
        config.validate().unwrap();
        assert_eq!(config.rtsp_server.port, 8554);
        assert_eq!(config.paths.len(), 1);
        assert!(matches!(
            config.paths[0].tracks[0],
            Track::Mpeg4Audio {
                payload_type: 97,
                sample_rate: 48000,
                channel_count: 2
            }
        ));
    }

    #[test]
    fn test_duplicated_path() {
        let source = format!(
            "{}\n[[paths]]\nname = \"camera1\"\ntracks = []\n",
            CONFIG
        );
        assert!(parse(&source).validate().is_err());
    }
}
