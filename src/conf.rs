//! Code for supporting the configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration of the MLLP transport.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct TransportConf {
    /// Host of the interface engine.
    pub host: String,
    /// Port of the interface engine.
    pub port: u16,
    /// Timeout for connecting, sending and waiting for the acknowledgement.
    pub timeout_secs: u64,
}

impl Default for TransportConf {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7199,
            timeout_secs: 30,
        }
    }
}

/// Configuration of the receiving HTTP server.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct ServerConf {
    /// IP to listen on.
    pub listen_host: String,
    /// Port to listen on.
    pub listen_port: u16,
}

impl Default for ServerConf {
    fn default() -> Self {
        Self {
            listen_host: "127.0.0.1".into(),
            listen_port: 5000,
        }
    }
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(default)]
pub struct Top {
    pub transport: TransportConf,
    pub server: ServerConf,
    /// If set, sent message bodies are copied here.
    pub archive_dir: Option<PathBuf>,
}

impl Top {
    /// Load from `path`, or return the defaults if `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        match path {
            Some(path) => {
                tracing::info!("Loading configuration from {:?}", path);
                let toml_str = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("could not read config {:?}: {}", path, e))?;
                Ok(toml::from_str(&toml_str)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Copy the message bodies of `sample_id` to the archive directory, if configured.
    ///
    /// The normal body is only written if non-empty.
    pub fn archive(&self, sample_id: &str, tumor: &str, normal: &str) -> Result<(), anyhow::Error> {
        let Some(archive_dir) = &self.archive_dir else {
            return Ok(());
        };
        std::fs::create_dir_all(archive_dir)?;
        let path_tumor = archive_dir.join(format!("{}_T.hl7", sample_id));
        tracing::debug!("archiving tumor message to {:?}", &path_tumor);
        std::fs::write(&path_tumor, tumor)?;
        if !normal.is_empty() {
            let path_normal = archive_dir.join(format!("{}_N.hl7", sample_id));
            tracing::debug!("archiving normal message to {:?}", &path_normal);
            std::fs::write(&path_normal, normal)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_without_file() -> Result<(), anyhow::Error> {
        let conf = Top::load(None)?;

        assert_eq!(conf.transport.host, "127.0.0.1");
        assert_eq!(conf.transport.port, 7199);
        assert_eq!(conf.transport.timeout_secs, 30);
        assert_eq!(conf.server.listen_port, 5000);
        assert_eq!(conf.archive_dir, None);

        Ok(())
    }

    #[test]
    fn partial_file_keeps_defaults() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("conf.toml");
        std::fs::write(
            &path,
            "archive_dir = \"/var/lib/hl7\"\n\n[transport]\nhost = \"engine.example.org\"\n",
        )?;

        let conf = Top::load(Some(&path))?;

        assert_eq!(conf.transport.host, "engine.example.org");
        assert_eq!(conf.transport.port, 7199);
        assert_eq!(conf.server, ServerConf::default());
        assert_eq!(conf.archive_dir, Some(PathBuf::from("/var/lib/hl7")));

        Ok(())
    }

    #[test]
    fn missing_file() {
        assert!(Top::load(Some(Path::new("/nonexisting/conf.toml"))).is_err());
    }

    #[test]
    fn archive_writes_bodies() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let conf = Top {
            archive_dir: Some(tmp_dir.join("archive")),
            ..Default::default()
        };

        conf.archive("S24-0815", "MSH|T\r\n", "")?;

        assert_eq!(
            std::fs::read_to_string(tmp_dir.join("archive").join("S24-0815_T.hl7"))?,
            "MSH|T\r\n"
        );
        assert!(!tmp_dir.join("archive").join("S24-0815_N.hl7").exists());

        Ok(())
    }
}
