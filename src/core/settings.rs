use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use crate::error::{FolioError, FolioResult};

pub const PORT_ENV: &str = "PORT";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub site_root: StrSetting,
    pub resources_dir: StrSetting,
    pub projects_source: StrSetting,
    pub about_source: StrSetting,
    pub cache_max_age: U64Setting,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StrSetting {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct U16Setting {
    pub name: String,
    pub value: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct U64Setting {
    pub name: String,
    pub value: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ipv4Setting {
    pub name: String,
    pub value: Ipv4Addr,
}

/// Where a JSON content document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
    Local(PathBuf),
    Remote(String),
}

impl ContentSource {
    /// `http://` values are remote; anything else is a path relative to
    /// `site_root` unless absolute. The HTTP client is built without TLS, so
    /// `https://` is refused up front.
    pub fn parse(value: &str, site_root: &Path) -> FolioResult<Self> {
        if value.starts_with("https://") {
            return Err(FolioError::settings(format!(
                "`{}`: https sources are not supported, use http:// or a local path",
                value
            )));
        }
        if value.starts_with("http://") {
            Ok(ContentSource::Remote(value.to_string()))
        } else {
            Ok(ContentSource::Local(site_root.join(value)))
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> FolioResult<Self> {
        let file = File::open(path)?;
        let mut buffer = Vec::new();
        BufReader::new(file).read_to_end(&mut buffer)?;
        let settings = serde_json::from_slice::<Settings>(&buffer)
            .map_err(|error| FolioError::settings(format!("{}: {}", path.display(), error)))?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Defaults when `path` does not exist; a present but broken file is an error.
    pub fn load_or_default(path: &Path) -> FolioResult<Self> {
        match Settings::load(path) {
            Err(FolioError::Io(error)) if error.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                Ok(Settings::new())
            }
            other => other,
        }
    }

    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Setting {
                name: "Ipv4 Address".to_string(),
                value: Ipv4Addr::new(127, 0, 0, 1),
            },
            port: U16Setting {
                name: "Port".to_string(),
                value: 4000,
            },
            site_root: StrSetting {
                name: "site_root".to_string(),
                value: ".".to_string(),
            },
            resources_dir: StrSetting {
                name: "resources_dir".to_string(),
                value: "resources".to_string(),
            },
            projects_source: StrSetting {
                name: "projects_source".to_string(),
                value: "projects.json".to_string(),
            },
            about_source: StrSetting {
                name: "about_source".to_string(),
                value: "about.json".to_string(),
            },
            cache_max_age: U64Setting {
                name: "cache_max_age".to_string(),
                value: 3600,
            },
        }
    }

    /// Applies `PORT` when set to a valid port number.
    pub fn apply_env_port(&mut self, raw: Option<String>) -> FolioResult<()> {
        if let Some(raw) = raw {
            self.port.value = raw
                .trim()
                .parse()
                .map_err(|_| FolioError::settings(format!("invalid {}: `{}`", PORT_ENV, raw)))?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.ipv4_addr.value, self.port.value))
    }

    pub fn site_root(&self) -> PathBuf {
        PathBuf::from(&self.site_root.value)
    }

    pub fn projects_source(&self) -> FolioResult<ContentSource> {
        ContentSource::parse(&self.projects_source.value, &self.site_root())
    }

    pub fn about_source(&self) -> FolioResult<ContentSource> {
        ContentSource::parse(&self.about_source.value, &self.site_root())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}
