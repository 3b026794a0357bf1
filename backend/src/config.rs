use std::{
    io,
    net::{SocketAddr, ToSocketAddrs},
    path::PathBuf,
};

use clap::Parser;

use crate::{campus::CampusData, error::CampusDataError};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Campus wayfinding API server")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// JSON file with `locations` and `pathNodes`; the built-in campus is used when absent
    #[arg(long, env = "CAMPUS_DATA")]
    pub campus_data: Option<PathBuf>,
}

impl ServerConfig {
    /// Resolves `host` (IP literal or hostname) together with `port`.
    pub fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addrs: Vec<_> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{} resolved to no addresses", self.host),
            ));
        }
        Ok(addrs)
    }

    pub fn load_campus(&self) -> Result<CampusData, CampusDataError> {
        match &self.campus_data {
            Some(path) => {
                tracing::info!("loading campus data from {}", path.display());
                CampusData::from_file(path)
            }
            None => {
                tracing::info!("using built-in campus data");
                Ok(CampusData::builtin())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::try_parse_from(["wayfinder"]).unwrap();
        assert_eq!(config.port, 3001);
        assert!(config.campus_data.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config =
            ServerConfig::try_parse_from(["wayfinder", "--host", "127.0.0.1", "--port", "8080"])
                .unwrap();
        let expected: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        assert_eq!(config.socket_addrs().unwrap(), vec![expected]);
    }

    #[test]
    fn resolves_hostnames() {
        let config = ServerConfig::try_parse_from(["wayfinder", "--host", "localhost"]).unwrap();
        let addrs = config.socket_addrs().unwrap();
        assert!(!addrs.is_empty());
        assert!(addrs.iter().all(|addr| addr.ip().is_loopback() && addr.port() == 3001));
    }

    #[test]
    fn keeps_ipv6_hosts_intact() {
        let config = ServerConfig::try_parse_from(["wayfinder", "--host", "::1"]).unwrap();
        let expected: SocketAddr = "[::1]:3001".parse().unwrap();
        assert_eq!(config.socket_addrs().unwrap(), vec![expected]);
    }

    #[test]
    fn loads_campus_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"locations": [{{"id": "gate", "name": "Gate", "type": "entrance",
                "coordinates": {{"lat": 41.0, "lng": -73.0}}}}],
               "pathNodes": [{{"id": "n", "coordinates": {{"lat": 41.0, "lng": -73.0}}}}]}}"#
        )
        .unwrap();

        let config = ServerConfig::try_parse_from([
            "wayfinder",
            "--campus-data",
            file.path().to_str().unwrap(),
        ])
        .unwrap();
        let campus = config.load_campus().unwrap();
        assert_eq!(campus.locations[0].id, "gate");
        assert_eq!(campus.path_nodes.len(), 1);
    }

    #[test]
    fn missing_campus_file_is_io_error() {
        let config = ServerConfig::try_parse_from([
            "wayfinder",
            "--campus-data",
            "/definitely/not/here.json",
        ])
        .unwrap();
        assert!(matches!(config.load_campus(), Err(CampusDataError::Io(_))));
    }
}
