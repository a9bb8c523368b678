use std::time::Duration;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use weft_common::Peer;

fn default_timeout_ms() -> u64 {
    30_000
}

/// Client-side invocation settings, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity proposals are signed with.
    pub identity: String,
    /// Ledger channel name.
    pub channel: String,
    /// Target contract identifier.
    pub contract: String,
    pub orderer_endpoint: String,
    pub peers: Vec<Peer>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let parsed = serde_json::from_str::<ClientConfig>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClientConfig {
        ClientConfig {
            identity: "user1".to_string(),
            channel: "mychannel".to_string(),
            contract: "vehicles".to_string(),
            orderer_endpoint: "grpc://orderer:7050".to_string(),
            peers: vec![Peer::new("peer0", "grpc://peer0:7051", "grpc://peer0:7053", "admin")],
            timeout_ms: 30_000,
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");

        sample().save_to_file(&path).unwrap();
        let loaded = ClientConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.identity, "user1");
        assert_eq!(loaded.peers.len(), 1);
        assert_eq!(loaded.budget(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_timeout_defaults_when_absent() {
        let json = r#"{
            "identity": "user1",
            "channel": "mychannel",
            "contract": "vehicles",
            "orderer_endpoint": "grpc://orderer:7050",
            "peers": []
        }"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_malformed_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        fs::write(&path, "{not json").unwrap();

        let err = ClientConfig::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
