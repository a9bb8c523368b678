use std::path::PathBuf;

use async_trait::async_trait;
use weft_common::Peer;

use super::error::NetworkError;

/// Material for opening a secured event channel to one peer.
#[derive(Debug, Clone, Default)]
pub struct ChannelCredentials {
    pub ca_pem: Vec<u8>,
    pub client_cert_pem: Vec<u8>,
    pub client_key_pem: Vec<u8>,
    /// TLS server-name override for peers reached through proxies.
    pub server_name: Option<String>,
}

/// Produces connection credentials for a peer's event channel.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn connection_options(&self, peer: &Peer) -> Result<ChannelCredentials, NetworkError>;
}

/// Reads PEM bundles from a certificate directory laid out as
/// `<dir>/<peer name>/{ca.pem, client.pem, client.key}`.
#[derive(Debug, Clone)]
pub struct FileCredentialProvider {
    pub cert_dir: PathBuf,
}

impl FileCredentialProvider {
    pub fn new(cert_dir: impl Into<PathBuf>) -> Self {
        FileCredentialProvider { cert_dir: cert_dir.into() }
    }

    async fn read(&self, peer: &Peer, file: &str) -> Result<Vec<u8>, NetworkError> {
        let path = self.cert_dir.join(&peer.name).join(file);
        tokio::fs::read(&path)
            .await
            .map_err(|e| NetworkError::Credentials(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn connection_options(&self, peer: &Peer) -> Result<ChannelCredentials, NetworkError> {
        Ok(ChannelCredentials {
            ca_pem: self.read(peer, "ca.pem").await?,
            client_cert_pem: self.read(peer, "client.pem").await?,
            client_key_pem: self.read(peer, "client.key").await?,
            server_name: Some(peer.name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_certs_report_the_path() {
        let provider = FileCredentialProvider::new("/nonexistent/certs");
        let peer = Peer::new("peer0", "grpc://p:7051", "grpc://p:7053", "admin");

        let err = provider.connection_options(&peer).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("peer0"), "path should name the peer: {msg}");
        assert!(msg.contains("ca.pem"), "first missing file named: {msg}");
    }

    #[tokio::test]
    async fn test_reads_peer_bundle_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let peer_dir = dir.path().join("peer0");
        std::fs::create_dir_all(&peer_dir).unwrap();
        std::fs::write(peer_dir.join("ca.pem"), b"ca").unwrap();
        std::fs::write(peer_dir.join("client.pem"), b"cert").unwrap();
        std::fs::write(peer_dir.join("client.key"), b"key").unwrap();

        let provider = FileCredentialProvider::new(dir.path());
        let peer = Peer::new("peer0", "grpc://p:7051", "grpc://p:7053", "admin");

        let creds = provider.connection_options(&peer).await.unwrap();
        assert_eq!(creds.ca_pem, b"ca");
        assert_eq!(creds.client_cert_pem, b"cert");
        assert_eq!(creds.client_key_pem, b"key");
        assert_eq!(creds.server_name.as_deref(), Some("peer0"));
    }
}
