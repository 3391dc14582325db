use crate::domain::errors::HostError;
use crate::ports::outbound::ArchiverClient;
use async_trait::async_trait;
use itx_02_accounts::NetworkAccount;

/// Archiver that always answers with the same copy, or always fails.
pub struct StaticArchiver {
    id: String,
    response: Result<NetworkAccount, HostError>,
}

impl StaticArchiver {
    pub fn new(id: impl Into<String>, account: NetworkAccount) -> Self {
        Self {
            id: id.into(),
            response: Ok(account),
        }
    }

    pub fn unreachable(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            response: Err(HostError::Unavailable(id.clone())),
            id,
        }
    }
}

#[async_trait]
impl ArchiverClient for StaticArchiver {
    fn peer_id(&self) -> &str {
        &self.id
    }

    async fn fetch_network_account(&self) -> Result<NetworkAccount, HostError> {
        self.response.clone()
    }
}
