//! Chain API.

use tokio_util::sync::CancellationToken;

use crate::client::LeapClient;
use crate::error::Result;
use crate::types::Info;

/// Path of the chain-info endpoint.
pub const GET_INFO_PATH: &str = "/v1/chain/get_info";

/// Chain API client.
pub struct ChainApi {
    client: LeapClient,
}

impl ChainApi {
    pub(crate) fn new(client: LeapClient) -> Self {
        Self { client }
    }

    /// Fetch the chain status snapshot.
    pub async fn get_info(&self, cancel: &CancellationToken) -> Result<Info> {
        let (mut info, status) = self.client.get::<Info>(GET_INFO_PATH, cancel).await?;
        info.http_status = status;
        Ok(info)
    }
}
