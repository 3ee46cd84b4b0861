// Session Probe - cheap authenticated call before real work

use crate::application::constants::UNAUTHORIZED_STATUS;
use crate::domain::Credentials;
use crate::error::{AppError, Result};
use crate::port::RewardsApi;
use std::sync::Arc;
use tracing::info;

/// Verifies that the credentials are still accepted
pub struct SessionProbe {
    api: Arc<dyn RewardsApi>,
}

impl SessionProbe {
    pub fn new(api: Arc<dyn RewardsApi>) -> Self {
        Self { api }
    }

    /// Hit the "current user" endpoint and return its status
    ///
    /// Only 401 is fatal to the cycle; other statuses are reported and the
    /// cycle continues.
    pub async fn probe(&self, credentials: &Credentials) -> Result<u16> {
        let reply = self.api.current_user(credentials).await?;
        info!(status = reply.status, "Warm-up status: {}", reply.status);

        if reply.status == UNAUTHORIZED_STATUS {
            return Err(AppError::Auth {
                status: reply.status,
            });
        }
        Ok(reply.status)
    }
}
