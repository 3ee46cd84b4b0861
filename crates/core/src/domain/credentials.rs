// Credentials - tokens attached to every remote call

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::fmt;

/// Required key in the credential file
pub const DYNAMIC_TOKEN_KEY: &str = "DYNAMIC_TOKEN";
/// Optional key, sent as `X-Access-Token`
pub const ACCESS_TOKEN_KEY: &str = "ACCESS_TOKEN";
/// Optional key, sent as `X-Device-Signature`
pub const DEVICE_SIGNATURE_KEY: &str = "DEVICE_SIGNATURE";

/// Credentials loaded at the start of a cycle
///
/// Never mutated: a rotated file produces a new value on the next cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    dynamic_token: String,
    access_token: Option<String>,
    device_signature: Option<String>,
}

impl Credentials {
    /// Build credentials, rejecting an empty primary token
    pub fn new(
        dynamic_token: impl Into<String>,
        access_token: Option<String>,
        device_signature: Option<String>,
    ) -> Result<Self> {
        let dynamic_token = dynamic_token.into();
        if dynamic_token.is_empty() {
            return Err(AppError::Config(format!(
                "{} is missing from the credential file",
                DYNAMIC_TOKEN_KEY
            )));
        }

        Ok(Self {
            dynamic_token,
            access_token: access_token.filter(|v| !v.is_empty()),
            device_signature: device_signature.filter(|v| !v.is_empty()),
        })
    }

    /// Build credentials from parsed `KEY=value` pairs
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Result<Self> {
        let dynamic_token = pairs
            .get(DYNAMIC_TOKEN_KEY)
            .cloned()
            .unwrap_or_default();

        Self::new(
            dynamic_token,
            pairs.get(ACCESS_TOKEN_KEY).cloned(),
            pairs.get(DEVICE_SIGNATURE_KEY).cloned(),
        )
    }

    pub fn dynamic_token(&self) -> &str {
        &self.dynamic_token
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn device_signature(&self) -> Option<&str> {
        self.device_signature.as_deref()
    }
}

// Tokens must never reach the log
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("dynamic_token", &"<redacted>")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field(
                "device_signature",
                &self.device_signature.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
