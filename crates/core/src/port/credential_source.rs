// Credential Source Port

use crate::domain::Credentials;
use crate::error::Result;

/// Credential source interface
///
/// Called once at the start of every cycle. Implementations must not cache:
/// rotated credentials have to apply without a restart.
pub trait CredentialSource: Send + Sync {
    /// Load the current credentials
    ///
    /// # Errors
    /// - AppError::Config if the source is unreadable or lacks the primary token
    fn load(&self) -> Result<Credentials>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::Mutex;

    /// Mock CredentialSource returning fixed credentials or a config error
    pub struct StaticCredentialSource {
        credentials: Mutex<Option<Credentials>>,
        load_count: Mutex<usize>,
    }

    impl StaticCredentialSource {
        pub fn new(credentials: Credentials) -> Self {
            Self {
                credentials: Mutex::new(Some(credentials)),
                load_count: Mutex::new(0),
            }
        }

        pub fn with_token(token: &str) -> Self {
            Self::new(Credentials::new(token, None, None).unwrap())
        }

        pub fn missing() -> Self {
            Self {
                credentials: Mutex::new(None),
                load_count: Mutex::new(0),
            }
        }

        pub fn load_count(&self) -> usize {
            *self.load_count.lock().unwrap()
        }
    }

    impl CredentialSource for StaticCredentialSource {
        fn load(&self) -> Result<Credentials> {
            *self.load_count.lock().unwrap() += 1;
            self.credentials
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| AppError::Config("DYNAMIC_TOKEN is missing".to_string()))
        }
    }
}
