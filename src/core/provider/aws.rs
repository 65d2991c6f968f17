//! AWS SDK session.
//!
//! The SDK is async while shush is a one-shot synchronous tool, so a session
//! owns a current-thread tokio runtime and drives each request to completion
//! with [`Session::block_on`]. Drop the session before exec.

use std::future::Future;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

use crate::error::{Error, Result};

/// Runtime and resolved SDK configuration for one invocation.
pub struct Session {
    runtime: tokio::runtime::Runtime,
    config: SdkConfig,
}

impl Session {
    /// Load AWS configuration.
    ///
    /// An explicit `region` wins; otherwise the SDK default chain applies
    /// (environment, shared config, instance metadata).
    ///
    /// # Errors
    ///
    /// Returns `Error::Usage` if no region can be determined.
    pub fn connect(region: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            loader = loader.region(Region::new(region.to_string()));
        }
        let config = runtime.block_on(loader.load());

        match config.region() {
            Some(region) => debug!(region = %region, "loaded AWS config"),
            None => {
                return Err(Error::Usage(
                    "please specify region (--region or $AWS_DEFAULT_REGION)".to_string(),
                ))
            }
        }

        Ok(Self { runtime, config })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn kms(&self) -> aws_sdk_kms::Client {
        aws_sdk_kms::Client::new(&self.config)
    }

    pub fn ssm(&self) -> aws_sdk_ssm::Client {
        aws_sdk_ssm::Client::new(&self.config)
    }

    /// Run a request future to completion on the session runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
