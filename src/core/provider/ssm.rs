//! AWS SSM Parameter Store provider.

use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use tracing::trace;

use super::{Secret, SecretProvider, Session};
use crate::core::context::DecryptionContext;
use crate::core::types::Backend;
use crate::error::{BackendError, BackendErrorKind};

type Result<T> = std::result::Result<T, BackendError>;

/// Parameter Store backed secrets. The token is the parameter name.
pub struct SsmProvider<'a> {
    session: &'a Session,
    client: aws_sdk_ssm::Client,
}

impl<'a> SsmProvider<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            client: session.ssm(),
        }
    }

    /// Store `value` under `name`, overwriting any existing parameter.
    ///
    /// With a `kms_key` the parameter is a `SecureString` encrypted under
    /// that key, otherwise a plain `String`. Returns the new version.
    pub fn put(&self, name: &str, value: &str, kms_key: Option<&str>) -> Result<i64> {
        trace!(parameter = name, secure = kms_key.is_some(), "putting parameter");

        let kind = match kms_key {
            Some(_) => ParameterType::SecureString,
            None => ParameterType::String,
        };
        let output = self
            .session
            .block_on(
                self.client
                    .put_parameter()
                    .name(name)
                    .value(value)
                    .r#type(kind)
                    .set_key_id(kms_key.map(str::to_string))
                    .overwrite(true)
                    .send(),
            )
            .map_err(|e| {
                BackendError::request(Backend::ParameterStore, DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.version())
    }
}

impl SecretProvider for SsmProvider<'_> {
    fn backend(&self) -> Backend {
        Backend::ParameterStore
    }

    fn decrypt(&self, token: &str, _context: &DecryptionContext) -> Result<Secret> {
        trace!(parameter = token, "fetching parameter");

        let output = self
            .session
            .block_on(
                self.client
                    .get_parameter()
                    .name(token)
                    .with_decryption(true)
                    .send(),
            )
            .map_err(|e| {
                BackendError::request(Backend::ParameterStore, DisplayErrorContext(&e).to_string())
            })?;

        let value = output
            .parameter()
            .and_then(|p| p.value())
            .ok_or_else(|| {
                BackendError::new(
                    Backend::ParameterStore,
                    BackendErrorKind::MissingOutput("parameter value"),
                )
            })?;

        Ok(Secret::new(value))
    }
}
