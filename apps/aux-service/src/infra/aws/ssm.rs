use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;

use crate::domain::error::{AwsService, StoreError};
use crate::domain::model::{ParameterDetail, ParameterSummary, ParameterType};
use crate::domain::ports::ParameterStore;

/// SSM Parameter Store adapter.
#[derive(Debug, Clone)]
pub struct SsmParameters {
    client: aws_sdk_ssm::Client,
}

impl SsmParameters {
    #[must_use]
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

fn upstream<E>(err: &E) -> StoreError
where
    E: std::error::Error,
{
    let message = DisplayErrorContext(err).to_string();
    tracing::error!(error = %message, "Error calling AWS SSM");
    StoreError::Upstream {
        service: AwsService::Ssm,
        message,
    }
}

fn parameter_type(value: Option<&aws_sdk_ssm::types::ParameterType>) -> ParameterType {
    match value.map(aws_sdk_ssm::types::ParameterType::as_str) {
        Some("StringList") => ParameterType::StringList,
        Some("SecureString") => ParameterType::SecureString,
        _ => ParameterType::String,
    }
}

#[async_trait]
impl ParameterStore for SsmParameters {
    async fn list_parameters(&self) -> Result<Vec<ParameterSummary>, StoreError> {
        let mut parameters = Vec::new();
        let mut token: Option<String> = None;

        // Manual next-token drain: the whole listing is accumulated before
        // returning, and a failure on any page fails the operation.
        loop {
            let mut request = self.client.describe_parameters();
            if let Some(ref next) = token {
                request = request.next_token(next);
            }

            let response = request.send().await.map_err(|err| upstream(&err))?;

            for p in response.parameters() {
                parameters.push(ParameterSummary {
                    name: p.name().unwrap_or_default().to_owned(),
                    kind: parameter_type(p.r#type()),
                    last_modified_date: p.last_modified_date().and_then(super::datetime_to_chrono),
                    version: p.version(),
                });
            }

            match response.next_token() {
                Some(next) => token = Some(next.to_owned()),
                None => break,
            }
        }

        Ok(parameters)
    }

    async fn get_parameter(&self, name: &str) -> Result<ParameterDetail, StoreError> {
        let result = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(GetParameterError::is_parameter_not_found)
                {
                    return Err(StoreError::ParameterNotFound(name.to_owned()));
                }
                return Err(upstream(&err));
            }
        };

        let Some(p) = output.parameter() else {
            return Err(StoreError::Upstream {
                service: AwsService::Ssm,
                message: "GetParameter returned an empty response".to_owned(),
            });
        };

        Ok(ParameterDetail {
            name: p.name().unwrap_or(name).to_owned(),
            value: p.value().unwrap_or_default().to_owned(),
            kind: parameter_type(p.r#type()),
            version: p.version(),
            last_modified_date: p.last_modified_date().and_then(super::datetime_to_chrono),
        })
    }
}
