use std::{
    future::Future,
    time::{Duration, Instant},
};

use reqwest::{Client, RequestBuilder};
use shared::{domain::SequenceActivationRequest, protocol::DeviceAck};
use tracing::{info, warn};
use url::Url;

use crate::{config::DeviceConfig, error::CommandError};

pub type ActivationResult = Result<DeviceAck, CommandError>;

/// Forwards commands to the zone sequence endpoint. Every call is one attempt bounded by
/// the configured deadline; concurrent calls are not serialized.
#[derive(Clone)]
pub struct CommandGateway {
    http: Client,
    sequence_url: Url,
    timeout: Duration,
}

impl CommandGateway {
    pub fn new(http: Client, config: &DeviceConfig) -> Self {
        Self {
            http,
            sequence_url: config.zone_sequence_url(),
            timeout: config.timeout,
        }
    }

    pub async fn activate(&self, request: &SequenceActivationRequest) -> ActivationResult {
        let builder = self.http.post(self.sequence_url.clone()).json(request);
        self.send("activate", builder).await
    }

    pub async fn deactivate(&self) -> ActivationResult {
        let builder = self.http.delete(self.sequence_url.clone());
        self.send("deactivate", builder).await
    }

    /// Like [`Self::activate`], but gives up with [`CommandError::Aborted`] as soon as
    /// `cancelled` completes.
    pub async fn activate_until<F>(
        &self,
        request: &SequenceActivationRequest,
        cancelled: F,
    ) -> ActivationResult
    where
        F: Future<Output = ()>,
    {
        abort_on(self.activate(request), cancelled, "activate").await
    }

    pub async fn deactivate_until<F>(&self, cancelled: F) -> ActivationResult
    where
        F: Future<Output = ()>,
    {
        abort_on(self.deactivate(), cancelled, "deactivate").await
    }

    async fn send(&self, op: &'static str, builder: RequestBuilder) -> ActivationResult {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, round_trip(builder)).await {
            Ok(result) => result,
            Err(_) => Err(CommandError::Timeout(self.timeout)),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(ack) => info!(op, status = ack.status, elapsed_ms, "device: command accepted"),
            Err(CommandError::DeviceRejected { status, body }) => warn!(
                op,
                status,
                %body,
                elapsed_ms,
                "device: command rejected"
            ),
            Err(err) => warn!(op, kind = ?err.kind(), error = %err, elapsed_ms, "device: command failed"),
        }
        result
    }
}

async fn round_trip(builder: RequestBuilder) -> ActivationResult {
    let response = builder.send().await.map_err(CommandError::TransportFailure)?;
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
        return Err(CommandError::DeviceRejected {
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(CommandError::TransportFailure)?;
    Ok(DeviceAck {
        status: status.as_u16(),
        body,
    })
}

async fn abort_on<R, F>(request: R, cancelled: F, op: &'static str) -> ActivationResult
where
    R: Future<Output = ActivationResult>,
    F: Future<Output = ()>,
{
    tokio::select! {
        result = request => result,
        () = cancelled => {
            warn!(op, "device: command aborted by caller");
            Err(CommandError::Aborted)
        }
    }
}
