use std::sync::Arc;

use device_client::{
    CatalogResolver, CommandError, CommandGateway, DeviceConfig, SourceUnavailable,
};
use shared::{
    domain::{Catalog, SequenceActivationRequest},
    error::ApiError,
    protocol::{CatalogOrigin, CommandResponse, GroupView},
};

/// Everything the HTTP layer needs to reach the light controller.
#[derive(Clone)]
pub struct ApiContext {
    pub resolver: Arc<CatalogResolver>,
    pub gateway: CommandGateway,
}

impl ApiContext {
    pub fn new(device: &DeviceConfig, http: reqwest::Client) -> Self {
        Self {
            resolver: Arc::new(CatalogResolver::from_config(device, http.clone())),
            gateway: CommandGateway::new(http, device),
        }
    }
}

#[derive(Debug)]
pub struct CatalogReply {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
}

/// Resolves a fresh catalog, flattening a single-object payload into a one-element list.
pub async fn get_catalog(ctx: &ApiContext) -> Result<CatalogReply, ApiError> {
    let resolution = ctx.resolver.resolve().await.map_err(source_unavailable)?;
    let origin = resolution.origin;
    Ok(CatalogReply {
        catalog: resolution.into_catalog(),
        origin,
    })
}

pub async fn get_group_index(ctx: &ApiContext) -> Result<(Vec<GroupView>, CatalogOrigin), ApiError> {
    let reply = get_catalog(ctx).await?;
    let views = grouping::group(&reply.catalog).views();
    Ok((views, reply.origin))
}

pub async fn activate(
    ctx: &ApiContext,
    request: &SequenceActivationRequest,
) -> Result<CommandResponse, ApiError> {
    ctx.gateway
        .activate(request)
        .await
        .map(CommandResponse::from)
        .map_err(command_failed)
}

pub async fn deactivate(ctx: &ApiContext) -> Result<CommandResponse, ApiError> {
    ctx.gateway
        .deactivate()
        .await
        .map(CommandResponse::from)
        .map_err(command_failed)
}

fn source_unavailable(err: SourceUnavailable) -> ApiError {
    ApiError::from_failure(err.kind(), err)
}

fn command_failed(err: CommandError) -> ApiError {
    ApiError::from_failure(err.kind(), err)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
