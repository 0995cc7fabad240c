//! Cached loading of remote configuration.
//!
//! A [`ConfigFetcher`] wraps one [`ConfigSource`] and tracks the last data,
//! loading state and error. [`ConfigFetcher::fetch`] serves the cached data
//! when present; [`ConfigFetcher::mutate`] always goes back to the server.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ApiError;

/// Something that can load one piece of configuration.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    type Output: Clone + Send;

    /// Short label used in log lines.
    fn label(&self) -> &str;

    async fn load(&self) -> Result<Self::Output, ApiError>;
}

/// Observable state of a fetched resource.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    data: Option<T>,
    is_loading: bool,
    error: Option<ApiError>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The error of the most recent load. Stale data is kept alongside it.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

pub struct ConfigFetcher<S: ConfigSource> {
    source: S,
    resource: Resource<S::Output>,
}

impl<S: ConfigSource> ConfigFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            resource: Resource::default(),
        }
    }

    pub fn resource(&self) -> &Resource<S::Output> {
        &self.resource
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the cached data, loading it first if nothing is cached.
    pub async fn fetch(&mut self) -> Result<S::Output, ApiError> {
        if self.resource.error.is_none()
            && let Some(data) = &self.resource.data
        {
            return Ok(data.clone());
        }
        self.mutate().await
    }

    /// Reload from the source, replacing the cached data on success.
    pub async fn mutate(&mut self) -> Result<S::Output, ApiError> {
        debug!(source = self.source.label(), "loading configuration");
        self.resource.is_loading = true;
        let result = self.source.load().await;
        self.resource.is_loading = false;

        match result {
            Ok(data) => {
                self.resource.data = Some(data.clone());
                self.resource.error = None;
                Ok(data)
            }
            Err(err) => {
                debug!(source = self.source.label(), error = %err, "configuration load failed");
                self.resource.error = Some(err.clone());
                Err(err)
            }
        }
    }
}
