use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::api::resources::{
    Activities, Comments, Memberships, Organizations, People, Projects, TaskLists,
};
use crate::api::transport::{ApiRequest, HttpTransport, Method, Transport};
use crate::config::ClientConfig;
use crate::errors::Result;
use crate::resolution::{materialize, DecoratedRecord, Materialized};

/// Entry point for talking to a Teambox installation.
///
/// Builds request URLs and auth headers, sends them through a [`Transport`]
/// and materializes objects/references bodies into linked records (unless
/// `materialize_responses` is off).
pub struct TeamboxClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl TeamboxClient {
    /// Creates a client sending over HTTP with the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs));
        Self::with_transport(config, Box::new(transport))
    }

    /// Creates a client sending through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a resource path such as `projects/3/people`.
    pub fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.config.api_root(), resource.trim_start_matches('/'))
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(username) = &self.config.username {
            let password = self.config.password.as_deref().unwrap_or_default();
            let token = STANDARD.encode(format!("{}:{}", username, password));
            headers.push(("Authorization".to_string(), format!("Basic {}", token)));
        }
        headers
    }

    /// Sends one request and materializes the parsed body.
    pub fn make_request(
        &self,
        method: Method,
        resource: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Materialized> {
        let request = ApiRequest {
            method,
            url: self.url_for(resource),
            headers: self.headers(),
            form: form.map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }),
        };
        debug!(method = method.as_str(), url = %request.url, "sending request");

        let body = self.transport.send(&request)?;
        if !self.config.materialize_responses {
            return Ok(Materialized::Raw(body));
        }
        materialize(body)
    }

    /// GET on `resource`, relative to the API root.
    pub fn get(&self, resource: &str) -> Result<Materialized> {
        self.make_request(Method::Get, resource, None)
    }

    /// POST `data` form-encoded.
    pub fn post(&self, resource: &str, data: &[(&str, &str)]) -> Result<Materialized> {
        self.make_request(Method::Post, resource, Some(data))
    }

    pub fn put(&self, resource: &str, data: &[(&str, &str)]) -> Result<Materialized> {
        self.make_request(Method::Put, resource, Some(data))
    }

    pub fn delete(&self, resource: &str) -> Result<Materialized> {
        self.make_request(Method::Delete, resource, None)
    }

    /// Fetches `resource` and keeps the records matching `predicate`.
    ///
    /// Pass-through responses yield no records. Predicates may read
    /// references, e.g. `r.reference("user_id")` then `get("locale")`.
    ///
    /// The resource wrappers offer the same through their own `filter`,
    /// taking the arguments of their `index` call.
    pub fn filter<P>(&self, resource: &str, predicate: P) -> Result<Vec<DecoratedRecord>>
    where
        P: FnMut(&DecoratedRecord) -> bool,
    {
        Ok(self.get(resource)?.into_matching(predicate))
    }

    /// Routes under `organizations`.
    pub fn organizations(&self) -> Organizations<'_> {
        Organizations { client: self }
    }

    pub fn memberships(&self) -> Memberships<'_> {
        Memberships { client: self }
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects { client: self }
    }

    pub fn people(&self) -> People<'_> {
        People { client: self }
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities { client: self }
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments { client: self }
    }

    pub fn task_lists(&self) -> TaskLists<'_> {
        TaskLists { client: self }
    }
}
