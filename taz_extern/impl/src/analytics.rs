use std::{collections::BTreeMap, sync::Arc, time::Duration};

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use taz_di::Build;
use taz_extern_contracts::analytics::AnalyticsApiService;
use taz_models::analytics::AnalyticsEvent;
use taz_utils::trace_instrument;
use url::Url;
use uuid::Uuid;

use crate::http::HttpClient;

const COLLECT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends events to the GA4 Measurement Protocol. Does nothing if analytics
/// has not been configured.
#[derive(Debug, Clone, Build)]
pub struct AnalyticsApiServiceImpl {
    config: AnalyticsApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct AnalyticsApiServiceConfig {
    target: Option<Arc<Ga4Target>>,
}

#[derive(Debug)]
struct Ga4Target {
    endpoint: Url,
    client_id: String,
    timeout: Duration,
}

impl AnalyticsApiServiceConfig {
    pub fn new(
        measurement_id: &str,
        api_secret: &str,
        client_id: Option<String>,
        endpoint_override: Option<Url>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut endpoint = endpoint_override.unwrap_or_else(|| COLLECT_ENDPOINT.parse().unwrap());
        endpoint
            .query_pairs_mut()
            .append_pair("measurement_id", measurement_id)
            .append_pair("api_secret", api_secret);

        Self {
            target: Some(
                Ga4Target {
                    endpoint,
                    client_id: client_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
                }
                .into(),
            ),
        }
    }

    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

impl AnalyticsApiService for AnalyticsApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn track(&self, event: &AnalyticsEvent) -> anyhow::Result<()> {
        let Some(target) = &self.config.target else {
            return Ok(());
        };

        self.client
            .post(target.endpoint.clone())
            .json(&CollectRequest::new(&target.client_id, event))
            .timeout(target.timeout)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("Failed to track {:?}", &**event.name))?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CollectRequest<'a> {
    client_id: &'a str,
    events: [CollectEvent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct CollectEvent<'a> {
    name: &'a str,
    params: &'a BTreeMap<String, Value>,
}

impl<'a> CollectRequest<'a> {
    fn new(client_id: &'a str, event: &'a AnalyticsEvent) -> Self {
        Self {
            client_id,
            events: [CollectEvent {
                name: &event.name,
                params: &event.params,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn collect_request() {
        let event = AnalyticsEvent::form_submit("contact", 4);

        let body = serde_json::to_value(CollectRequest::new("client-1", &event)).unwrap();

        assert_eq!(
            body,
            json!({
                "client_id": "client-1",
                "events": [{
                    "name": "form_submit",
                    "params": {"form_name": "contact", "form_fields": 4},
                }],
            })
        );
    }

    #[test]
    fn endpoint_query() {
        let config = AnalyticsApiServiceConfig::new(
            "G-TEST",
            "s3cr3t",
            Some("client-1".into()),
            Some("http://127.0.0.1:8004/mp/collect".parse().unwrap()),
            None,
        );

        let target = config.target.unwrap();
        assert_eq!(
            target.endpoint.as_str(),
            "http://127.0.0.1:8004/mp/collect?measurement_id=G-TEST&api_secret=s3cr3t"
        );
        assert_eq!(target.client_id, "client-1");
        assert_eq!(target.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn configured_timeout() {
        let config = AnalyticsApiServiceConfig::new(
            "G-TEST",
            "s3cr3t",
            None,
            None,
            Some(Duration::from_millis(1500)),
        );

        assert_eq!(config.target.unwrap().timeout, Duration::from_millis(1500));
    }

    #[test]
    fn generated_client_id() {
        let config = AnalyticsApiServiceConfig::new("G-TEST", "s3cr3t", None, None, None);

        let target = config.target.unwrap();
        assert!(Uuid::parse_str(&target.client_id).is_ok());
        assert!(target
            .endpoint
            .as_str()
            .starts_with("https://www.google-analytics.com/mp/collect?"));
    }

    #[tokio::test]
    async fn disabled() {
        let sut = AnalyticsApiServiceImpl {
            config: AnalyticsApiServiceConfig::disabled(),
            client: HttpClient::default(),
        };

        sut.track(&AnalyticsEvent::page_view("/", "Home"))
            .await
            .unwrap();
    }
}
