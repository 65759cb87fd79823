use crate::output::OutputArea;
use crate::selection::EndpointSelection;
use crate::settings::{FailureDisplay, RenderPolicy, Settings};
use crate::token::CapturedToken;
use anyhow::{Context, Result};
use log::{debug, error, trace};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Shown when the user picks an endpoint that is only described in the API reference
pub const UNSUPPORTED_MESSAGE: &str = "Check API Reference for other calls.";

/// Shown when the user triggers a call without picking an endpoint
pub const UNSELECTED_MESSAGE: &str = "Select one API endpoint ...";

/// What a single activation ended up doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The unsupported endpoint instructions were shown
    Instructed,
    /// The "select an endpoint" prompt was shown
    Prompted,
    /// The response was rendered
    Rendered,
    /// The call or the parsing of its body failed
    Failed,
    /// A newer activation happened before this one resolved, nothing was rendered
    Superseded,
}

#[derive(Clone)]
pub struct EndpointCaller {
    token: CapturedToken,
    base_url: Url,
    http_client: Client,
    output: OutputArea,
    generation: Arc<AtomicU64>,
    render_policy: RenderPolicy,
    failure_display: FailureDisplay,
}

impl EndpointCaller {
    /// Build the caller once the page is loaded: the token is captured here and never again
    pub fn load(settings: Settings) -> Result<Self> {
        let page_url = Url::parse(&settings.page_url)
            .with_context(|| format!("Invalid page url '{}'", settings.page_url))?;

        let token = CapturedToken::from_url(&page_url);

        let base_url = match &settings.base_url {
            Some(base_url) => Url::parse(base_url)
                .with_context(|| format!("Invalid base url '{}'", base_url))?,
            None => page_url,
        };

        trace!("Endpoint caller loaded, relative endpoints resolve against '{}'", base_url);

        Ok(EndpointCaller {
            token,
            base_url,
            // Reused for every call
            http_client: Client::new(),
            output: OutputArea::new(),
            generation: Arc::new(AtomicU64::new(0)),
            render_policy: settings.render_policy,
            failure_display: settings.failure_display,
        })
    }

    pub fn output(&self) -> &OutputArea {
        &self.output
    }

    pub fn token(&self) -> &CapturedToken {
        &self.token
    }

    /// Fire and forget: start the call in the background and return right away.
    ///
    /// Nothing prevents triggering again while a call is in flight.
    pub fn trigger(&self, value: impl Into<String>) -> JoinHandle<Outcome> {
        let caller = self.clone();
        let value = value.into();
        tokio::spawn(async move { caller.invoke(&value).await })
    }

    /// Invoke the endpoint named by the current value of the selection control
    pub async fn invoke(&self, value: &str) -> Outcome {
        // Must be bumped before the first await so activation order is preserved
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match EndpointSelection::parse(value) {
            EndpointSelection::Unsupported => {
                self.show(generation, UNSUPPORTED_MESSAGE, Outcome::Instructed)
                    .await
            }
            EndpointSelection::Unselected => {
                self.show(generation, UNSELECTED_MESSAGE, Outcome::Prompted)
                    .await
            }
            EndpointSelection::Concrete(target) => self.call(generation, &target).await,
        }
    }

    async fn show(&self, generation: u64, message: &str, outcome: Outcome) -> Outcome {
        if self.render_for(generation, message.to_string()).await {
            outcome
        } else {
            Outcome::Superseded
        }
    }

    async fn call(&self, generation: u64, target: &str) -> Outcome {
        match self.fetch_pretty_json(target).await {
            Ok(text) => {
                if self.render_for(generation, text).await {
                    Outcome::Rendered
                } else {
                    debug!("Dropping response of '{}', a newer activation happened", target);
                    Outcome::Superseded
                }
            }
            Err(err) => {
                error!("Call to '{}' failed: {:#}", target, err);
                match self.failure_display {
                    FailureDisplay::Silent => Outcome::Failed,
                    FailureDisplay::Visible => {
                        let text = format!("Request failed: {:#}", err);
                        self.show(generation, &text, Outcome::Failed).await
                    }
                }
            }
        }
    }

    async fn render_for(&self, generation: u64, text: String) -> bool {
        match self.render_policy {
            RenderPolicy::LastResolved => {
                self.output.render(text).await;
                true
            }
            RenderPolicy::LatestIssued => {
                let current = &self.generation;
                self.output
                    .render_if(text, || current.load(Ordering::SeqCst) == generation)
                    .await
            }
        }
    }

    async fn fetch_pretty_json(&self, target: &str) -> Result<String> {
        let url = self
            .base_url
            .join(target)
            .with_context(|| format!("Invalid endpoint url '{}'", target))?;

        let mut request = Request::new(Method::GET, url);

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, "application/json".parse()?);
        headers.insert(AUTHORIZATION, self.token.bearer_header().parse()?);

        trace!("GET {}", request.url());
        let response = self.http_client.execute(request).await?;

        // The status is not checked: any body that parses as json is rendered
        debug!("'{}' answered with {}", response.url(), response.status());
        let payload: Value = response
            .json()
            .await
            .context("Response body is not valid json")?;

        Ok(serde_json::to_string_pretty(&payload)?)
    }
}
