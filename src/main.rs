use anyhow::Result;
use clap::Parser;
use endpoint_caller::{
    catalog, EndpointCaller, FailureDisplay, Outcome, RenderPolicy, Settings,
};
use log::debug;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Call an api endpoint with the access token found in a page url fragment
#[derive(Debug, Parser)]
#[command(name = "endpoint-caller", version)]
struct Cli {
    /// Page url carrying `#...&access_token=<token>&...`
    #[arg(long, required_unless_present_any = ["config", "list"])]
    page_url: Option<String>,

    /// Base url relative endpoints are resolved against (falls back to $BASE_URL, then the page url)
    #[arg(long)]
    base_url: Option<String>,

    /// Json settings file, flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only render the response of the most recently issued call
    #[arg(long)]
    latest_only: bool,

    /// Render failures into the output instead of only logging them
    #[arg(long)]
    show_errors: bool,

    /// Print the endpoint options and exit
    #[arg(long)]
    list: bool,

    /// Selection values to activate, in order, without waiting for earlier calls
    selections: Vec<String>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)?,
            None => Settings::new(self.page_url.clone().unwrap_or_default()),
        };

        if let Some(page_url) = &self.page_url {
            settings.page_url = page_url.clone();
        }
        if self.base_url.is_some() {
            settings.base_url = self.base_url.clone();
        }
        if self.latest_only {
            settings.render_policy = RenderPolicy::LatestIssued;
        }
        if self.show_errors {
            settings.failure_display = FailureDisplay::Visible;
        }

        Ok(settings.with_base_url_from_env())
    }
}

/// Fire every activation before awaiting any of them, like repeated clicks
async fn activate_all(caller: &EndpointCaller, selections: &[String]) -> Result<Vec<Outcome>> {
    let handles: Vec<_> = selections
        .iter()
        .map(|selection| (selection, caller.trigger(selection.as_str())))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (selection, handle) in handles {
        let outcome = handle.await?;
        debug!("'{}' -> {:?}", selection, outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for option in catalog::default_options() {
            match option.permission {
                Some(permission) => {
                    println!("{:<16} {} ({})", option.value, option.label, permission)
                }
                None => println!("{:<16} {}", option.value, option.label),
            }
        }
        return Ok(());
    }

    let caller = EndpointCaller::load(cli.settings()?)?;
    debug!("Access token present: {}", caller.token().is_present());

    activate_all(&caller, &cli.selections).await?;

    if !cli.selections.is_empty() {
        println!("{}", caller.output().content().await);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_caller::BASE_URL_VAR;
    use httpmock::prelude::*;
    use std::io::Write;
    use std::time::Duration;

    fn settings_for(args: &[&str]) -> Settings {
        Cli::try_parse_from(args.iter().copied()).unwrap().settings().unwrap()
    }

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn page_url_is_required_without_config_or_list() {
        assert!(Cli::try_parse_from(["endpoint-caller", "/movies"]).is_err());
        assert!(Cli::try_parse_from(["endpoint-caller", "--list"]).is_ok());
    }

    #[test]
    fn base_url_flag_wins_over_config_and_environment() {
        let file = config_file(
            r#"{ "page_url": "http://page.example.com/", "base_url": "https://config.example.com" }"#,
        );
        let path = file.path().to_str().unwrap();

        temp_env::with_var(BASE_URL_VAR, Some("https://env.example.com"), || {
            let settings = settings_for(&[
                "endpoint-caller",
                "--config",
                path,
                "--base-url",
                "https://flag.example.com",
            ]);
            assert_eq!(settings.base_url.as_deref(), Some("https://flag.example.com"));
        });
    }

    #[test]
    fn config_base_url_wins_over_environment() {
        let file = config_file(
            r#"{ "page_url": "http://page.example.com/", "base_url": "https://config.example.com" }"#,
        );
        let path = file.path().to_str().unwrap();

        temp_env::with_var(BASE_URL_VAR, Some("https://env.example.com"), || {
            let settings = settings_for(&["endpoint-caller", "--config", path]);
            assert_eq!(settings.base_url.as_deref(), Some("https://config.example.com"));
        });
    }

    #[test]
    fn environment_base_url_is_used_when_nothing_is_configured() {
        temp_env::with_var(BASE_URL_VAR, Some("https://env.example.com"), || {
            let settings = settings_for(&["endpoint-caller", "--page-url", "http://page.example.com/"]);
            assert_eq!(settings.base_url.as_deref(), Some("https://env.example.com"));
        });
    }

    #[test]
    fn page_url_is_the_last_resort() {
        temp_env::with_var_unset(BASE_URL_VAR, || {
            let settings = settings_for(&["endpoint-caller", "--page-url", "http://page.example.com/"]);
            assert_eq!(settings.base_url, None);
            assert_eq!(settings.page_url, "http://page.example.com/");
        });
    }

    #[test]
    fn flags_override_config_policies_and_page_url() {
        let file = config_file(
            r#"{ "page_url": "http://config.example.com/#access_token=a", "render_policy": "last_resolved" }"#,
        );
        let path = file.path().to_str().unwrap();

        temp_env::with_var_unset(BASE_URL_VAR, || {
            let settings = settings_for(&[
                "endpoint-caller",
                "--config",
                path,
                "--page-url",
                "http://flag.example.com/#access_token=b",
                "--latest-only",
                "--show-errors",
            ]);
            assert_eq!(settings.page_url, "http://flag.example.com/#access_token=b");
            assert_eq!(settings.render_policy, RenderPolicy::LatestIssued);
            assert_eq!(settings.failure_display, FailureDisplay::Visible);
        });
    }

    async fn slow_then_fast_caller(server: &MockServer, policy: RenderPolicy) -> EndpointCaller {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .body(r#"{"from":"slow"}"#);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fast");
                then.status(200).body(r#"{"from":"fast"}"#);
            })
            .await;

        let mut settings = Settings::new("http://localhost/#access_token=t");
        settings.base_url = Some(server.base_url());
        settings.render_policy = policy;
        EndpointCaller::load(settings).unwrap()
    }

    #[tokio::test]
    async fn selections_overlap_so_latest_only_drops_the_slow_one() {
        let server = MockServer::start_async().await;
        let caller = slow_then_fast_caller(&server, RenderPolicy::LatestIssued).await;

        let selections = vec!["/slow".to_string(), "/fast".to_string()];
        let outcomes = activate_all(&caller, &selections).await.unwrap();

        assert_eq!(outcomes, vec![Outcome::Superseded, Outcome::Rendered]);
        assert_eq!(caller.output().content().await, "{\n  \"from\": \"fast\"\n}");
    }

    #[tokio::test]
    async fn selections_overlap_so_last_resolved_shows_the_slow_one() {
        let server = MockServer::start_async().await;
        let caller = slow_then_fast_caller(&server, RenderPolicy::LastResolved).await;

        let selections = vec!["/slow".to_string(), "/fast".to_string()];
        let outcomes = activate_all(&caller, &selections).await.unwrap();

        assert_eq!(outcomes, vec![Outcome::Rendered, Outcome::Rendered]);
        assert_eq!(caller.output().content().await, "{\n  \"from\": \"slow\"\n}");
    }
}
