//! CLI runner - executes commands

use crate::cli::commands::{Action, Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{ApiClient, ApiResult};
use crate::navigation::Navigator;
use crate::session::{FileSessionStore, SessionStore};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Resource a command operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Apartments,
    Payments,
    Users,
    Maintenance,
    Notifications,
    DamageReports,
    Guests,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Apartments => "apartments",
            Resource::Payments => "payments",
            Resource::Users => "users",
            Resource::Maintenance => "maintenance",
            Resource::Notifications => "notifications",
            Resource::DamageReports => "damage-reports",
            Resource::Guests => "guests",
        };
        f.write_str(name)
    }
}

/// Navigator for a terminal session: there is no screen to move to, so the
/// user is told how to sign in again.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn current_location(&self) -> String {
        "terminal".to_string()
    }

    fn navigate(&self, location: &str) {
        debug!(location, "Login required");
        eprintln!("Session expired. Run `propman login` to sign in again.");
    }
}

/// Install the stderr log subscriber; DEBUG when `verbose`, INFO otherwise
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e).context("Failed to install log subscriber"))?;

    Ok(())
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Login { email, password } => self.login(email, password).await,
            Commands::Logout => self.logout(),
            Commands::Whoami => self.whoami(),
            Commands::Apartments { action } => self.resource(Resource::Apartments, action).await,
            Commands::Payments { action } => self.resource(Resource::Payments, action).await,
            Commands::Users { action } => self.resource(Resource::Users, action).await,
            Commands::Maintenance { action } => self.resource(Resource::Maintenance, action).await,
            Commands::Notifications { action } => {
                self.resource(Resource::Notifications, action).await
            }
            Commands::DamageReports { action } => {
                self.resource(Resource::DamageReports, action).await
            }
            Commands::Guests { action } => self.resource(Resource::Guests, action).await,
        }
    }

    /// Resolve configuration from the process environment
    fn load_config(&self) -> Result<ClientConfig> {
        self.config_from(|key| std::env::var(key).ok())
    }

    /// Layer defaults, `lookup` variables, the config file and flags, then validate once
    fn config_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let mut builder = ClientConfig::builder().with_vars(lookup)?;

        if let Some(path) = &self.cli.config {
            builder = builder
                .with_yaml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
        }

        if let Some(url) = &self.cli.base_url {
            builder = builder.base_url(url.clone());
        }

        builder.try_build()
    }

    /// Open the session file
    fn session_store(&self) -> Result<Arc<FileSessionStore>> {
        Ok(Arc::new(FileSessionStore::open(&self.cli.session)?))
    }

    /// Build an API client authenticated from the session file
    fn build_client(&self) -> Result<ApiClient> {
        let config = self.load_config()?;
        debug!(base_url = %config.base_url, "Using API");

        ApiClient::builder(config)
            .session_store(self.session_store()?)
            .navigator(Arc::new(TerminalNavigator))
            .build()
    }

    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let client = self.build_client()?;
        let response = client.login(email, password).await?;

        client.session_store().set(response.clone().into_session())?;
        info!("Signed in as {email}");

        self.output(&json!({
            "authenticated": true,
            "user": response.user,
        }));
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        self.session_store()?.clear()?;
        info!("Signed out");
        Ok(())
    }

    fn whoami(&self) -> Result<()> {
        let session = self.session_store()?.get();
        if !session.is_authenticated() {
            return Err(Error::Other(
                "Not signed in. Run `propman login` first.".to_string(),
            ));
        }

        self.output(&json!({
            "user": session.user,
            "stored_at": session.stored_at,
        }));
        Ok(())
    }

    async fn resource(&self, resource: Resource, action: &Action) -> Result<()> {
        let client = self.build_client()?;
        let value = Self::dispatch(&client, resource, action).await?;
        self.output(&value);
        Ok(())
    }

    /// Map a resource/action pair onto a client call
    pub async fn dispatch(
        client: &ApiClient,
        resource: Resource,
        action: &Action,
    ) -> Result<Value> {
        use Resource as R;

        let result: ApiResult<Value> = match (resource, action) {
            (R::Apartments, Action::List { .. }) => client.get_apartments().await,
            (R::Apartments, Action::Create { data }) => {
                client.create_apartment(parse_data(data)?).await
            }
            (R::Apartments, Action::Update { id, data }) => {
                client.update_apartment(id, parse_data(data)?).await
            }
            (R::Apartments, Action::Delete { id }) => client.delete_apartment(id).await,

            (R::Payments, Action::List { month, .. }) => {
                client.get_payments(month.as_deref()).await
            }
            (R::Payments, Action::Create { data }) => {
                client.create_payment(parse_data(data)?).await
            }
            (R::Payments, Action::Update { id, data }) => {
                client.update_payment(id, parse_data(data)?).await
            }
            (R::Payments, Action::Pay { id }) => client.mark_payment_paid(id).await,
            (R::Payments, Action::Delete { id }) => client.delete_payment(id).await,

            (R::Users, Action::List { .. }) => client.get_users().await,
            (R::Users, Action::Create { data }) => client.create_user(parse_data(data)?).await,
            (R::Users, Action::Update { id, data }) => {
                client.update_user(id, parse_data(data)?).await
            }
            (R::Users, Action::Delete { id }) => client.delete_user(id).await,

            (R::Maintenance, Action::List { .. }) => client.get_maintenance_events().await,
            (R::Maintenance, Action::Create { data }) => {
                client.create_maintenance_event(parse_data(data)?).await
            }
            (R::Maintenance, Action::Update { id, data }) => {
                client.update_maintenance_event(id, parse_data(data)?).await
            }
            (R::Maintenance, Action::Status { id, status }) => {
                client.update_maintenance_status(id, status).await
            }
            (R::Maintenance, Action::Delete { id }) => client.delete_maintenance_event(id).await,

            (R::Notifications, Action::List { .. }) => client.get_notifications().await,
            (R::Notifications, Action::Create { data }) => {
                client.create_notification(parse_data(data)?).await
            }
            (R::Notifications, Action::Update { id, data }) => {
                client.update_notification(id, parse_data(data)?).await
            }
            (R::Notifications, Action::Read { id }) => client.mark_notification_read(id).await,
            (R::Notifications, Action::Delete { id }) => client.delete_notification(id).await,

            (R::DamageReports, Action::List { .. }) => client.get_my_damage_reports().await,
            (R::DamageReports, Action::Create { data }) => {
                client.create_damage_report(parse_data(data)?).await
            }
            (R::DamageReports, Action::Update { id, data }) => {
                client.update_damage_report(id, parse_data(data)?).await
            }
            (R::DamageReports, Action::Status { id, status }) => {
                client.update_damage_report_status(id, status).await
            }
            (R::DamageReports, Action::Delete { id }) => client.delete_damage_report(id).await,

            (R::Guests, Action::List { active: true, .. }) => client.get_active_guests().await,
            (R::Guests, Action::List { .. }) => client.get_guests().await,
            (R::Guests, Action::Create { data }) => client.create_guest(parse_data(data)?).await,
            (R::Guests, Action::Update { id, data }) => {
                client.update_guest(id, parse_data(data)?).await
            }
            (R::Guests, Action::CheckIn { id }) => client.check_in_guest(id).await,
            (R::Guests, Action::CheckOut { id }) => client.check_out_guest(id).await,
            (R::Guests, Action::Delete { id }) => client.delete_guest(id).await,

            (resource, action) => {
                return Err(Error::config(format!(
                    "'{}' is not available for {resource}",
                    action_name(action)
                )))
            }
        };

        Ok(result?)
    }

    /// Print a JSON document in the selected format
    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Parse an inline `--data` argument
fn parse_data(data: &str) -> Result<Value> {
    serde_json::from_str(data).context("Invalid --data JSON")
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::List { .. } => "list",
        Action::Create { .. } => "create",
        Action::Update { .. } => "update",
        Action::Delete { .. } => "delete",
        Action::Pay { .. } => "pay",
        Action::Status { .. } => "status",
        Action::Read { .. } => "read",
        Action::CheckIn { .. } => "check-in",
        Action::CheckOut { .. } => "check-out",
    }
}

#[cfg(test)]
mod runner_tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ClientConfig::builder()
            .base_url(format!("{}/api", server.uri()))
            .retry(1, Duration::from_millis(1))
            .build();
        ApiClient::new(config).unwrap()
    }

    #[test]
    fn test_cli_parses_resource_action() {
        let cli = Cli::parse_from([
            "propman",
            "payments",
            "list",
            "--month",
            "2024-01",
            "--format",
            "json",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Payments {
                action: Action::List { month: Some(ref m), active: false }
            } if m == "2024-01"
        ));
    }

    #[test]
    fn test_cli_parses_damage_report_status() {
        let cli = Cli::parse_from([
            "propman",
            "damage-reports",
            "status",
            "--id",
            "12",
            "--status",
            "resolved",
        ]);

        assert!(matches!(
            cli.command,
            Commands::DamageReports {
                action: Action::Status { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_dispatch_guest_check_in() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/airbnb/guests/44/checkin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 44}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = Runner::dispatch(
            &client,
            Resource::Guests,
            &Action::CheckIn {
                id: "44".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(value, json!({"id": 44}));
    }

    #[tokio::test]
    async fn test_dispatch_create_parses_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/apartments"))
            .and(body_json(json!({"number": "2C"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 1}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = Runner::dispatch(
            &client,
            Resource::Apartments,
            &Action::Create {
                data: r#"{"number": "2C"}"#.to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(value, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_invalid_data() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let result = Runner::dispatch(
            &client,
            Resource::Users,
            &Action::Create {
                data: "{oops".to_string(),
            },
        )
        .await;

        assert!(result.unwrap_err().to_string().contains("Invalid --data JSON"));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_unsupported_action() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let result = Runner::dispatch(
            &client,
            Resource::Apartments,
            &Action::Pay {
                id: "1".to_string(),
            },
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: 'pay' is not available for apartments"
        );
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_user_message() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/users/3"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = Runner::dispatch(
            &client,
            Resource::Users,
            &Action::Delete {
                id: "3".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "You do not have permission to perform this action"
        );
        assert_eq!(err.as_failure().and_then(|f| f.status()), Some(403));
    }

    fn bad_env(key: &str) -> Option<String> {
        match key {
            "PROPMAN_API_URL" => Some("not a url".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_base_url_flag_overrides_bad_env() {
        let runner = Runner::new(Cli::parse_from([
            "propman",
            "--base-url",
            "http://localhost:5000/api",
            "whoami",
        ]));

        let config = runner.config_from(bad_env).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_config_file_overrides_bad_env() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("propman.yaml");
        std::fs::write(&config_path, "base_url: \"https://good.example.com/api\"\n").unwrap();

        let runner = Runner::new(Cli::parse_from([
            "propman",
            "--config",
            config_path.to_str().unwrap(),
            "whoami",
        ]));

        let config = runner.config_from(bad_env).unwrap();
        assert_eq!(config.base_url, "https://good.example.com/api");
    }

    #[test]
    fn test_bad_env_without_override_is_rejected() {
        let runner = Runner::new(Cli::parse_from(["propman", "whoami"]));
        assert!(matches!(runner.config_from(bad_env), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_whoami_without_session_is_not_a_store_fault() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");

        let runner = Runner::new(Cli::parse_from([
            "propman",
            "--session",
            session_path.to_str().unwrap(),
            "whoami",
        ]));

        let err = runner.whoami().unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "Not signed in. Run `propman login` first.");
    }

    #[test]
    fn test_init_logging_twice_reports_error() {
        // At most one global subscriber can be installed per process
        let _ = init_logging(false);
        let err = init_logging(true).unwrap_err();

        assert!(matches!(err, Error::Anyhow(_)));
        assert!(err.to_string().contains("Failed to install log subscriber"));
    }

    #[test]
    fn test_terminal_navigator_is_never_on_login() {
        let nav = TerminalNavigator;
        assert_ne!(nav.current_location(), "/login");
    }
}
