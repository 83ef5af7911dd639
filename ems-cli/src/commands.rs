//! Subcommand handlers.
//!
//! Each handler performs one user action and reports the outcome the way the
//! web pages did: a toast line on stdout, field errors listed under it.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use ems_client::{
    AuthAction, AuthPage, AuthService, ClientConfig, ClientError, EmployeeAction, EmployeeDraft,
    EmployeeViewModel, GateDecision, HttpClient, NetworkHttpClient, Page, RenderStyle, Session,
    SessionStore, Toast, check_gate, logout, render,
};

use crate::cli::{Cli, Command};

type Dashboard = EmployeeViewModel<NetworkHttpClient>;

/// Resolve configuration: environment first, then command line flags
pub fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    build_config_from(cli, |key| std::env::var(key).ok())
}

/// Same as [`build_config`] with `EMS_*` values taken from `lookup`
pub fn build_config_from<F>(cli: &Cli, lookup: F) -> anyhow::Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::from_lookup(lookup).context("invalid EMS_* environment")?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(mode) = &cli.auth_mode {
        config.auth_mode = mode.parse()?;
    }
    if let Some(path) = &cli.session_path {
        config.session_path = path.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    Ok(config)
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = build_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, auth_mode = %config.auth_mode, "configuration loaded");

    match cli.command {
        Command::Login { username, password } => {
            auth_submit(&config, AuthAction::Signin, &username, &password).await
        }
        Command::Signup { username, password } => {
            auth_submit(&config, AuthAction::Signup, &username, &password).await
        }
        Command::ResetPassword {
            username,
            new_password,
        } => auth_submit(&config, AuthAction::ResetPassword, &username, &new_password).await,
        Command::Logout => {
            let mut store = config.open_session_store()?;
            logout(&mut store)?;
            println!("{}", Toast::info("Logged out"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => whoami(&config),
        Command::List { search, table } => {
            let style = if table {
                RenderStyle::Table
            } else {
                config.render_style
            };
            list(&config, search, style).await
        }
        Command::Show { id } => show(&config, id).await,
        Command::Add {
            first_name,
            last_name,
            email,
        } => add(&config, EmployeeDraft::new(first_name, last_name, email)).await,
        Command::Edit {
            id,
            first_name,
            last_name,
            email,
        } => edit(&config, id, first_name, last_name, email).await,
        Command::Delete { id, yes } => delete(&config, id, yes).await,
    }
}

// ============================================================================
// Auth
// ============================================================================

async fn auth_submit(
    config: &ClientConfig,
    action: AuthAction,
    username: &str,
    password: &str,
) -> anyhow::Result<ExitCode> {
    let page = match action {
        AuthAction::Signin => AuthPage::Login,
        AuthAction::Signup => AuthPage::Signup,
        AuthAction::ResetPassword => AuthPage::ResetPassword,
    };
    println!("{}", page.heading());

    let auth = AuthService::new(config.build_http_client()?);
    let mut store = config.open_session_store()?;
    let (toast, code) = submit_auth(&auth, &mut store, action, username, password).await;
    println!("{toast}");
    Ok(code)
}

/// Submit one auth form and decide what to print and how to exit
async fn submit_auth<C: HttpClient, S: SessionStore>(
    auth: &AuthService<C>,
    store: &mut S,
    action: AuthAction,
    username: &str,
    password: &str,
) -> (Toast, ExitCode) {
    let result = match action {
        AuthAction::Signin => auth.signin(store, username, password).await,
        AuthAction::Signup => auth.signup(store, username, password).await,
        AuthAction::ResetPassword => auth.reset_password(username, password).await,
    };

    match result {
        Ok(outcome) => {
            tracing::debug!(next = %outcome.next, "auth submitted");
            match (action, outcome.next) {
                (_, Page::Dashboard) => (Toast::success(outcome.message), ExitCode::SUCCESS),
                // signin that stored no session did not log anyone in
                (AuthAction::Signin, _) => (Toast::info(outcome.message), ExitCode::FAILURE),
                _ => (Toast::info(outcome.message), ExitCode::SUCCESS),
            }
        }
        Err(e) => (Toast::error(action.failure_message(&e)), ExitCode::FAILURE),
    }
}

fn not_logged_in(page: Page) -> Toast {
    Toast::warning(format!("Not logged in. Go to the {page} page (`ems login`)."))
}

fn whoami(config: &ClientConfig) -> anyhow::Result<ExitCode> {
    let store = config.open_session_store()?;
    match check_gate(&store) {
        GateDecision::Granted(session) => {
            println!("[{}] {}", session.avatar(), session.username);
            Ok(ExitCode::SUCCESS)
        }
        GateDecision::Redirect(page) => {
            println!("{}", not_logged_in(page));
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Pass the session gate in bearer mode and attach the stored token.
///
/// `Err` carries the page to go to instead.
fn gated_config(config: &ClientConfig, store: &impl SessionStore) -> Result<ClientConfig, Page> {
    if !config.auth_mode.is_bearer() {
        return Ok(config.clone());
    }
    match check_gate(store) {
        GateDecision::Granted(Session { username, token }) => {
            tracing::debug!(%username, "session found");
            let config = config.clone();
            Ok(match token {
                Some(token) => config.with_token(token),
                None => config,
            })
        }
        GateDecision::Redirect(page) => Err(page),
    }
}

fn open_dashboard(config: &ClientConfig) -> anyhow::Result<Option<Dashboard>> {
    let store = config.open_session_store()?;
    match gated_config(config, &store) {
        Ok(config) => Ok(Some(EmployeeViewModel::new(config.build_http_client()?))),
        Err(page) => {
            println!("{}", not_logged_in(page));
            Ok(None)
        }
    }
}

/// Gate, then load the list; `None` means the failure was already reported
async fn loaded_dashboard(config: &ClientConfig) -> anyhow::Result<Option<Dashboard>> {
    let Some(mut vm) = open_dashboard(config)? else {
        return Ok(None);
    };
    if let Err(e) = vm.load().await {
        println!("{}", Toast::failure(EmployeeAction::Load, &e));
        return Ok(None);
    }
    Ok(Some(vm))
}

fn report_failure(action: EmployeeAction, err: &ClientError) {
    match err.form_errors() {
        Some(errors) => {
            println!("{}", Toast::warning("Please correct the highlighted fields"));
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
        }
        None => println!("{}", Toast::failure(action, err)),
    }
}

async fn list(
    config: &ClientConfig,
    search: Option<String>,
    style: RenderStyle,
) -> anyhow::Result<ExitCode> {
    let Some(mut vm) = open_dashboard(config)? else {
        return Ok(ExitCode::FAILURE);
    };
    let loaded = vm.load().await;
    if let Err(e) = &loaded {
        println!("{}", Toast::failure(EmployeeAction::Load, e));
    }
    vm.set_filter(search.unwrap_or_default());
    print!("{}", render::render(&vm.view(), style));
    Ok(if loaded.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn show(config: &ClientConfig, id: i64) -> anyhow::Result<ExitCode> {
    let Some(vm) = open_dashboard(config)? else {
        return Ok(ExitCode::FAILURE);
    };
    match vm.fetch(id).await {
        Ok(employee) => {
            println!("#{} {}", employee.id, render::card_line(&employee));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", Toast::error(format!("Failed to load employee: {}", e.user_message())));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn add(config: &ClientConfig, draft: EmployeeDraft) -> anyhow::Result<ExitCode> {
    let Some(mut vm) = loaded_dashboard(config).await? else {
        return Ok(ExitCode::FAILURE);
    };
    vm.open_add();
    match vm.submit(&draft).await {
        Ok(employee) => {
            println!("{}", Toast::success(EmployeeAction::Create.success_message()));
            println!("#{} {}", employee.id, render::card_line(&employee));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(EmployeeAction::Create, &e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn edit(
    config: &ClientConfig,
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<ExitCode> {
    let Some(mut vm) = loaded_dashboard(config).await? else {
        return Ok(ExitCode::FAILURE);
    };
    let Some(current) = vm.open_edit(id) else {
        println!("{}", Toast::error(format!("Employee {id} not found")));
        return Ok(ExitCode::FAILURE);
    };
    let draft = EmployeeDraft {
        first_name: first_name.unwrap_or(current.first_name),
        last_name: last_name.unwrap_or(current.last_name),
        email: email.unwrap_or(current.email),
    };
    match vm.submit(&draft).await {
        Ok(employee) => {
            println!("{}", Toast::success(EmployeeAction::Update.success_message()));
            println!("#{} {}", employee.id, render::card_line(&employee));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(EmployeeAction::Update, &e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn delete(config: &ClientConfig, id: i64, yes: bool) -> anyhow::Result<ExitCode> {
    let Some(mut vm) = loaded_dashboard(config).await? else {
        return Ok(ExitCode::FAILURE);
    };
    let Some(details) = vm.open_delete(id) else {
        println!("{}", Toast::error(format!("Employee {id} not found")));
        return Ok(ExitCode::FAILURE);
    };
    if !yes && !confirm(&format!("Delete {details}?"))? {
        vm.close();
        println!("{}", Toast::info("Cancelled"));
        return Ok(ExitCode::SUCCESS);
    }
    match vm.confirm_delete().await {
        Ok(_) => {
            println!("{}", Toast::success(EmployeeAction::Delete.success_message()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(EmployeeAction::Delete, &e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ems_client::client::{MockHttpClient, MockReply};
    use ems_client::session::{TOKEN_KEY, USERNAME_KEY};
    use ems_client::{AuthMode, MemorySessionStore, ToastKind};
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "ems",
            "--base-url",
            "http://flag.local:9000",
            "--auth-mode",
            "none",
            "--timeout",
            "3",
            "--session-path",
            "/tmp/ems-test-session.json",
            "whoami",
        ]);
        let lookup = env(&[
            ("EMS_BASE_URL", "http://env.local"),
            ("EMS_AUTH_MODE", "bearer"),
            ("EMS_RENDER_STYLE", "table"),
        ]);
        let config = build_config_from(&cli, lookup).unwrap();
        assert_eq!(config.base_url, "http://flag.local:9000");
        assert_eq!(config.auth_mode, AuthMode::None);
        assert_eq!(config.timeout, 3);
        assert_eq!(config.render_style, RenderStyle::Table);
        assert_eq!(
            config.session_path,
            std::path::PathBuf::from("/tmp/ems-test-session.json")
        );
    }

    #[test]
    fn test_env_used_without_flags() {
        let cli = Cli::parse_from(["ems", "list"]);
        let config =
            build_config_from(&cli, env(&[("EMS_BASE_URL", "http://env.local")])).unwrap();
        assert_eq!(config.base_url, "http://env.local");
        assert_eq!(config.auth_mode, AuthMode::Bearer);
    }

    #[test]
    fn test_bad_auth_mode_flag() {
        let cli = Cli::parse_from(["ems", "--auth-mode", "basic", "logout"]);
        assert!(build_config_from(&cli, env(&[])).is_err());
    }

    #[tokio::test]
    async fn test_signin_success_exits_zero() {
        let auth = AuthService::new(
            MockHttpClient::new().reply(MockReply::Json(json!({"token": "jwt-1"}))),
        );
        let mut store = MemorySessionStore::new();

        let (toast, code) =
            submit_auth(&auth, &mut store, AuthAction::Signin, "alice", "pw").await;
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_signin_without_token_exits_nonzero() {
        let auth = AuthService::new(MockHttpClient::new().reply(MockReply::Json(json!({}))));
        let mut store = MemorySessionStore::new();

        let (toast, code) =
            submit_auth(&auth, &mut store, AuthAction::Signin, "alice", "pw").await;
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(
            toast.message,
            "Login succeeded but no token was returned. Please try again."
        );
        assert_eq!(code, ExitCode::FAILURE);
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_signup_without_token_is_informational() {
        let auth = AuthService::new(MockHttpClient::new().reply(MockReply::Json(json!({
            "message": "User registered successfully, but failed to authenticate."
        }))));
        let mut store = MemorySessionStore::new();

        let (toast, code) =
            submit_auth(&auth, &mut store, AuthAction::Signup, "bob", "pw").await;
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn test_rejected_signin_prints_error() {
        let auth = AuthService::new(MockHttpClient::new().reply(MockReply::Status(
            401,
            r#"{"error":"Invalid username or password"}"#.into(),
        )));
        let mut store = MemorySessionStore::new();

        let (toast, code) =
            submit_auth(&auth, &mut store, AuthAction::Signin, "alice", "bad").await;
        assert_eq!(
            toast,
            Toast::error("Error: Invalid username or password")
        );
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_gate_applies_in_bearer_mode_only() {
        let mut store = MemorySessionStore::new();
        let bearer = ClientConfig::default().with_auth_mode(AuthMode::Bearer);
        let open = ClientConfig::default().with_auth_mode(AuthMode::None);

        assert_eq!(gated_config(&bearer, &store).unwrap_err(), Page::Login);
        assert!(gated_config(&open, &store).unwrap().token.is_none());

        Session::persist(&mut store, "jwt-9", "carol").unwrap();
        let config = gated_config(&bearer, &store).unwrap();
        assert_eq!(config.token.as_deref(), Some("jwt-9"));
    }
}
