use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::remote::HttpAuthenticator;
use crate::content::{AuthGate, MemorySession};

/// Exchange the admin password for a session token and print how to use it.
pub async fn login(api_client: &ApiClient, password: &str) -> CliResult<String> {
    let mut gate = AuthGate::new(MemorySession::default());
    let authenticator = HttpAuthenticator::new(api_client);

    if !gate.login(password, &authenticator).await {
        return Err(CliError::Unauthorized {
            message: "Login failed: wrong password or server unreachable".to_string(),
        });
    }

    let token = gate.token().unwrap_or_default();
    Ok(format!(
        "Logged in. Use the session token for admin commands:\n\n  export FOLIO_TOKEN={}",
        token
    ))
}
