use crate::cli::commands::login::login;
use crate::cli::commands::test_support::{TEST_PASSWORD, spawn_test_server};
use crate::cli::error::CliError;

#[tokio::test(flavor = "multi_thread")]
async fn test_login_prints_token() {
    let server = spawn_test_server().await;

    let output = login(&server.anonymous(), TEST_PASSWORD).await.unwrap();

    let token = output.rsplit("FOLIO_TOKEN=").next().unwrap();
    assert_eq!(token.len(), 64);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_wrong_password_fails() {
    let server = spawn_test_server().await;

    let err = login(&server.anonymous(), "wrong").await.unwrap_err();

    assert!(matches!(err, CliError::Unauthorized { .. }));
}
