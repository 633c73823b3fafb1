use mock_server::{Account, DEMO_EMAIL, DEMO_PASSWORD};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let email = std::env::var("MOCK_EMAIL").ok();
    let password = std::env::var("MOCK_PASSWORD").ok();

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    if email.is_none() && password.is_none() {
        tracing::info!(%addr, email = DEMO_EMAIL, "mock PetFriends listening");
        return mock_server::run(listener).await;
    }

    let email = email.unwrap_or_else(|| DEMO_EMAIL.to_string());
    let password = password.unwrap_or_else(|| DEMO_PASSWORD.to_string());
    tracing::info!(%addr, %email, "mock PetFriends listening");
    mock_server::run_with_accounts(listener, vec![Account::new(&email, &password)]).await
}
