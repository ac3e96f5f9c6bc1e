use anyhow::Result;

use signet::{logging, App, SessionStore};
use signet_authority::{HttpAuthorityClient, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    let log_path = logging::init_logging(&settings.log_level)?;
    tracing::info!(
        authority_url = %settings.authority_url,
        "Logging to {}",
        log_path.display()
    );

    let client = HttpAuthorityClient::new(&settings)?;
    let session = SessionStore::new().on_auth_success(|user| {
        tracing::info!(user_id = %user.id, "Signed in as {}", user.display_name);
    });

    App::new(client).with_session(session).run().await?;

    Ok(())
}
