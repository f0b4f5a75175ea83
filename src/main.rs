//! Clubportal admin console
//!
//! Main application entry point: loads configuration, signs in when
//! credentials are provided, runs one sequenced dashboard load and prints
//! the resulting aggregates.

use tracing::{info, warn};

use clubportal::{
    config::Settings,
    services::ServiceFactory,
    state::ViewScope,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the run
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", clubportal::info());

    let services = ServiceFactory::new(settings)?;

    // Credentials are optional; without them only public reads work.
    let email = std::env::var("CLUBPORTAL_ADMIN_EMAIL").ok();
    let password = std::env::var("CLUBPORTAL_ADMIN_PASSWORD").ok();
    if let (Some(email), Some(password)) = (email, password) {
        let admin = services.auth.login(&email, &password).await?;
        info!(admin = %admin.name, "Authenticated");
    } else {
        warn!("No admin credentials in environment; loading public data only");
    }

    let scope = ViewScope::new();
    let snapshot = services.dashboard.load_all(&scope).await?;

    info!(
        events = snapshot.events.total,
        upcoming = snapshot.events.upcoming,
        members = snapshot.members.total,
        registrations = snapshot.registrations.total,
        pending_registrations = snapshot.registrations.pending,
        submissions = snapshot.submissions.total,
        awarded = snapshot.submissions.awarded,
        unread_contacts = snapshot.contacts.unread,
        "Portal snapshot"
    );

    if !snapshot.failed_feeds.is_empty() {
        warn!(feeds = ?snapshot.failed_feeds, "Some feeds failed to load");
    }

    for notice in services.notices.drain() {
        info!(level = ?notice.level, "{}", notice.message);
    }

    Ok(())
}
