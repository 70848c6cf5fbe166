//! CLI command implementations

use std::sync::Arc;

use breakwater_core::BreakwaterConfig;
use breakwater_core::auth::{CallerIdentity, Role};
use breakwater_core::catalog::MediaResource;
use breakwater_core::catalog::memory::{
    InMemoryCatalog, InMemoryIdentityStore, InMemoryPurchaseLedger, InMemorySettings,
};
use breakwater_web::{AppState, run_server};
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Server {
        /// Host to bind to (overrides BREAKWATER_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides BREAKWATER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Seed in-memory collaborators with demo data
        #[arg(long)]
        demo: bool,
    },
}

/// Dispatches a parsed command.
///
/// # Errors
///
/// - `BreakwaterError::Io` - Binding the listener or serving failed
pub async fn handle_command(command: Commands) -> breakwater_core::Result<()> {
    match command {
        Commands::Server { host, port, demo } => {
            let mut config = BreakwaterConfig::from_env();
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let identities = Arc::new(InMemoryIdentityStore::new());
            let catalog = Arc::new(InMemoryCatalog::new());
            let settings = Arc::new(InMemorySettings::new());
            let purchases = Arc::new(InMemoryPurchaseLedger::new());

            if demo {
                seed_demo_data(&identities, &catalog, &purchases);
            }

            let state = AppState::new(identities, catalog, settings, purchases, config);
            run_server(state).await?;
            Ok(())
        }
    }
}

/// Seeds the in-memory collaborators so the gateway is exercisable without
/// external identity/catalog/commerce systems.
///
/// Tokens: `admin-token`, `owner-token`, `subscriber-token`, `buyer-token`,
/// `visitor-token`. Resources `demo-1` (admin-owned, subscription tier) and
/// `demo-2` (user-owned, purchased by the buyer).
fn seed_demo_data(
    identities: &InMemoryIdentityStore,
    catalog: &InMemoryCatalog,
    purchases: &InMemoryPurchaseLedger,
) {
    let next_year = chrono::Utc::now().timestamp() + 365 * 24 * 3600;

    identities.insert(
        "admin-token",
        CallerIdentity {
            id: "demo-admin".to_string(),
            role: Role::Admin,
            subscription_expiry: None,
        },
    );
    identities.insert(
        "owner-token",
        CallerIdentity {
            id: "demo-owner".to_string(),
            role: Role::User,
            subscription_expiry: None,
        },
    );
    identities.insert(
        "subscriber-token",
        CallerIdentity {
            id: "demo-subscriber".to_string(),
            role: Role::User,
            subscription_expiry: Some(next_year),
        },
    );
    identities.insert(
        "buyer-token",
        CallerIdentity {
            id: "demo-buyer".to_string(),
            role: Role::User,
            subscription_expiry: None,
        },
    );
    identities.insert(
        "visitor-token",
        CallerIdentity {
            id: "demo-visitor".to_string(),
            role: Role::User,
            subscription_expiry: None,
        },
    );

    catalog.insert(MediaResource {
        id: "demo-1".to_string(),
        storage_reference: "/api/media/demo/clip-1.mp4".to_string(),
        owner_id: "demo-admin".to_string(),
        owner_role: Role::Admin,
    });
    catalog.insert(MediaResource {
        id: "demo-2".to_string(),
        storage_reference: "/api/media/demo/clip-2.mp4".to_string(),
        owner_id: "demo-owner".to_string(),
        owner_role: Role::User,
    });

    purchases.record_purchase("demo-buyer", "demo-2");

    tracing::info!("demo data seeded: tokens admin/owner/subscriber/buyer/visitor-token");
}
