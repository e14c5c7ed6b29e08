use dioxus::prelude::*;

use ui::SessionProvider;
use views::{Home, Login, Register, Settings};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/settings")]
    Settings {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                eprintln!("failed to start tokio runtime: {err}");
                std::process::exit(1);
            }
        };
        if let Err(err) = runtime.block_on(launch_server()) {
            tracing::error!("server exited with error: {err:#}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use anyhow::Context as _;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = api::config::Settings::new().context("failed to load settings")?;

    let store = api::db::open_store(&settings)
        .await
        .context("failed to open user store")?;
    let service = api::auth::AuthService::new(store);

    // REST routes first, then the Dioxus application
    let router = axum::Router::new()
        .merge(api::routes::router(service))
        .serve_dioxus_application(ServeConfig::new(), App);

    let addr = match settings.server.address.as_deref() {
        Some(address) => address
            .parse()
            .with_context(|| format!("invalid server address {address:?}"))?,
        None => dioxus::cli_config::fullstack_address_or_localhost(),
    };
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
