mod auth_routes;
mod post_routes;

use axum::{extract::Request, routing::post, Router};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use promptshare_app::config::AppConfig;
use promptshare_app::infrastructure::session::SESSION_MAX_AGE_DAYS;
use promptshare_app::AppContext;
use promptshare_ui::session::GetSessionFn;
use promptshare_ui::App;
use server_fn::ServerFn;
use tower_http::compression::CompressionLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, Session as CookieSession, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = AppConfig::from_env().expect("Invalid configuration");
    let app_context = AppContext::from_config(&config)
        .await
        .expect("Failed to initialise application");

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.google_redirect_uri.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            SESSION_MAX_AGE_DAYS,
        )));

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<GetSessionFn>();
    tracing::info!("Registered server function: GetSessionFn");

    let app = Router::new()
        .route(<GetSessionFn as ServerFn>::PATH, post({
            let ctx = app_context.clone();
            move |cookie: CookieSession, req: Request| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || {
                            provide_context(ctx.clone());
                            provide_context(cookie.clone());
                        },
                        req,
                    )
                    .await
                }
            }
        }))
        .merge(auth_routes::router().with_state(app_context.clone()))
        .merge(post_routes::router().with_state(app_context.clone()))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="/assets/images/default-avatar.svg"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
