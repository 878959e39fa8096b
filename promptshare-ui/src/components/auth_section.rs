use crate::session::get_session;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[component]
pub fn AuthSection() -> impl IntoView {
    let session = LocalResource::new(get_session);
    let query = use_query_map();
    let denied = move || query.with(|q| q.get("error").is_some());

    view! {
        <div class="auth-section">
            <Show when=denied>
                <p class="auth-section__denied">"Sign-in was denied. Please try again."</p>
            </Show>
            {move || {
                match session.get().and_then(|result| result.ok()).flatten().and_then(|s| s.user) {
                    Some(user) => {
                        let name = user.name.unwrap_or_else(|| "there".to_string());
                        view! {
                            <div class="user-info">
                                {user.image.map(|src| view! {
                                    <img src=src alt="Avatar" class="user-info__avatar"/>
                                })}
                                <div class="user-info__details">
                                    <span class="user-info__name">"Hi, " {name}</span>
                                    <span class="user-info__email">{user.email.unwrap_or_default()}</span>
                                </div>
                                <a href="/profile" class="user-info__profile">"My Profile"</a>
                                <form action="/auth/logout" method="post" class="logout-form">
                                    <button type="submit" class="logout-btn">"Sign Out"</button>
                                </form>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <a href="/auth/login" rel="external" class="google-login-btn">
                            "Sign in with Google"
                        </a>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
