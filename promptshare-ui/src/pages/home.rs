use crate::components::AuthSection;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="hero__title">"Discover & Share Prompts"</h1>
            <p class="hero__subtitle">
                "An open collection of AI prompts. Sign in to build your own and manage them from your profile."
            </p>
        </div>

        <AuthSection/>
    }
}
