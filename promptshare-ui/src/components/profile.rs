use super::PromptCard;
use leptos::prelude::*;
use promptshare_app::domain::Post;

/// A titled list of posts with edit and delete buttons on each card.
#[component]
pub fn Profile(
    #[prop(into)] name: String,
    #[prop(into)] desc: String,
    #[prop(into)] data: Signal<Vec<Post>>,
    handle_edit: Callback<Post>,
    handle_delete: Callback<Post>,
) -> impl IntoView {
    view! {
        <section class="profile">
            <h1 class="profile__title">{name} " Profile"</h1>
            <p class="profile__desc">{desc}</p>
            <div class="profile__list">
                <For
                    each=move || data.get()
                    key=|post| post.id.clone()
                    children=move |post| {
                        view! {
                            <PromptCard
                                post=post
                                handle_edit=handle_edit
                                handle_delete=handle_delete
                            />
                        }
                    }
                />
            </div>
        </section>
    }
}
