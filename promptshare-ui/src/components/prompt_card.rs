use leptos::prelude::*;
use promptshare_app::domain::Post;

#[component]
pub fn PromptCard(
    post: Post,
    handle_edit: Callback<Post>,
    handle_delete: Callback<Post>,
) -> impl IntoView {
    let edit_target = post.clone();
    let delete_target = post.clone();

    view! {
        <article class="prompt-card">
            <p class="prompt-card__text">{post.prompt}</p>
            <p class="prompt-card__tag">{post.tag}</p>
            <div class="prompt-card__actions">
                <button
                    class="prompt-card__edit"
                    on:click=move |_| handle_edit.run(edit_target.clone())
                >
                    "Edit"
                </button>
                <button
                    class="prompt-card__delete"
                    on:click=move |_| handle_delete.run(delete_target.clone())
                >
                    "Delete"
                </button>
            </div>
        </article>
    }
}
