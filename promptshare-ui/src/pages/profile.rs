use crate::components::Profile;
use crate::session::get_session;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use promptshare_app::application::{
    edit_location, resolve_user_id, DeleteOutcome, MyPosts, ProfileActions, DELETE_CONFIRMATION,
};
use promptshare_app::client::HttpPostsApi;
use promptshare_app::domain::Post;

const PROFILE_DESC: &str = "Welcome to your personalized profile page. Share your exceptional prompts and inspire others with the power of your imagination";

/// Actions bound to the current page origin. Browser only.
fn profile_actions() -> Option<ProfileActions<HttpPostsApi>> {
    let origin = window().location().origin().ok()?;
    match HttpPostsApi::new(&origin) {
        Ok(api) => Some(ProfileActions::new(api)),
        Err(e) => {
            logging::error!("Cannot reach the posts API: {}", e);
            None
        }
    }
}

#[component]
pub fn MyProfilePage() -> impl IntoView {
    let navigate = StoredValue::new_local(use_navigate());
    let session = LocalResource::new(get_session);
    let my_posts = RwSignal::new(MyPosts::default());

    // Falls back to the placeholder id while the session is loading or has no id.
    let user_id = Memo::new(move |_| {
        let current = session.get().and_then(|result| result.ok()).flatten();
        resolve_user_id(current.as_ref())
    });

    Effect::new(move |_| {
        let user_id = user_id.get();
        spawn_local(async move {
            let Some(actions) = profile_actions() else {
                return;
            };
            match actions.fetch_posts(&user_id).await {
                Some(posts) => my_posts.update(|p| p.replace(posts)),
                None => logging::warn!("Could not load posts for {}", user_id),
            }
        });
    });

    let handle_edit = Callback::new(move |post: Post| {
        let location = edit_location(&post);
        navigate.with_value(|navigate| navigate(&location, Default::default()));
    });

    let handle_delete = Callback::new(move |post: Post| {
        let confirmed = window()
            .confirm_with_message(DELETE_CONFIRMATION)
            .unwrap_or(false);

        spawn_local(async move {
            let Some(actions) = profile_actions() else {
                return;
            };
            let outcome = actions.delete_post(&post, confirmed).await;
            if outcome == DeleteOutcome::RemovedLocallyOnly {
                logging::warn!("Post {} removed from the list but not from the server", post.id);
            }
            my_posts.update(|p| p.apply_delete(&post.id, outcome));
        });
    });

    let data = Signal::derive(move || my_posts.with(|p| p.as_slice().to_vec()));

    view! {
        <Profile
            name="My"
            desc=PROFILE_DESC
            data=data
            handle_edit=handle_edit
            handle_delete=handle_delete
        />
    }
}
