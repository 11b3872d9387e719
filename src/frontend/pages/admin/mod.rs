//! Admin dashboard behind the auth gate.

mod actions;
mod blogs;
mod fields;
mod projects;
mod resume;
mod tech;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, HttpAuthenticator};
use crate::session;

use blogs::BlogsAdmin;
use projects::ProjectsAdmin;
use resume::ResumeAdmin;
use tech::TechAdmin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Projects,
    Blogs,
    Tech,
    Resume,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Projects, Tab::Blogs, Tab::Tech, Tab::Resume];

    fn label(self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Blogs => "Blog Posts",
            Tab::Tech => "Tech Stack",
            Tab::Resume => "Resume",
        }
    }
}

#[component]
pub fn Admin() -> impl IntoView {
    let authenticated = session::signed_in();
    authenticated.set(session::gate().is_authenticated());

    view! {
        <div class="container mx-auto px-6 py-8">
            <Show
                when=move || authenticated.get()
                fallback=move || view! { <Login on_login=Callback::new(move |_| authenticated.set(true))/> }
            >
                <Dashboard on_logout=Callback::new(move |_| authenticated.set(false))/>
            </Show>
        </div>
    }
}

#[component]
fn Login(on_login: Callback<()>) -> impl IntoView {
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<&'static str>);
    let (pending, set_pending) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        set_error.set(None);
        let attempt = password.get_untracked();
        spawn_local(async move {
            let mut gate = session::gate();
            let ok = gate.login(&attempt, &HttpAuthenticator).await;
            set_pending.set(false);
            if ok {
                set_password.set(String::new());
                on_login.run(());
            } else {
                set_error.set(Some("Invalid password"));
            }
        });
    };

    view! {
        <div class="max-w-sm mx-auto mt-16 bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-6">
            <h2 class="text-2xl font-bold text-ctp-text mb-4">"Admin Login"</h2>
            <form on:submit=submit>
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full px-3 py-2 bg-ctp-base border border-ctp-surface1 rounded text-ctp-text mb-3"
                />
                {move || error.get().map(|msg| view! { <p class="text-ctp-red text-sm mb-3">{msg}</p> })}
                <button
                    type="submit"
                    disabled=move || pending.get()
                    class="w-full px-4 py-2 bg-ctp-blue text-ctp-base rounded font-medium disabled:opacity-50"
                >
                    {move || if pending.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn Dashboard(on_logout: Callback<()>) -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Projects);

    let logout = move |_: leptos::ev::MouseEvent| {
        spawn_local(async move {
            // The server session may already be gone; the local gate is cleared either way.
            let _ = api::logout().await;
            session::gate().logout();
            on_logout.run(());
        });
    };

    view! {
        <div>
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-3xl font-bold text-ctp-text">"Admin Dashboard"</h2>
                <button
                    on:click=logout
                    class="px-4 py-2 bg-ctp-surface1 rounded text-ctp-text hover:bg-ctp-surface2"
                >
                    "Logout"
                </button>
            </div>
            <div class="flex gap-2 mb-6 border-b border-ctp-surface1">
                {Tab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                on:click=move |_| set_tab.set(t)
                                class="px-4 py-2 font-medium transition-colors"
                                class:text-ctp-blue=move || tab.get() == t
                                class:border-b-2=move || tab.get() == t
                                class:border-ctp-blue=move || tab.get() == t
                                class:text-ctp-subtext1=move || tab.get() != t
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || match tab.get() {
                Tab::Projects => view! { <ProjectsAdmin/> }.into_any(),
                Tab::Blogs => view! { <BlogsAdmin/> }.into_any(),
                Tab::Tech => view! { <TechAdmin/> }.into_any(),
                Tab::Resume => view! { <ResumeAdmin/> }.into_any(),
            }}
        </div>
    }
}
