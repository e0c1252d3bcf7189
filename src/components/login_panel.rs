//! Login Panel Component
//!
//! Login and registration; a successful registration logs straight in.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::context::AppContext;
use crate::models::NewUser;
use crate::session::{password_strength, strength_label, Session};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

async fn sign_in(registering: bool, username: String, email: String, password: String) -> Result<Session, ApiError> {
    if registering {
        api::register(&NewUser { username: &username, email: &email, password: &password }).await?;
        log::info!("registered {}", username);
    }
    let token = api::login(&username, &password).await?;
    Ok(Session {
        token: token.access_token,
        username,
    })
}

#[component]
pub fn LoginPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (mode, set_mode) = signal(Mode::Login);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let strength = move || password_strength(&password.get());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let user = username.get_untracked().trim().to_string();
        let mail = email.get_untracked().trim().to_string();
        let pass = password.get_untracked();
        let registering = mode.get_untracked() == Mode::Register;

        if user.is_empty() || pass.is_empty() || (registering && mail.is_empty()) {
            set_error.set(Some("All fields are required".to_string()));
            return;
        }
        set_error.set(None);
        set_busy.set(true);

        spawn_local(async move {
            let result = sign_in(registering, user, mail, pass).await;
            set_busy.set(false);
            match result {
                Ok(session) => ctx.login(session),
                Err(ApiError::Unauthorized) => set_error.set(Some("Incorrect username or password".to_string())),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="auth-container">
            <form class="auth-form" on:submit=submit>
                <h1>{move || if mode.get() == Mode::Login { "Welcome back" } else { "Create your account" }}</h1>

                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <Show when=move || mode.get() == Mode::Register>
                    <input
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </Show>
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <Show when=move || mode.get() == Mode::Register && !password.get().is_empty()>
                    <div class="password-strength">
                        <div class="strength-meter">
                            {(1..=4u8).map(|level| view! {
                                <span class={move || if strength() >= level { "meter-section filled" } else { "meter-section" }} />
                            }).collect_view()}
                        </div>
                        <span class="strength-text">{move || strength_label(strength())}</span>
                    </div>
                </Show>

                {move || error.get().map(|msg| view! { <p class="auth-error">{msg}</p> })}

                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || match (mode.get(), busy.get()) {
                        (_, true) => "Please wait...",
                        (Mode::Login, false) => "Log in",
                        (Mode::Register, false) => "Sign up",
                    }}
                </button>

                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| {
                        set_error.set(None);
                        set_mode.update(|m| *m = if *m == Mode::Login { Mode::Register } else { Mode::Login });
                    }
                >
                    {move || if mode.get() == Mode::Login { "No account yet? Sign up" } else { "Already registered? Log in" }}
                </button>
            </form>
        </div>
    }
}
