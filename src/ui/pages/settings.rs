use dioxus::prelude::*;

use crate::{
    app::ApiCommand,
    domain::{ApiCredentials, AppState, CacheResource},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::humanize_age,
    },
};

#[component]
pub fn SettingsPage() -> Element {
    rsx! {
        div { class: "grid gap-6 lg:grid-cols-2",
            CredentialsForm {}
            CachePanel {}
        }
    }
}

#[component]
fn CredentialsForm() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let command = use_context::<Signal<Option<ApiCommand>>>();

    let mut app_key = use_signal(String::new);
    let mut app_secret = use_signal(String::new);
    let mut account_no = use_signal(String::new);

    let on_save = {
        let toasts = toasts.clone();
        let mut command = command.clone();
        move |_| {
            let credentials = ApiCredentials {
                app_key: app_key().trim().to_string(),
                app_secret: app_secret().trim().to_string(),
                account_no: account_no().trim().to_string(),
            };
            if !credentials.is_complete() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "All three credential fields are required.",
                );
                return;
            }
            command.set(Some(ApiCommand::SaveCredentials(credentials)));
            app_secret.set(String::new());
        }
    };

    rsx! {
        section {
            class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-4",
            header {
                h3 { class: "text-sm font-semibold text-slate-200", "Broker Credentials" }
                p { class: "mt-1 text-xs text-slate-500",
                    "Stored by the backend; the secret is never shown again after saving."
                }
            }
            div {
                label { class: "block text-xs font-semibold uppercase text-slate-500", "App Key" }
                input {
                    class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    value: app_key(),
                    oninput: move |evt| app_key.set(evt.value()),
                }
            }
            div {
                label { class: "block text-xs font-semibold uppercase text-slate-500", "App Secret" }
                input {
                    class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    r#type: "password",
                    value: app_secret(),
                    oninput: move |evt| app_secret.set(evt.value()),
                }
            }
            div {
                label { class: "block text-xs font-semibold uppercase text-slate-500", "Account Number" }
                input {
                    class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    value: account_no(),
                    oninput: move |evt| account_no.set(evt.value()),
                    placeholder: "12345678-01",
                }
            }
            button {
                class: "w-full rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400",
                onclick: on_save,
                "Save Credentials"
            }
        }
    }
}

#[component]
fn CachePanel() -> Element {
    let state = use_context::<Signal<AppState>>();
    let command = use_context::<Signal<Option<ApiCommand>>>();
    let refresh_tick = use_context::<Signal<u32>>();

    let mut entries: Vec<(String, String)> = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, fetched_at)| {
                (cache_label(resource).to_string(), humanize_age(*fetched_at))
            })
            .collect()
    });
    entries.sort();

    let on_refresh = {
        let mut refresh_tick = refresh_tick.clone();
        move |_| {
            refresh_tick.set(refresh_tick().wrapping_add(1));
        }
    };

    let on_clear = {
        let mut command = command.clone();
        move |_| {
            command.set(Some(ApiCommand::ClearCache));
        }
    };

    rsx! {
        section {
            class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-4",
            header { class: "flex items-center justify-between",
                h3 { class: "text-sm font-semibold text-slate-200", "Data Freshness" }
                div { class: "flex gap-2",
                    button {
                        class: "rounded-md border border-slate-700 px-2 py-1 text-[11px] uppercase tracking-wide text-slate-300 hover:bg-slate-800",
                        onclick: on_refresh,
                        "Refresh All"
                    }
                    button {
                        class: "rounded-md border border-rose-500/40 px-2 py-1 text-[11px] uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                        onclick: on_clear,
                        "Clear Cache"
                    }
                }
            }
            if entries.is_empty() {
                p { class: "text-sm text-slate-500", "Nothing fetched yet this session." }
            } else {
                ul { class: "divide-y divide-slate-800 text-sm",
                    for (label, age) in entries {
                        li { class: "flex items-center justify-between py-2",
                            span { class: "text-slate-300", "{label}" }
                            span { class: "text-xs text-slate-500", "{age}" }
                        }
                    }
                }
            }
            p { class: "text-xs text-slate-500",
                "The symbol master refreshes weekly and survives a cache clear."
            }
        }
    }
}

fn cache_label(resource: &CacheResource) -> &'static str {
    match resource {
        CacheResource::Account => "Account summary",
        CacheResource::Positions => "Positions",
        CacheResource::Orders => "Orders",
        CacheResource::Strategies => "Strategies",
        CacheResource::Stocks => "Symbol master",
    }
}
