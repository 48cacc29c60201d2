//! Transient notification stack for fetch failures and mutation results.

use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

/// Oldest entries drop off once the stack is full.
const TOAST_QUEUE_LIMIT: usize = 5;
const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn label(self) -> &'static str {
        match self {
            ToastKind::Info => "Info",
            ToastKind::Success => "Done",
            ToastKind::Warning => "Warning",
            ToastKind::Error => "Error",
        }
    }

    /// Left-edge accent and label color on the otherwise uniform slate card.
    fn accent(self) -> &'static str {
        match self {
            ToastKind::Info => "border-l-sky-400 text-sky-300",
            ToastKind::Success => "border-l-emerald-400 text-emerald-300",
            ToastKind::Warning => "border-l-amber-400 text-amber-300",
            ToastKind::Error => "border-l-rose-400 text-rose-300",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let toast = ToastMessage::new(kind, message);
    println!("[toast] {}: {}", toast.kind.label(), toast.text);
    toasts.with_mut(|entries| enqueue(entries, toast));
}

fn enqueue(entries: &mut Vec<ToastMessage>, toast: ToastMessage) {
    while entries.len() >= TOAST_QUEUE_LIMIT {
        entries.remove(0);
    }
    entries.push(toast);
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let entries = toasts();
    if entries.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "fixed right-4 top-20 z-30 flex w-80 flex-col gap-2",
            for toast in entries {
                ToastCard { toast, toasts }
            }
        }
    }
}

#[component]
fn ToastCard(toast: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let timer_id = toast.id.clone();
    let timer_toasts = toasts.clone();
    use_future(move || {
        let mut toasts = timer_toasts.clone();
        let id = timer_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|entries| entries.retain(|entry| entry.id != id));
        }
    });

    let accent = toast.kind.accent();
    let label = toast.kind.label();
    let dismiss_id = toast.id.clone();
    let mut toasts = toasts.clone();

    rsx! {
        div {
            class: "rounded-r-lg border-l-4 bg-slate-900/95 px-3 py-2 shadow-lg {accent}",
            div { class: "flex items-center justify-between",
                span { class: "text-[10px] font-semibold uppercase tracking-wide", "{label}" }
                button {
                    class: "text-xs text-slate-500 hover:text-slate-200",
                    onclick: move |_| {
                        toasts.with_mut(|entries| entries.retain(|entry| entry.id != dismiss_id));
                    },
                    "✕"
                }
            }
            p { class: "mt-1 text-sm text-slate-200", "{toast.text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drops_oldest_beyond_limit() {
        let mut entries = Vec::new();
        for n in 0..TOAST_QUEUE_LIMIT + 2 {
            enqueue(
                &mut entries,
                ToastMessage::new(ToastKind::Info, format!("msg {n}")),
            );
        }
        assert_eq!(entries.len(), TOAST_QUEUE_LIMIT);
        assert_eq!(entries.first().map(|t| t.text.as_str()), Some("msg 2"));
        assert_eq!(entries.last().map(|t| t.text.as_str()), Some("msg 6"));
    }

    #[test]
    fn messages_get_distinct_ids() {
        let a = ToastMessage::new(ToastKind::Error, "request failed");
        let b = ToastMessage::new(ToastKind::Error, "request failed");
        assert_ne!(a.id, b.id);
    }
}
