use dioxus::prelude::*;

/// Overlay dialog shell. Visibility is driven entirely by the owning page's
/// `ModalState`; this component only renders and forwards the close click.
#[component]
pub fn ModalDialog(
    title: String,
    open: bool,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    if !open {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "fixed inset-0 z-20 flex items-center justify-center bg-slate-950/70 backdrop-blur-sm",
            onclick: move |_| on_close.call(()),
            div {
                class: "w-full max-w-lg rounded-xl border border-slate-700 bg-slate-900 p-6 shadow-xl",
                onclick: move |evt| evt.stop_propagation(),
                header {
                    class: "flex items-center justify-between border-b border-slate-800 pb-3",
                    h3 { class: "text-sm font-semibold text-slate-200", "{title}" }
                    button {
                        class: "text-xs uppercase tracking-wide text-slate-500 hover:text-slate-200",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                div { class: "pt-4", {children} }
            }
        }
    }
}
