use dioxus::prelude::*;

use crate::{
    app::ApiCommand,
    domain::{pricing, AppState, Strategy},
    infra::api::StrategyPayload,
    ui::{
        components::{
            modal_dialog::ModalDialog,
            order_table::format_krw,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        state::ModalState,
    },
};

#[component]
pub fn StrategyPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let strategies = state.with(|st| st.strategies.clone());
    let count = strategies.len();

    // Editing loads a strategy into the form; `None` means a new one.
    let mut editing = use_signal(|| None::<Strategy>);
    let delete_confirm = use_signal(ModalState::<Strategy>::new);

    let on_edit = {
        move |strategy: Strategy| {
            editing.set(Some(strategy));
        }
    };

    let on_delete = {
        let mut delete_confirm = delete_confirm.clone();
        move |strategy: Strategy| {
            delete_confirm.with_mut(|modal| modal.open(Some(strategy)));
        }
    };

    rsx! {
        div { class: "grid gap-6 lg:grid-cols-[2fr_3fr]",
            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40",
                header {
                    class: "flex items-center justify-between border-b border-slate-800 px-4 py-3",
                    h3 { class: "text-sm font-semibold text-slate-200", "Strategies" }
                    span { class: "text-xs text-slate-500", "{count} configured" }
                }
                if strategies.is_empty() {
                    p { class: "px-4 py-6 text-sm text-slate-500",
                        "No strategies yet. Use the form to add one."
                    }
                } else {
                    ul { class: "divide-y divide-slate-800",
                        for strategy in strategies {
                            StrategyItem {
                                strategy: strategy.clone(),
                                on_edit,
                                on_delete,
                            }
                        }
                    }
                }
            }

            StrategyForm { editing }

            DeleteConfirmDialog { delete_confirm }
        }
    }
}

#[component]
fn StrategyItem(
    strategy: Strategy,
    on_edit: EventHandler<Strategy>,
    on_delete: EventHandler<Strategy>,
) -> Element {
    let status = if strategy.enabled {
        ("Active", "rounded-full bg-emerald-500/15 px-2 py-0.5 text-[11px] font-semibold text-emerald-300")
    } else {
        ("Paused", "rounded-full bg-slate-700/40 px-2 py-0.5 text-[11px] font-semibold text-slate-400")
    };
    let target_label = strategy
        .target_price
        .map(|price| format_krw(price.round() as i64))
        .unwrap_or_else(|| "—".to_string());
    let stop_label = strategy
        .stop_loss_price
        .map(|price| format_krw(price.round() as i64))
        .unwrap_or_else(|| "—".to_string());
    let for_edit = strategy.clone();
    let for_delete = strategy.clone();

    rsx! {
        li { class: "space-y-2 px-4 py-3",
            div { class: "flex items-center justify-between gap-2",
                div { class: "flex items-center gap-2",
                    span { class: "text-sm font-medium text-slate-100", "{strategy.name}" }
                    span { class: status.1, "{status.0}" }
                }
                div { class: "flex gap-2",
                    button {
                        class: "rounded-md border border-slate-700 px-2 py-1 text-[11px] uppercase tracking-wide text-slate-300 hover:bg-slate-800",
                        onclick: move |_| on_edit.call(for_edit.clone()),
                        "Edit"
                    }
                    button {
                        class: "rounded-md border border-rose-500/40 px-2 py-1 text-[11px] uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                        onclick: move |_| on_delete.call(for_delete.clone()),
                        "Delete"
                    }
                }
            }
            p { class: "text-xs text-slate-500",
                "{strategy.stock_name} ({strategy.code}) · buy {format_krw(strategy.buy_amount)} KRW · target {target_label} · stop {stop_label}"
            }
        }
    }
}

#[component]
fn StrategyForm(editing: Signal<Option<Strategy>>) -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let command = use_context::<Signal<Option<ApiCommand>>>();

    let mut name = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut buy_amount = use_signal(String::new);
    let mut enabled = use_signal(|| true);
    let mut target_kind = use_signal(pricing::PriceKind::default);
    let mut target_input = use_signal(String::new);
    let mut stop_kind = use_signal(pricing::PriceKind::default);
    let mut stop_input = use_signal(String::new);
    // Tracks which strategy the form was last seeded from.
    let mut seeded_id = use_signal(|| None::<String>);

    // Seed the form once per edit selection; manual typing wins afterwards.
    let editing_id = editing().map(|strategy| strategy.id.clone());
    if editing_id != seeded_id() {
        seeded_id.set(editing_id.clone());
        match editing() {
            Some(strategy) => {
                name.set(strategy.name.clone());
                code.set(strategy.code.clone());
                buy_amount.set(strategy.buy_amount.to_string());
                enabled.set(strategy.enabled);
                target_kind.set(pricing::PriceKind::Amount);
                target_input.set(
                    strategy
                        .target_price
                        .map(|price| format!("{price:.0}"))
                        .unwrap_or_default(),
                );
                stop_kind.set(pricing::PriceKind::Amount);
                stop_input.set(
                    strategy
                        .stop_loss_price
                        .map(|price| format!("{price:.0}"))
                        .unwrap_or_default(),
                );
            }
            None => {
                name.set(String::new());
                code.set(String::new());
                buy_amount.set(String::new());
                enabled.set(true);
                target_kind.set(pricing::PriceKind::Amount);
                target_input.set(String::new());
                stop_kind.set(pricing::PriceKind::Amount);
                stop_input.set(String::new());
            }
        }
    }

    let trimmed_code = code().trim().to_string();
    let stock_name = state.with(|st| st.stock_name(&trimmed_code).map(str::to_string));
    let base_price = state.with(|st| {
        st.position_for(&trimmed_code)
            .and_then(|position| position.current_price)
    });

    // Live resolved prices as the user types.
    let target = pricing::target_price(
        target_kind(),
        Some(&target_input()),
        Some(&target_input()),
        base_price,
    );
    let stop = pricing::stop_loss_price(
        stop_kind(),
        Some(&stop_input()),
        Some(&stop_input()),
        base_price,
    );
    let target_label = target
        .map(|price| format!("{} KRW", format_krw(price.round() as i64)))
        .unwrap_or_else(|| "—".to_string());
    let stop_label = stop
        .map(|price| format!("{} KRW", format_krw(price.round() as i64)))
        .unwrap_or_else(|| "—".to_string());
    let cost_label = buy_amount()
        .trim()
        .parse::<f64>()
        .ok()
        .map(|amount| format_krw(pricing::total_trading_cost(amount, false)))
        .unwrap_or_else(|| "—".to_string());

    let form_title = if editing().is_some() {
        "Edit Strategy"
    } else {
        "New Strategy"
    };

    let on_cancel_edit = {
        let mut editing = editing.clone();
        move |_| editing.set(None)
    };

    let on_save = {
        let toasts = toasts.clone();
        let mut command = command.clone();
        let mut editing = editing.clone();
        move |_| {
            let name_value = name().trim().to_string();
            if name_value.is_empty() {
                push_toast(toasts.clone(), ToastKind::Error, "Strategy needs a name.");
                return;
            }
            let code_value = code().trim().to_string();
            if code_value.len() != 6 || !code_value.chars().all(|c| c.is_ascii_digit()) {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Stock code must be 6 digits.",
                );
                return;
            }
            let Some(amount) = buy_amount().trim().parse::<i64>().ok().filter(|a| *a > 0)
            else {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Buy amount must be a positive KRW value.",
                );
                return;
            };
            let target = pricing::target_price(
                target_kind(),
                Some(&target_input()),
                Some(&target_input()),
                base_price,
            );
            let stop = pricing::stop_loss_price(
                stop_kind(),
                Some(&stop_input()),
                Some(&stop_input()),
                base_price,
            );
            command.set(Some(ApiCommand::SaveStrategy(StrategyPayload {
                id: editing().map(|strategy| strategy.id),
                name: name_value,
                code: code_value,
                enabled: enabled(),
                buy_amount: amount,
                target_price: target,
                stop_loss_price: stop,
            })));
            editing.set(None);
        }
    };

    rsx! {
        section {
            class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-4",
            header { class: "flex items-center justify-between",
                h3 { class: "text-sm font-semibold text-slate-200", "{form_title}" }
                if editing().is_some() {
                    button {
                        class: "text-xs uppercase tracking-wide text-slate-500 hover:text-slate-300",
                        onclick: on_cancel_edit,
                        "Start Fresh"
                    }
                }
            }
            div { class: "grid gap-4 sm:grid-cols-2",
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Name" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                        value: name(),
                        oninput: move |evt| name.set(evt.value()),
                        placeholder: "Samsung dip buyer",
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Stock Code" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                        inputmode: "numeric",
                        maxlength: 6,
                        value: code(),
                        oninput: move |evt| code.set(evt.value()),
                        placeholder: "005930",
                    }
                    if let Some(found) = stock_name {
                        p { class: "mt-1 text-xs text-emerald-400", "{found}" }
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Buy Amount (KRW)" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                        inputmode: "numeric",
                        value: buy_amount(),
                        oninput: move |evt| buy_amount.set(evt.value()),
                        placeholder: "1000000",
                    }
                }
                div { class: "flex items-end pb-2",
                    label { class: "flex items-center gap-2 text-sm text-slate-300",
                        input {
                            r#type: "checkbox",
                            checked: enabled(),
                            onchange: move |evt| enabled.set(evt.checked()),
                        }
                        "Enabled"
                    }
                }
            }

            PriceInput {
                label: "Target Price",
                kind: target_kind,
                value: target_input,
                resolved: target_label,
                percent_hint: "+5",
            }
            PriceInput {
                label: "Stop Loss",
                kind: stop_kind,
                value: stop_input,
                resolved: stop_label,
                percent_hint: "-3",
            }

            if base_price.is_none() {
                p { class: "text-xs text-amber-400",
                    "Percent mode needs a held position with a current price for this code."
                }
            }
            p { class: "text-xs text-slate-500", "Est. buy-side costs: {cost_label} KRW" }

            button {
                class: "w-full rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400",
                onclick: on_save,
                "Save Strategy"
            }
        }
    }
}

#[component]
fn PriceInput(
    label: &'static str,
    kind: Signal<pricing::PriceKind>,
    value: Signal<String>,
    resolved: String,
    percent_hint: &'static str,
) -> Element {
    let mut kind = kind.clone();
    let mut value = value.clone();
    let active = kind();
    let placeholder = match active {
        pricing::PriceKind::Amount => "71000",
        pricing::PriceKind::Percent => percent_hint,
    };

    rsx! {
        div {
            div { class: "flex items-center justify-between",
                label { class: "text-xs font-semibold uppercase text-slate-500", "{label}" }
                div { class: "flex gap-1",
                    button {
                        class: kind_button_class(active == pricing::PriceKind::Amount),
                        onclick: move |_| kind.set(pricing::PriceKind::Amount),
                        "KRW"
                    }
                    button {
                        class: kind_button_class(active == pricing::PriceKind::Percent),
                        onclick: move |_| kind.set(pricing::PriceKind::Percent),
                        "%"
                    }
                }
            }
            div { class: "mt-1 flex items-center gap-3",
                input {
                    class: "w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    inputmode: "decimal",
                    value: value(),
                    oninput: move |evt| value.set(evt.value()),
                    placeholder,
                }
                span { class: "whitespace-nowrap text-xs text-slate-400", "→ {resolved}" }
            }
        }
    }
}

fn kind_button_class(active: bool) -> &'static str {
    if active {
        "rounded-md border border-indigo-500/60 bg-indigo-500/15 px-2 py-0.5 text-[11px] font-semibold text-indigo-100"
    } else {
        "rounded-md border border-slate-800 px-2 py-0.5 text-[11px] text-slate-400 hover:border-slate-600 hover:text-slate-200"
    }
}

#[component]
fn DeleteConfirmDialog(delete_confirm: Signal<ModalState<Strategy>>) -> Element {
    let command = use_context::<Signal<Option<ApiCommand>>>();

    let modal = delete_confirm();
    let Some(strategy) = modal.data().cloned() else {
        return rsx! { Fragment {} };
    };

    let mut on_close = {
        let mut delete_confirm = delete_confirm.clone();
        move |_| delete_confirm.with_mut(|modal| modal.close())
    };

    let on_confirm = {
        let mut delete_confirm = delete_confirm.clone();
        let mut command = command.clone();
        let strategy_id = strategy.id.clone();
        move |_| {
            command.set(Some(ApiCommand::DeleteStrategy(strategy_id.clone())));
            delete_confirm.with_mut(|modal| modal.close());
        }
    };

    rsx! {
        ModalDialog {
            title: "Delete strategy?".to_string(),
            open: modal.is_open,
            on_close,
            div { class: "space-y-4 text-sm text-slate-300",
                p { "\"{strategy.name}\" on {strategy.stock_name} will stop trading immediately." }
                div { class: "flex justify-end gap-3",
                    button {
                        class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800",
                        onclick: move |_| on_close(()),
                        "Keep"
                    }
                    button {
                        class: "rounded-lg bg-rose-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-rose-400",
                        onclick: on_confirm,
                        "Delete"
                    }
                }
            }
        }
    }
}
