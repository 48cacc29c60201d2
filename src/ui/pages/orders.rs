use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, ApiCommand},
    domain::{pricing, AppState, Order},
    ui::{
        components::{
            modal_dialog::ModalDialog,
            order_table::{format_krw, OrderTable},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        state::{
            date_range::{resolve, today_kst, DateRange},
            DatePreset, ModalGroup,
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum OrderDialog {
    Detail,
    CancelConfirm,
}

#[component]
pub fn OrdersPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let orders_request = use_context::<Signal<Option<DateRange>>>();

    let mut preset = use_signal(|| state.with(|st| st.order_preset));
    let mut custom_start = use_signal(String::new);
    let mut custom_end = use_signal(String::new);
    let dialogs = use_signal(|| {
        ModalGroup::new([
            (OrderDialog::Detail, None::<Order>),
            (OrderDialog::CancelConfirm, None::<Order>),
        ])
    });

    // First visit queues a fetch for the persisted preset.
    use_hook({
        let preset = preset.clone();
        let mut orders_request = orders_request.clone();
        move || {
            let range = resolve(preset(), "", "", today_kst());
            orders_request.set(Some(range));
        }
    });

    let orders = state.with(|st| st.orders.clone());
    let active_preset = preset();
    let range = resolve(active_preset, &custom_start(), &custom_end(), today_kst());
    let range_label = format!("{} ~ {}", range.start_iso(), range.end_iso());

    let apply_preset = {
        let mut state = state.clone();
        let mut orders_request = orders_request.clone();
        let custom_start = custom_start.clone();
        let custom_end = custom_end.clone();
        move |chosen: DatePreset| {
            preset.set(chosen);
            state.with_mut(|st| st.order_preset = chosen);
            persist_user_state(&state);
            // `today` is sampled at apply time, not cached from the render.
            let range = resolve(chosen, &custom_start(), &custom_end(), today_kst());
            orders_request.set(Some(range));
        }
    };

    let on_apply_custom = {
        let mut apply_preset = apply_preset.clone();
        let toasts = toasts.clone();
        let custom_start = custom_start.clone();
        let custom_end = custom_end.clone();
        move |_| {
            if custom_start().trim().is_empty() || custom_end().trim().is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Both dates are needed for a custom range; showing today instead.",
                );
            }
            apply_preset(DatePreset::Custom);
        }
    };

    let on_detail = {
        let mut dialogs = dialogs.clone();
        move |order: Order| {
            dialogs.with_mut(|group| group.open(&OrderDialog::Detail, Some(order)));
        }
    };

    let on_cancel = {
        let mut dialogs = dialogs.clone();
        move |order: Order| {
            dialogs.with_mut(|group| group.open(&OrderDialog::CancelConfirm, Some(order)));
        }
    };

    rsx! {
        div { class: "space-y-6",
            section {
                class: "flex flex-wrap items-end gap-3 rounded-xl border border-slate-800 bg-slate-900/40 px-4 py-3",
                div {
                    class: "flex flex-wrap items-center gap-2 text-xs uppercase tracking-wide text-slate-400",
                    span { "Range:" }
                    for option in [DatePreset::Today, DatePreset::Week, DatePreset::Month, DatePreset::Custom] {
                        button {
                            class: preset_button_class(active_preset == option),
                            onclick: {
                                let mut apply_preset = apply_preset.clone();
                                move |_| {
                                    if option == DatePreset::Custom {
                                        preset.set(DatePreset::Custom);
                                    } else {
                                        apply_preset(option);
                                    }
                                }
                            },
                            "{option.label()}"
                        }
                    }
                }
                if active_preset == DatePreset::Custom {
                    div { class: "flex items-end gap-2",
                        div {
                            label { class: "block text-xs font-semibold uppercase text-slate-500", "Start" }
                            input {
                                class: "mt-1 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                placeholder: "2024-01-01",
                                value: custom_start(),
                                oninput: move |evt| custom_start.set(evt.value()),
                            }
                        }
                        div {
                            label { class: "block text-xs font-semibold uppercase text-slate-500", "End" }
                            input {
                                class: "mt-1 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                placeholder: "2024-01-31",
                                value: custom_end(),
                                oninput: move |evt| custom_end.set(evt.value()),
                            }
                        }
                        button {
                            class: "rounded-lg bg-indigo-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-indigo-400",
                            onclick: on_apply_custom,
                            "Apply"
                        }
                    }
                }
                span { class: "ml-auto text-xs text-slate-500", "{range_label}" }
            }

            OrderTable { rows: orders, on_detail, on_cancel }

            OrderDetailDialog { dialogs }
            CancelConfirmDialog { dialogs }
        }
    }
}

fn preset_button_class(active: bool) -> &'static str {
    if active {
        "rounded-md border border-indigo-500/60 bg-indigo-500/15 px-2 py-1 text-[11px] font-semibold text-indigo-100"
    } else {
        "rounded-md border border-slate-800 px-2 py-1 text-[11px] text-slate-400 transition hover:border-slate-600 hover:text-slate-200"
    }
}

#[component]
fn OrderDetailDialog(dialogs: Signal<ModalGroup<OrderDialog, Order>>) -> Element {
    let group = dialogs();
    let Some(order) = group.data(&OrderDialog::Detail).cloned() else {
        return rsx! { Fragment {} };
    };
    let open = group.is_open(&OrderDialog::Detail);

    let amount = order.order_amount();
    let amount_label = amount
        .map(|a| format_krw(a.round() as i64))
        .unwrap_or_else(|| "Market".to_string());
    let cost_label = amount
        .map(|a| {
            let cost = pricing::trading_cost(a, order.side.is_sell());
            format!(
                "fee {} + tax {} = {} KRW",
                format_krw(cost.fee),
                format_krw(cost.tax),
                format_krw(cost.total)
            )
        })
        .unwrap_or_else(|| "n/a until filled".to_string());

    let on_close = {
        let mut dialogs = dialogs.clone();
        move |_| dialogs.with_mut(|group| group.close(&OrderDialog::Detail))
    };

    rsx! {
        ModalDialog {
            title: format!("Order {}", order.id),
            open,
            on_close,
            dl { class: "grid grid-cols-2 gap-x-4 gap-y-2 text-sm",
                dt { class: "text-slate-500", "Stock" }
                dd { class: "text-slate-200", "{order.name} ({order.code})" }
                dt { class: "text-slate-500", "Side" }
                dd { class: "text-slate-200", "{order.side.label()}" }
                dt { class: "text-slate-500", "Status" }
                dd { class: "text-slate-200", "{order.status.label()}" }
                dt { class: "text-slate-500", "Filled" }
                dd { class: "text-slate-200", "{order.filled_quantity} / {order.quantity}" }
                dt { class: "text-slate-500", "Amount" }
                dd { class: "text-slate-200", "{amount_label}" }
                dt { class: "text-slate-500", "Est. costs" }
                dd { class: "text-slate-200", "{cost_label}" }
                dt { class: "text-slate-500", "Placed" }
                dd { class: "text-slate-200", "{order.ordered_at}" }
            }
        }
    }
}

#[component]
fn CancelConfirmDialog(dialogs: Signal<ModalGroup<OrderDialog, Order>>) -> Element {
    let command = use_context::<Signal<Option<ApiCommand>>>();

    let group = dialogs();
    let Some(order) = group.data(&OrderDialog::CancelConfirm).cloned() else {
        return rsx! { Fragment {} };
    };
    let open = group.is_open(&OrderDialog::CancelConfirm);

    let mut on_close = {
        let mut dialogs = dialogs.clone();
        move |_| dialogs.with_mut(|group| group.close(&OrderDialog::CancelConfirm))
    };

    let on_confirm = {
        let mut dialogs = dialogs.clone();
        let mut command = command.clone();
        let order_id = order.id.clone();
        move |_| {
            command.set(Some(ApiCommand::CancelOrder(order_id.clone())));
            dialogs.with_mut(|group| group.close(&OrderDialog::CancelConfirm));
        }
    };

    rsx! {
        ModalDialog {
            title: "Cancel order?".to_string(),
            open,
            on_close,
            div { class: "space-y-4 text-sm text-slate-300",
                p { "This cancels the remaining {order.quantity - order.filled_quantity} shares of {order.name}." }
                div { class: "flex justify-end gap-3",
                    button {
                        class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800",
                        onclick: move |_| on_close(()),
                        "Keep Order"
                    }
                    button {
                        class: "rounded-lg bg-rose-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-rose-400",
                        onclick: on_confirm,
                        "Cancel Order"
                    }
                }
            }
        }
    }
}
