use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, ApiCommand},
    domain::{pricing, AppState, OrderSide, Position, Stock},
    infra::api::OrderRequest,
    ui::{
        components::{
            kpi_card::KpiCard,
            modal_dialog::ModalDialog,
            order_table::format_krw,
            position_table::PositionTable,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        state::ModalState,
    },
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let account = state.with(|st| st.account.clone());
    let positions = state.with(|st| st.positions.clone());

    // Quick sell ticket for the clicked holding.
    let mut ticket = use_signal(ModalState::<Position>::new);

    let (total_asset, available_cash, profit_label, profit_desc) = match &account {
        Some(summary) => (
            format_krw(summary.total_asset),
            format_krw(summary.available_cash),
            format_krw(summary.total_profit),
            format!("{:+.2}% on {}", summary.profit_rate, format_krw(summary.total_purchase)),
        ),
        None => (
            "—".to_string(),
            "—".to_string(),
            "—".to_string(),
            "Waiting for account data".to_string(),
        ),
    };

    let on_select = {
        move |position: Position| {
            ticket.with_mut(|modal| modal.open(Some(position)));
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "grid gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Total Asset".to_string(),
                    value: total_asset,
                    description: Some("Deposits plus evaluation (KRW)".to_string()),
                }
                KpiCard {
                    title: "Available Cash".to_string(),
                    value: available_cash,
                    description: Some("Orderable balance (KRW)".to_string()),
                }
                KpiCard {
                    title: "Evaluation P&L".to_string(),
                    value: profit_label,
                    description: Some(profit_desc),
                }
            }

            section {
                PositionTable { rows: positions, on_select }
            }

            Watchlist {}

            SellTicket { ticket }
        }
    }
}

const WATCH_SEARCH_LIMIT: usize = 8;

#[component]
fn Watchlist() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut query = use_signal(String::new);

    let watched: Vec<(String, Option<String>, Option<f64>)> = state.with(|st| {
        st.watch_codes
            .iter()
            .map(|code| {
                (
                    code.clone(),
                    st.stock_name(code).map(str::to_string),
                    st.position_for(code).and_then(|p| p.current_price),
                )
            })
            .collect()
    });

    let needle = query().trim().to_lowercase();
    let matches: Vec<Stock> = if needle.is_empty() {
        Vec::new()
    } else {
        state.with(|st| {
            st.stocks
                .iter()
                .filter(|stock| {
                    !st.watch_codes.contains(&stock.code)
                        && (stock.code.starts_with(&needle)
                            || stock.name.to_lowercase().contains(&needle))
                })
                .take(WATCH_SEARCH_LIMIT)
                .cloned()
                .collect()
        })
    };

    let on_add = {
        let mut state = state.clone();
        let mut query = query.clone();
        move |code: String| {
            state.with_mut(|st| {
                if !st.watch_codes.contains(&code) {
                    st.watch_codes.push(code);
                }
            });
            persist_user_state(&state);
            query.set(String::new());
        }
    };

    let on_remove = {
        let mut state = state.clone();
        move |code: String| {
            state.with_mut(|st| st.watch_codes.retain(|entry| entry != &code));
            persist_user_state(&state);
        }
    };

    rsx! {
        section {
            class: "rounded-xl border border-slate-800 bg-slate-900/40",
            header {
                class: "flex flex-wrap items-center justify-between gap-3 border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Watchlist" }
                input {
                    class: "w-64 rounded-lg border border-slate-700 bg-slate-950 px-3 py-1.5 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    placeholder: "Add by code or name...",
                    value: query(),
                    oninput: move |evt| query.set(evt.value()),
                }
            }
            if !matches.is_empty() {
                ul { class: "divide-y divide-slate-800 border-b border-slate-800",
                    for stock in matches {
                        li {
                            button {
                                class: "flex w-full items-center justify-between px-4 py-2 text-sm hover:bg-slate-800/40",
                                onclick: {
                                    let mut on_add = on_add.clone();
                                    let code = stock.code.clone();
                                    move |_| on_add(code.clone())
                                },
                                span { class: "text-slate-200", "{stock.name}" }
                                span { class: "text-xs text-slate-500", "{stock.code}" }
                            }
                        }
                    }
                }
            }
            if watched.is_empty() {
                p { class: "px-4 py-6 text-sm text-slate-500",
                    "Nothing watched yet. Search above to pin symbols here."
                }
            } else {
                ul { class: "divide-y divide-slate-800",
                    for (code, name, quote) in watched {
                        WatchRow {
                            code: code.clone(),
                            name: name.clone().unwrap_or_else(|| "Unknown".to_string()),
                            quote,
                            on_remove: {
                                let mut on_remove = on_remove.clone();
                                move |code: String| on_remove(code)
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn WatchRow(
    code: String,
    name: String,
    quote: Option<f64>,
    on_remove: EventHandler<String>,
) -> Element {
    let quote_label = quote
        .map(|price| format!("{} KRW", format_krw(price.round() as i64)))
        .unwrap_or_else(|| "—".to_string());
    let code_for_remove = code.clone();

    rsx! {
        li { class: "flex items-center justify-between px-4 py-2 text-sm",
            div { class: "flex items-baseline gap-2",
                span { class: "font-medium text-slate-100", "{name}" }
                span { class: "text-xs text-slate-500", "{code}" }
            }
            div { class: "flex items-center gap-3",
                span { class: "text-slate-300", "{quote_label}" }
                button {
                    class: "text-xs uppercase tracking-wide text-slate-500 hover:text-rose-300",
                    onclick: move |_| on_remove.call(code_for_remove.clone()),
                    "Remove"
                }
            }
        }
    }
}

#[component]
fn SellTicket(ticket: Signal<ModalState<Position>>) -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let command = use_context::<Signal<Option<ApiCommand>>>();

    let mut quantity_input = use_signal(String::new);
    let mut price_input = use_signal(String::new);

    let modal = ticket();
    let Some(position) = modal.data().cloned() else {
        return rsx! { Fragment {} };
    };

    let quantity = quantity_input().trim().parse::<i64>().ok();
    let price = pricing::price_by_type(
        pricing::PriceKind::Amount,
        Some(&price_input()),
        None,
        None,
    )
    .or(position.current_price);

    let amount = match (quantity, price) {
        (Some(qty), Some(price)) if qty > 0 => Some(price * qty as f64),
        _ => None,
    };
    let cost = amount.map(|amount| pricing::trading_cost(amount, true));
    let amount_label = amount
        .map(|a| format_krw(a.round() as i64))
        .unwrap_or_else(|| "—".to_string());
    let cost_label = cost
        .map(|c| {
            format!(
                "fee {} + tax {} = {}",
                format_krw(c.fee),
                format_krw(c.tax),
                format_krw(c.total)
            )
        })
        .unwrap_or_else(|| "—".to_string());
    let submit_disabled = amount.is_none();

    let on_close = {
        let mut ticket = ticket.clone();
        move |_| ticket.with_mut(|modal| modal.close())
    };

    let on_submit = {
        let mut ticket = ticket.clone();
        let toasts = toasts.clone();
        let mut command = command.clone();
        let position = position.clone();
        move |_| {
            let Some(qty) = quantity_input().trim().parse::<i64>().ok().filter(|q| *q > 0)
            else {
                push_toast(toasts.clone(), ToastKind::Error, "Enter a positive quantity.");
                return;
            };
            if qty > position.quantity {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Only {} shares held.", position.quantity),
                );
                return;
            }
            let limit = pricing::price_by_type(
                pricing::PriceKind::Amount,
                Some(&price_input()),
                None,
                None,
            );
            command.set(Some(ApiCommand::PlaceOrder(OrderRequest::new(
                &position.code,
                OrderSide::Sell,
                qty,
                limit,
            ))));
            quantity_input.set(String::new());
            price_input.set(String::new());
            ticket.with_mut(|modal| modal.close());
        }
    };

    rsx! {
        ModalDialog {
            title: format!("Sell {}", position.name),
            open: modal.is_open,
            on_close,
            div { class: "space-y-4 text-sm text-slate-300",
                p { class: "text-xs text-slate-500",
                    "Holding {position.quantity} shares at avg {format_krw(position.avg_price.round() as i64)} KRW"
                }
                div { class: "grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Quantity" }
                        input {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                            inputmode: "numeric",
                            value: quantity_input(),
                            oninput: move |evt| quantity_input.set(evt.value()),
                            placeholder: "10",
                        }
                    }
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Limit Price (blank = market)" }
                        input {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                            inputmode: "decimal",
                            value: price_input(),
                            oninput: move |evt| price_input.set(evt.value()),
                        }
                    }
                }
                div { class: "rounded-lg border border-slate-800/60 bg-slate-950/80 p-3 text-xs",
                    p { class: "text-slate-400", "Order amount: {amount_label} KRW" }
                    p { class: "text-slate-500", "Estimated costs: {cost_label}" }
                }
                button {
                    class: "w-full rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400 disabled:cursor-not-allowed disabled:opacity-40",
                    disabled: submit_disabled,
                    onclick: on_submit,
                    "Submit Sell Order"
                }
            }
        }
    }
}
