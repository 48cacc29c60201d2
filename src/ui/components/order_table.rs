use dioxus::prelude::*;

use crate::domain::{Order, OrderSide};
use crate::ui::state::{sort_rows, SortKey, SortState};

#[derive(Clone, Copy, PartialEq, Eq)]
enum OrderColumn {
    OrderedAt,
    Name,
    Side,
    Status,
    Quantity,
    Price,
    Amount,
}

#[component]
pub fn OrderTable(
    rows: ReadOnlySignal<Vec<Order>>,
    on_detail: EventHandler<Order>,
    on_cancel: EventHandler<Order>,
) -> Element {
    let sort = use_signal(|| SortState::new(OrderColumn::OrderedAt));
    let count = rows().len();
    let is_empty = count == 0;

    // Re-sorted only when the rows or the sort state change.
    let sorted = use_memo(move || sort_rows(&rows(), &sort(), order_sort_key));

    rsx! {
        div {
            class: "rounded-xl border border-slate-800 bg-slate-900/40",
            header {
                class: "flex flex-wrap items-center justify-between gap-2 border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Orders" }
                span { class: "text-xs text-slate-500", "{count} orders" }
            }
            if is_empty {
                p { class: "px-4 py-6 text-sm text-slate-500", "No orders in the selected range." }
            } else {
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "sticky top-0 z-10 bg-slate-900 text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            SortableHeader { label: "Time", column: OrderColumn::OrderedAt, sort }
                            SortableHeader { label: "Stock", column: OrderColumn::Name, sort }
                            SortableHeader { label: "Side", column: OrderColumn::Side, sort }
                            SortableHeader { label: "Status", column: OrderColumn::Status, sort }
                            SortableHeader { label: "Qty", column: OrderColumn::Quantity, sort, right: true }
                            SortableHeader { label: "Price (KRW)", column: OrderColumn::Price, sort, right: true }
                            SortableHeader { label: "Amount (KRW)", column: OrderColumn::Amount, sort, right: true }
                            th { class: "px-4 py-3 font-medium text-right", "" }
                        }
                    }
                    tbody {
                        class: "divide-y divide-slate-800",
                        for order in sorted() {
                            OrderRow {
                                order: order.clone(),
                                on_detail: on_detail.clone(),
                                on_cancel: on_cancel.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SortableHeader(
    label: &'static str,
    column: OrderColumn,
    sort: Signal<SortState<OrderColumn>>,
    right: Option<bool>,
) -> Element {
    let indicator = sort().indicator(column).unwrap_or("");
    let align = if right.unwrap_or(false) {
        "px-4 py-3 font-medium text-right"
    } else {
        "px-4 py-3 font-medium"
    };
    let mut sort = sort.clone();
    rsx! {
        th {
            class: align,
            button {
                class: "uppercase tracking-wide hover:text-slate-200",
                onclick: move |_| sort.with_mut(|state| state.toggle(column)),
                "{label} {indicator}"
            }
        }
    }
}

#[component]
fn OrderRow(order: Order, on_detail: EventHandler<Order>, on_cancel: EventHandler<Order>) -> Element {
    let side_class = match order.side {
        OrderSide::Buy => "text-rose-300",
        OrderSide::Sell => "text-sky-300",
    };
    let price_label = order
        .price
        .map(|price| format_krw(price.round() as i64))
        .unwrap_or_else(|| "Market".to_string());
    let amount_label = order
        .order_amount()
        .map(|amount| format_krw(amount.round() as i64))
        .unwrap_or_else(|| "—".to_string());
    let cancellable = order.status.is_cancellable();
    let order_for_detail = order.clone();
    let order_for_cancel = order.clone();

    rsx! {
        tr {
            class: "hover:bg-slate-800/40",
            td { class: "px-4 py-3 text-slate-400", "{order.ordered_at}" }
            td {
                class: "px-4 py-3 font-medium text-slate-100",
                button {
                    class: "hover:text-indigo-300",
                    onclick: move |_| on_detail.call(order_for_detail.clone()),
                    "{order.name}"
                }
            }
            td { class: "px-4 py-3 {side_class}", "{order.side.label()}" }
            td { class: "px-4 py-3 text-slate-300", "{order.status.label()}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{order.filled_quantity}/{order.quantity}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{price_label}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{amount_label}" }
            td {
                class: "px-4 py-3 text-right",
                if cancellable {
                    button {
                        class: "rounded-md border border-rose-500/40 px-2 py-1 text-[11px] font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                        onclick: move |_| on_cancel.call(order_for_cancel.clone()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

fn order_sort_key(order: &Order, column: OrderColumn) -> Option<SortKey> {
    match column {
        OrderColumn::OrderedAt => Some(order.ordered_at.clone().into()),
        OrderColumn::Name => Some(order.name.clone().into()),
        OrderColumn::Side => Some(order.side.label().into()),
        OrderColumn::Status => Some(order.status.label().into()),
        OrderColumn::Quantity => Some(order.quantity.into()),
        OrderColumn::Price => order.price.map(SortKey::from),
        OrderColumn::Amount => order.order_amount().map(SortKey::from),
    }
}

/// Formats whole KRW with thousands separators.
pub fn format_krw(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::format_krw;

    #[test]
    fn krw_formatting_groups_thousands() {
        assert_eq!(format_krw(0), "0");
        assert_eq!(format_krw(950), "950");
        assert_eq!(format_krw(71_000), "71,000");
        assert_eq!(format_krw(1_234_567), "1,234,567");
        assert_eq!(format_krw(-2_500), "-2,500");
    }
}
