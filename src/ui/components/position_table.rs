use dioxus::prelude::*;

use crate::domain::Position;
use crate::ui::components::order_table::format_krw;
use crate::ui::state::{sort_rows, SortKey, SortState};

#[derive(Clone, Copy, PartialEq, Eq)]
enum PositionColumn {
    Name,
    Quantity,
    AvgPrice,
    CurrentPrice,
    EvalAmount,
    Profit,
    ProfitRate,
}

#[component]
pub fn PositionTable(
    rows: ReadOnlySignal<Vec<Position>>,
    on_select: EventHandler<Position>,
) -> Element {
    let sort = use_signal(|| SortState::new(PositionColumn::EvalAmount));
    let count = rows().len();
    let is_empty = count == 0;

    // Re-sorted only when the rows or the sort state change.
    let sorted = use_memo(move || sort_rows(&rows(), &sort(), position_sort_key));

    rsx! {
        div {
            class: "rounded-xl border border-slate-800 bg-slate-900/40",
            header {
                class: "flex flex-wrap items-center justify-between gap-2 border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Positions" }
                span { class: "text-xs text-slate-500", "{count} holdings" }
            }
            if is_empty {
                p { class: "px-4 py-6 text-sm text-slate-500", "No holdings yet." }
            } else {
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "sticky top-0 z-10 bg-slate-900 text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            Header { label: "Stock", column: PositionColumn::Name, sort }
                            Header { label: "Qty", column: PositionColumn::Quantity, sort, right: true }
                            Header { label: "Avg (KRW)", column: PositionColumn::AvgPrice, sort, right: true }
                            Header { label: "Now (KRW)", column: PositionColumn::CurrentPrice, sort, right: true }
                            Header { label: "Value (KRW)", column: PositionColumn::EvalAmount, sort, right: true }
                            Header { label: "P&L (KRW)", column: PositionColumn::Profit, sort, right: true }
                            Header { label: "P&L %", column: PositionColumn::ProfitRate, sort, right: true }
                        }
                    }
                    tbody {
                        class: "divide-y divide-slate-800",
                        for position in sorted() {
                            PositionRow { position: position.clone(), on_select: on_select.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Header(
    label: &'static str,
    column: PositionColumn,
    sort: Signal<SortState<PositionColumn>>,
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
fn PositionRow(position: Position, on_select: EventHandler<Position>) -> Element {
    let current_label = position
        .current_price
        .map(|price| format_krw(price.round() as i64))
        .unwrap_or_else(|| "—".to_string());
    let value_label = position
        .eval_amount
        .map(format_krw)
        .unwrap_or_else(|| "—".to_string());
    let profit_label = position
        .profit
        .map(format_krw)
        .unwrap_or_else(|| "—".to_string());
    let rate_label = position
        .profit_rate
        .map(|rate| format!("{rate:+.2}%"))
        .unwrap_or_else(|| "—".to_string());
    // Korean convention: gains red, losses blue.
    let profit_class = match position.profit {
        Some(profit) if profit > 0 => "px-4 py-3 text-right text-rose-300",
        Some(profit) if profit < 0 => "px-4 py-3 text-right text-sky-300",
        _ => "px-4 py-3 text-right text-slate-300",
    };
    let selected = position.clone();

    rsx! {
        tr {
            class: "cursor-pointer hover:bg-slate-800/40",
            onclick: move |_| on_select.call(selected.clone()),
            td { class: "px-4 py-3 font-medium text-slate-100", "{position.name}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{position.quantity}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{format_krw(position.avg_price.round() as i64)}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{current_label}" }
            td { class: "px-4 py-3 text-right text-slate-300", "{value_label}" }
            td { class: "{profit_class}", "{profit_label}" }
            td { class: "{profit_class}", "{rate_label}" }
        }
    }
}

fn position_sort_key(position: &Position, column: PositionColumn) -> Option<SortKey> {
    match column {
        PositionColumn::Name => Some(position.name.clone().into()),
        PositionColumn::Quantity => Some(position.quantity.into()),
        PositionColumn::AvgPrice => Some(position.avg_price.into()),
        PositionColumn::CurrentPrice => position.current_price.map(SortKey::from),
        PositionColumn::EvalAmount => position.eval_amount.map(SortKey::from),
        PositionColumn::Profit => position.profit.map(SortKey::from),
        PositionColumn::ProfitRate => position.profit_rate.map(SortKey::from),
    }
}
