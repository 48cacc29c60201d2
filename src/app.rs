use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{ApiCredentials, AppState, CacheResource},
    infra::api::{CacheStatus, OrderRequest, StrategyPayload, TradeApiClient},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{DashboardPage, OrdersPage, SettingsPage, StrategyPage},
        shell::Shell,
        state::DateRange,
    },
    util::{
        assets,
        persistence::{load_ui_state, store_ui_state},
    },
};

pub const APP_NAME: &str = "KTrade Dashboard";

/// Shared TTL for API data before a refresh is triggered.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/orders")]
    Orders {},
    #[route("/strategy")]
    Strategy {},
    #[route("/settings")]
    Settings {},
}

/// Mutations queued from anywhere in the UI and drained by a single
/// dispatcher resource, so pages never hold their own client.
#[derive(Clone, Debug)]
pub enum ApiCommand {
    PlaceOrder(OrderRequest),
    CancelOrder(String),
    SaveStrategy(StrategyPayload),
    DeleteStrategy(String),
    SaveCredentials(ApiCredentials),
    ClearCache,
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_ui_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // One client for the whole session; its per-resource cache only pays
    // off when every fetch goes through the same instance.
    let client = use_hook(|| match TradeApiClient::new() {
        Ok(client) => Some(client),
        Err(err) => {
            println!("[api] failed to initialise client: {err}");
            None
        }
    });

    // Orders fetch trigger shared across routes. Stays set so a refresh
    // tick re-fetches the same range.
    let orders_request = use_signal(|| None::<DateRange>);
    use_context_provider(|| orders_request.clone());

    let command = use_signal(|| None::<ApiCommand>);
    use_context_provider(|| command.clone());

    // Bumped to force all resources to re-run.
    let refresh_tick = use_signal(|| 0u32);
    use_context_provider(|| refresh_tick.clone());

    let _portfolio = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        let refresh_tick = refresh_tick.clone();
        move || {
            let client = client.clone();
            async move { fetch_portfolio(state.clone(), toasts.clone(), client, refresh_tick()).await }
        }
    });

    let _strategies = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        let refresh_tick = refresh_tick.clone();
        move || {
            let client = client.clone();
            async move { fetch_strategies(state.clone(), toasts.clone(), client, refresh_tick()).await }
        }
    });

    let _stocks = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        move || {
            let client = client.clone();
            async move { fetch_stocks(state.clone(), toasts.clone(), client).await }
        }
    });

    let _orders = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        let orders_request = orders_request.clone();
        let refresh_tick = refresh_tick.clone();
        move || {
            let client = client.clone();
            async move {
                fetch_orders(
                    state.clone(),
                    toasts.clone(),
                    client,
                    orders_request(),
                    refresh_tick(),
                )
                .await
            }
        }
    });

    let _dispatcher = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        let command = command.clone();
        let refresh_tick = refresh_tick.clone();
        move || {
            let client = client.clone();
            async move {
                dispatch_command(
                    state.clone(),
                    toasts.clone(),
                    client,
                    command.clone(),
                    refresh_tick.clone(),
                )
                .await
            }
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = store_ui_state(&snapshot) {
        println!("[state] failed to persist preferences: {err}");
    }
}

async fn fetch_portfolio(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TradeApiClient>,
    _tick: u32,
) -> Option<CacheStatus> {
    let client = client?;

    let mut worst = CacheStatus::Fresh;
    match client.get_account_summary().await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.account = Some(payload.data.clone());
                st.cache
                    .record_fetch(CacheResource::Account, payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                worst = CacheStatus::Stale;
            }
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load account summary: {err}"),
            );
            return None;
        }
    }

    match client.get_positions().await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.positions = payload.data.clone();
                st.cache
                    .record_fetch(CacheResource::Positions, payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                worst = CacheStatus::Stale;
            }
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load positions: {err}"),
            );
            return None;
        }
    }

    if worst == CacheStatus::Stale {
        push_toast(
            toasts.clone(),
            ToastKind::Warning,
            "Showing cached portfolio data; the backend is unreachable.",
        );
    }
    Some(worst)
}

async fn fetch_strategies(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TradeApiClient>,
    _tick: u32,
) -> Option<CacheStatus> {
    let client = client?;

    match client.get_strategies().await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.strategies = payload.data.clone();
                st.cache
                    .record_fetch(CacheResource::Strategies, payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Showing cached strategies; the backend is unreachable.",
                );
            }
            Some(payload.status)
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load strategies: {err}"),
            );
            None
        }
    }
}

async fn fetch_stocks(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TradeApiClient>,
) -> Option<usize> {
    let client = client?;

    match client.get_stocks().await {
        Ok(cache) => {
            let fetched_at = UNIX_EPOCH + Duration::from_secs(cache.cached_at);
            let stocks = cache.to_stocks();
            let count = stocks.len();
            state.with_mut(|st| {
                st.stocks = stocks;
                st.cache.record_fetch(CacheResource::Stocks, fetched_at);
            });
            Some(count)
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load the symbol master: {err}"),
            );
            None
        }
    }
}

async fn fetch_orders(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TradeApiClient>,
    requested: Option<DateRange>,
    _tick: u32,
) -> Option<CacheStatus> {
    let Some(range) = requested else {
        return None;
    };
    let client = client?;

    println!(
        "[orders] fetching orders for {}..{}",
        range.start_iso(),
        range.end_iso()
    );

    match client.get_orders(&range).await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.orders = payload.data.clone();
                st.cache
                    .record_fetch(CacheResource::Orders, payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Showing cached orders; the backend is unreachable.",
                );
            }
            Some(payload.status)
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load orders: {err}"),
            );
            None
        }
    }
}

async fn dispatch_command(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TradeApiClient>,
    mut command: Signal<Option<ApiCommand>>,
    mut refresh_tick: Signal<u32>,
) {
    let Some(queued) = command() else {
        return;
    };
    let Some(client) = client else {
        command.set(None);
        return;
    };

    match queued {
        ApiCommand::PlaceOrder(request) => match client.place_order(&request).await {
            Ok(order) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("{} order for {} submitted.", order.side.label(), order.name),
                );
                refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
            }
            Err(err) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Order rejected: {err}"),
                );
            }
        },
        ApiCommand::CancelOrder(order_id) => match client.cancel_order(&order_id).await {
            Ok(()) => {
                push_toast(toasts.clone(), ToastKind::Success, "Order cancelled.");
                refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
            }
            Err(err) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Failed to cancel order: {err}"),
                );
            }
        },
        ApiCommand::SaveStrategy(payload) => match client.save_strategy(&payload).await {
            Ok(strategy) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("Strategy \"{}\" saved.", strategy.name),
                );
                refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
            }
            Err(err) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Failed to save strategy: {err}"),
                );
            }
        },
        ApiCommand::DeleteStrategy(strategy_id) => {
            match client.delete_strategy(&strategy_id).await {
                Ok(()) => {
                    push_toast(toasts.clone(), ToastKind::Success, "Strategy deleted.");
                    refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
                }
                Err(err) => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to delete strategy: {err}"),
                    );
                }
            }
        }
        ApiCommand::SaveCredentials(credentials) => {
            match client.save_credentials(&credentials).await {
                Ok(()) => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Success,
                        "Credentials saved. The backend will reconnect to the broker.",
                    );
                }
                Err(err) => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to save credentials: {err}"),
                    );
                }
            }
        }
        ApiCommand::ClearCache => {
            client.clear_cache().await;
            state.with_mut(|st| st.cache.clear());
            push_toast(toasts.clone(), ToastKind::Info, "Cache cleared.");
            refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
        }
    }

    command.set(None);
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Orders() -> Element {
    rsx! { Shell { OrdersPage {} } }
}

#[component]
pub fn Strategy() -> Element {
    rsx! { Shell { StrategyPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
