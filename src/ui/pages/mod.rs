pub mod dashboard;
pub mod orders;
pub mod settings;
pub mod strategy;

pub use dashboard::DashboardPage;
pub use orders::OrdersPage;
pub use settings::SettingsPage;
pub use strategy::StrategyPage;

/// "3m ago" style label for cache timestamps.
pub fn humanize_age(updated_at: std::time::SystemTime) -> String {
    use std::time::SystemTime;

    let now = SystemTime::now();
    let age = now.duration_since(updated_at).unwrap_or_default().as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}
