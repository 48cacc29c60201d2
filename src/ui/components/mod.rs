pub mod kpi_card;
pub mod modal_dialog;
pub mod order_table;
pub mod position_table;
pub mod toast;
