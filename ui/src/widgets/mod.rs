mod animated_counter;
mod chart_tooltip;
mod error_banner;
mod glass_card;
mod login;
mod metric_card;
mod nav_bar;
mod role_badge;
pub mod users;

pub use animated_counter::animated_counter;
pub use chart_tooltip::{Slice, chart_tooltip};
pub use error_banner::error_banner;
pub use glass_card::{glass_card, glass_frame};
pub use login::login_widget;
pub use metric_card::metric_card;
pub use nav_bar::nav_bar;
pub use role_badge::role_badge;
pub use users::users_panel;
