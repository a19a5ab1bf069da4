//! Pages module for the application.
//!
//! One page per [`Route`](roster_business::Route):
//! - `login_page`: sign-in and registration for anonymous visitors
//! - `users_page`: user administration, behind the navigation bar

mod login_page;
mod users_page;

pub use login_page::login_page;
pub use users_page::users_page;
