//! Shared color constants for the UI.

use egui::Color32;
use roster_business::Role;

/// Forest green for active accounts and success.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for errors, inactive accounts and destructive actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for pending work and moderators.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue for verified accounts and standard users.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(59, 130, 246);

/// Purple for administrators.
pub const COLOR_PURPLE: Color32 = Color32::from_rgb(139, 92, 246);

/// Muted text, e.g. secondary lines and placeholders.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(128, 128, 128);

pub fn role_color(role: Role) -> Color32 {
    match role {
        Role::Admin => COLOR_PURPLE,
        Role::Moderator => COLOR_AMBER,
        Role::User => COLOR_BLUE,
    }
}
