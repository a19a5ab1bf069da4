use egui::Ui;
use roster_business::{Role, User, UserStats};

use crate::utils::colors::{COLOR_BLUE, COLOR_GREEN, COLOR_MUTED, COLOR_RED, role_color};
use crate::widgets::{Slice, metric_card};

pub(super) fn metrics_row(ui: &mut Ui, users: &[User], total: u64) {
    let stats = UserStats::compute(users, total);
    let loaded = users.len() as u64;
    let active = stats.active as u64;
    let verified = stats.verified as u64;

    let role_counts: Vec<(Role, u64)> = Role::ALL
        .iter()
        .map(|&role| (role, users.iter().filter(|u| u.role == role).count() as u64))
        .collect();
    let role_slices: Vec<Slice<'_>> = role_counts
        .iter()
        .map(|&(role, value)| Slice {
            label: role.label(),
            value,
            color: role_color(role),
        })
        .collect();

    ui.horizontal_wrapped(|ui| {
        metric_card(
            ui,
            "Total users",
            stats.total,
            stats.total,
            &[
                Slice {
                    label: "Active",
                    value: active,
                    color: COLOR_GREEN,
                },
                Slice {
                    label: "Inactive",
                    value: stats.inactive(),
                    color: COLOR_RED,
                },
            ],
        );
        metric_card(
            ui,
            "Active users",
            active,
            loaded,
            &[
                Slice {
                    label: "Active",
                    value: active,
                    color: COLOR_GREEN,
                },
                Slice {
                    label: "Inactive",
                    value: loaded.saturating_sub(active),
                    color: COLOR_RED,
                },
            ],
        );
        metric_card(
            ui,
            "Verified accounts",
            verified,
            loaded,
            &[
                Slice {
                    label: "Verified",
                    value: verified,
                    color: COLOR_BLUE,
                },
                Slice {
                    label: "Unverified",
                    value: loaded.saturating_sub(verified),
                    color: COLOR_MUTED,
                },
            ],
        );
        metric_card(
            ui,
            "Administrators",
            stats.admins as u64,
            loaded,
            &role_slices,
        );
    });
}
