//! Notification vocabulary commands.
//!
//! ```bash
//! # Every tag, grouped by category
//! vl-cli notifications types
//!
//! # Only one category
//! vl-cli notifications types --category inventory
//! ```

use vapour_lounge_core::{CASH_DISCREPANCY_THRESHOLD, NotificationCategory, Price};

/// Render the notification tags, grouped by category.
#[must_use]
pub fn render_types(category: Option<NotificationCategory>) -> String {
    let categories = category.map_or_else(|| NotificationCategory::ALL.to_vec(), |c| vec![c]);

    let mut out = String::new();
    for category in categories {
        out.push_str(&format!("{} ({})\n", category.label(), category.as_str()));
        for notification_type in category.types() {
            out.push_str(&format!("  {notification_type}\n"));
        }
    }
    out.push_str(&format!(
        "\ncash_discrepancy fires above {}\n",
        Price::php(CASH_DISCREPANCY_THRESHOLD).display()
    ));
    out
}

/// Print the notification tags.
pub fn types(category: Option<NotificationCategory>) {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_types(category));
    }
}
