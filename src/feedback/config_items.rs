//! Configuration records offered ahead of device results
//!
//! The first query word selects them with the coarse fuzzy filter, so
//! "api" or "sh" already surfaces the matching entry.

use crate::feedback::items::{DisplayItem, BURN_ICON, INFO_ICON, SYNC_ICON, WEB_ICON};
use crate::matching::FuzzyMatcher;

struct ConfigCommand {
    keyword: &'static str,
    title: &'static str,
    subtitle: &'static str,
    icon: &'static str,
}

const CONFIG_COMMANDS: &[ConfigCommand] = &[
    ConfigCommand {
        keyword: "update",
        title: "Update Devices and Scenes",
        subtitle: "Refresh the stored devices and scenes from the backend",
        icon: SYNC_ICON,
    },
    ConfigCommand {
        keyword: "apikey",
        title: "Set API Key",
        subtitle: "Store a personal access token for the backend",
        icon: WEB_ICON,
    },
    ConfigCommand {
        keyword: "showstatus",
        title: "Turn on/off showing of status when single device",
        subtitle: "Adds latency. When off, status is still available via the status command",
        icon: INFO_ICON,
    },
    ConfigCommand {
        keyword: "reinit",
        title: "Reinitialize",
        subtitle: "CAUTION: deletes all stored scenes, devices and API keys",
        icon: BURN_ICON,
    },
];

/// Whether a config record can be actioned with the words typed so far
fn is_complete(keyword: &str, words: &[&str]) -> bool {
    match keyword {
        "apikey" => words.len() > 1,
        "showstatus" => words.get(1).is_some_and(|w| matches!(*w, "on" | "off")),
        _ => true,
    }
}

/// Config records matching the first word of the query, best match first
pub fn config_items(query: &str, matcher: &FuzzyMatcher, threshold: f64) -> Vec<DisplayItem> {
    let words: Vec<&str> = query.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Vec::new();
    };

    matcher
        .filter(first, CONFIG_COMMANDS, |c: &ConfigCommand| c.keyword, threshold)
        .into_iter()
        .map(|scored| {
            let command = scored.item;
            let arg = std::iter::once(command.keyword)
                .chain(words.iter().skip(1).copied())
                .collect::<Vec<_>>()
                .join(" ");
            DisplayItem::new(command.title, command.subtitle, command.icon)
                .with_arg(arg)
                .with_autocomplete(command.keyword)
                .valid(is_complete(command.keyword, &words))
        })
        .collect()
}
