//! Reply templates. All user-visible text lives here so the router stays
//! pure routing logic and the wording is testable in one place.

use beacon_content::{Event, Resource};
use beacon_core::config::{ClubConfig, LinkEntry};

fn tbd(s: &str) -> &str {
    if s.is_empty() {
        "TBD"
    } else {
        s
    }
}

pub fn help_text(club: &ClubConfig, timezone: &str) -> String {
    format!(
        "📚 *{name} Bot — Commands*\n\n\
         *🔔 Reminders*\n\
         /remind `HH:MM message` — set a one-shot reminder\n\
         _Example: /remind 14:30 Submit the article_\n\n\
         *📅 Club Info*\n\
         /events — upcoming events\n\
         /about — about the club\n\
         /links — quick links\n\n\
         *📖 Learn & Explore*\n\
         /resources — learning materials\n\
         /tip — random editing tip\n\
         /fact — random fun fact\n\n\
         *🆘 Help*\n\
         /start — restart the bot\n\
         /help — show this message\n\n\
         ⏰ _Timezone: {timezone}_",
        name = club.name,
    )
}

pub fn remind_usage() -> String {
    "❌ *Invalid format!*\n\n\
     *Usage:* `/remind HH:MM message`\n\
     *Example:* `/remind 14:30 Submit the article`"
        .to_string()
}

pub fn remind_confirmation(when: &str, message: &str) -> String {
    format!(
        "✅ *Reminder set!*\n\n\
         📅 *Time:* {when}\n\
         📝 *Message:* {message}\n\n\
         _I'll ping you when it's time._"
    )
}

pub fn remind_failed() -> String {
    "❌ Something went wrong setting that reminder. Please try again.".to_string()
}

pub fn first_time_welcome(club: &ClubConfig, first_name: &str) -> String {
    let mut text = format!(
        "👋 *Welcome aboard, {first_name}!*\n\n\
         You're the newest member of *{}*! 🌟\n",
        club.name
    );
    if !club.organization.is_empty() {
        text.push_str(&format!("\n🏛️ {}\n", club.organization));
    }
    if !club.tagline.is_empty() {
        text.push_str(&format!("_{}_\n", club.tagline));
    }
    text.push_str(
        "\nI can help you:\n\
         • 📅 stay on top of club events\n\
         • ⏰ set personal reminders\n\
         • 📚 find learning resources\n\
         • 💡 pick up daily tips & facts",
    );
    text
}

pub fn quick_start() -> String {
    "📌 *Quick start:*\n\n\
     • /events — see what's happening\n\
     • /tip — get a quick tip\n\
     • /fact — learn something new\n\
     • /help — all commands\n\n\
     _Try /tip now to get started!_ 💡"
        .to_string()
}

pub fn welcome_back(club: &ClubConfig, first_name: &str) -> String {
    let tagline = if club.tagline.is_empty() {
        String::new()
    } else {
        format!("_{}_\n", club.tagline)
    };
    format!(
        "🌐 *Welcome back to {name}!*\n{tagline}\n\
         Hello {first_name}! 👋\n\n\
         📌 *What can I do for you?*\n\n\
         • /remind `HH:MM message` — set reminders\n\
         • /events — upcoming events\n\
         • /resources — learning materials\n\
         • /tip — random tip\n\
         • /fact — random fact\n\
         • /links — quick links\n\
         • /about — about the club\n\
         • /help — all commands",
        name = club.name,
    )
}

pub fn events_text(events: &[Event]) -> String {
    if events.is_empty() {
        return "📅 *Upcoming Events*\n\n_No upcoming events. Check back later!_".to_string();
    }

    let mut text = String::from("📅 *Upcoming Events*\n\n");
    for event in events {
        text.push_str(&format!("*{}*\n", tbd(&event.title)));
        text.push_str(&format!("📆 {} at {}\n", tbd(&event.date), tbd(&event.time)));
        text.push_str(&format!("📍 {}\n", tbd(&event.venue)));
        if !event.description.is_empty() {
            text.push_str(&format!("_{}_\n", event.description));
        }
        text.push('\n');
    }
    text.push_str("_Set a reminder with /remind so you don't miss out!_");
    text
}

pub fn resources_text(resources: &[Resource]) -> String {
    if resources.is_empty() {
        return "📚 *Learning Resources*\n\n_No resources available yet._".to_string();
    }

    let mut text = String::from("📚 *Learning Resources*\n\n");
    for resource in resources {
        text.push_str(&format!("*{}*\n", tbd(&resource.title)));
        if !resource.url.is_empty() {
            text.push_str(&format!("🔗 {}\n", resource.url));
        }
        if !resource.description.is_empty() {
            text.push_str(&format!("_{}_\n", resource.description));
        }
        text.push('\n');
    }
    text.push_str("_Happy learning! 📖_");
    text
}

pub fn tip_text(tip: Option<String>) -> String {
    match tip {
        Some(tip) => format!("💡 *Tip*\n\n{tip}\n\n_Type /tip for another one!_"),
        None => "💡 *Tip*\n\n_No tips available yet._".to_string(),
    }
}

pub fn fact_text(fact: Option<String>) -> String {
    match fact {
        Some(fact) => format!("🌐 *Did You Know?*\n\n{fact}\n\n_Type /fact for another one!_"),
        None => "🌐 *Did You Know?*\n\n_No facts available yet._".to_string(),
    }
}

pub fn links_text(links: &[LinkEntry]) -> String {
    if links.is_empty() {
        return "🔗 *Quick Links*\n\n_No links configured yet._".to_string();
    }

    let mut text = String::from("🔗 *Quick Links*\n\n");
    for link in links {
        text.push_str(&format!("*{}*\n{}\n\n", link.label, link.url));
    }
    text.push_str("_Start exploring!_ 🚀");
    text
}

pub fn about_text(club: &ClubConfig) -> String {
    let mut text = format!("📖 *About {}*\n", club.name);
    if !club.organization.is_empty() {
        text.push_str(&format!("\n🏛️ *{}*\n", club.organization));
    }
    if !club.tagline.is_empty() {
        text.push_str(&format!("\n_{}_\n", club.tagline));
    }
    text.push_str(
        "\nOpen to everyone — say hi at our next event, \
         or browse /links to get involved.",
    );
    text
}
