//! Conversational context assembly.
//!
//! Builds the facts block and bounded history window for one reply. Works
//! entirely from persisted data; no engine or network calls happen here.

use astro_core::{AstrologySystem, HistoryTurn, PromptContext, Role};
use database::models::{ChatMessage, Profile};

/// How many recent messages accompany each generation request.
pub const HISTORY_WINDOW: i64 = 10;

const NOT_AVAILABLE: &str = "Not available";

/// The facts block for one system, from a profile's persisted fields.
/// Missing fields render as placeholders rather than being omitted.
pub fn facts_for(system: AstrologySystem, profile: Option<&Profile>) -> String {
    match (system, profile) {
        (AstrologySystem::Vedic, Some(p)) => format!(
            "User's Vedic details:\n\
             {}\
             Rasi (Moon Sign): {}\n\
             Nakshatra (Birth Star): {}\n\
             Lagna (Ascendant): {}",
            identity_lines(p),
            field(p.vedic_rasi.as_deref()),
            field(p.vedic_nakshatra.as_deref()),
            field(p.vedic_lagna.as_deref()),
        ),
        (AstrologySystem::Western, Some(p)) => format!(
            "User's Western details:\n\
             {}\
             Sun Sign: {}\n\
             Moon Sign: {}",
            identity_lines(p),
            field(p.western_sun_sign.as_deref()),
            field(p.western_moon_sign.as_deref()),
        ),
        (system, None) => format!(
            "No specific profile selected. Provide general {} astrological guidance.",
            system.display_name()
        ),
    }
}

/// Name and birth-data lines shared by both systems' blocks.
fn identity_lines(p: &Profile) -> String {
    let name = match p.lastname.as_deref() {
        Some(last) if !last.trim().is_empty() => format!("{} {last}", p.firstname),
        _ => p.firstname.clone(),
    };
    format!(
        "Name: {}\n\
         Birth Date: {}\n\
         Birth Time: {}\n\
         Birth Place: {}\n",
        name,
        field(Some(&p.date_of_birth)),
        field(Some(&p.time_of_birth)),
        field(Some(&p.place_of_birth)),
    )
}

fn field(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// Map stored messages onto history turns, oldest first. Rows with an
/// unrecognized sender are skipped.
pub fn history_turns(messages: &[ChatMessage]) -> Vec<HistoryTurn> {
    messages
        .iter()
        .filter_map(|m| {
            Role::parse(&m.sender_type).map(|role| HistoryTurn {
                role,
                text: m.content.clone(),
            })
        })
        .collect()
}

/// Assemble the full per-turn context.
pub fn build_context(
    system: AstrologySystem,
    profile: Option<&Profile>,
    history: &[ChatMessage],
    question: &str,
) -> PromptContext {
    PromptContext {
        system,
        astrology_facts: facts_for(system, profile),
        history: history_turns(history),
        question: question.to_string(),
        first_name: profile.map(|p| p.firstname.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            profile_id: 1,
            firstname: "Asha".to_string(),
            middlename: None,
            lastname: None,
            gender: "FEMALE".to_string(),
            date_of_birth: "1990-05-15".to_string(),
            time_of_birth: "10:30".to_string(),
            place_of_birth: "Chennai, India".to_string(),
            timezone: Some("Asia/Kolkata".to_string()),
            western_sun_sign: Some("Taurus".to_string()),
            western_moon_sign: None,
            vedic_rasi: Some("Mesha".to_string()),
            vedic_nakshatra: Some("Bharani".to_string()),
            vedic_lagna: None,
            is_deleted: false,
            deleted_at: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_vedic_facts_with_placeholders() {
        let facts = facts_for(AstrologySystem::Vedic, Some(&profile()));
        assert!(facts.contains("Name: Asha"));
        assert!(facts.contains("Birth Date: 1990-05-15"));
        assert!(facts.contains("Birth Place: Chennai, India"));
        assert!(facts.contains("Rasi (Moon Sign): Mesha"));
        assert!(facts.contains("Nakshatra (Birth Star): Bharani"));
        assert!(facts.contains("Lagna (Ascendant): Not available"));
    }

    #[test]
    fn test_western_facts_with_placeholders() {
        let facts = facts_for(AstrologySystem::Western, Some(&profile()));
        assert!(facts.contains("Sun Sign: Taurus"));
        assert!(facts.contains("Moon Sign: Not available"));
        assert!(!facts.contains("Rasi"));
    }

    #[test]
    fn test_no_profile_fallback_line() {
        let vedic = facts_for(AstrologySystem::Vedic, None);
        assert!(vedic.contains("general vedic astrological guidance"));
        let western = facts_for(AstrologySystem::Western, None);
        assert!(western.contains("general western astrological guidance"));
    }

    #[test]
    fn test_history_turns_skip_unknown_senders() {
        let make = |sender: &str, content: &str| ChatMessage {
            message_id: 0,
            account_id: 1,
            profile_id: None,
            sender_type: sender.to_string(),
            content: content.to_string(),
            astrology_system: "VEDIC".to_string(),
            is_deleted: false,
            deleted_at: None,
            created_at: String::new(),
        };
        let messages = vec![make("USER", "hi"), make("SYSTEM", "noise"), make("BOT", "hello")];

        let turns = history_turns(&messages);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Bot);
    }

    #[test]
    fn test_build_context_carries_first_name() {
        let p = profile();
        let ctx = build_context(AstrologySystem::Vedic, Some(&p), &[], "hello");
        assert_eq!(ctx.first_name.as_deref(), Some("Asha"));
        assert_eq!(ctx.question, "hello");

        let ctx = build_context(AstrologySystem::Vedic, None, &[], "hello");
        assert!(ctx.first_name.is_none());
    }
}
