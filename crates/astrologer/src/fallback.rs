//! Deterministic canned replies for when the model is unavailable.
//!
//! Matching is case-insensitive substring search over the user's question,
//! in fixed priority order; the first matching topic wins. The reply is
//! flavored for the active system and, when a profile is selected,
//! personalized with its first name.

use astro_core::AstrologySystem;

/// One topic: keywords checked in order, and the reply for a hit.
struct Topic {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const VEDIC_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["marriage", "wedding", "spouse"],
        reply: "Your seventh house holds the key to partnership. Jupiter's \
                transit through your chart suggests favorable periods for \
                marriage ahead. Traditional remedies like strengthening Venus \
                can support harmonious unions.",
    },
    Topic {
        keywords: &["career", "job", "profession"],
        reply: "Your tenth house governs career. Saturn's disciplined \
                influence rewards steady effort now; recognition follows \
                persistence. Consider propitiating Saturn on Saturdays for \
                professional stability.",
    },
    Topic {
        keywords: &["health", "medical"],
        reply: "The sixth house speaks to health matters. Maintain routine \
                and balance; your chart favors preventive care over crisis \
                response. Strengthening the Moon supports emotional and \
                physical well-being.",
    },
    Topic {
        keywords: &["money", "wealth", "finance"],
        reply: "Wealth flows through the second and eleventh houses. Jupiter's \
                grace suggests growth through patient accumulation rather than \
                speculation. Honor Lakshmi on Fridays to invite abundance.",
    },
];

const WESTERN_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["love", "relationship", "romance"],
        reply: "Venus guides matters of the heart. Current transits favor \
                openness and honest communication in relationships. Trust the \
                timing your chart reveals; meaningful connection develops when \
                you are authentic.",
    },
    Topic {
        keywords: &["career", "work", "job"],
        reply: "Your Midheaven points toward professional purpose. Saturn's \
                transit rewards structure and long-term commitment; this is a \
                season for building foundations rather than leaping.",
    },
    Topic {
        keywords: &["money", "finances", "wealth"],
        reply: "The second house governs your resources. Jupiter's influence \
                supports gradual financial growth through planning. Avoid \
                impulsive decisions during Mercury retrograde periods.",
    },
    Topic {
        keywords: &["health", "wellness"],
        reply: "The sixth house speaks to daily habits and well-being. Your \
                chart favors consistency: regular rest, movement, and \
                boundaries. Listen to what your body's rhythms tell you.",
    },
    Topic {
        keywords: &["purpose", "spiritual", "growth"],
        reply: "Your North Node reveals the direction of growth. Current \
                progressions invite reflection on what genuinely fulfills \
                you. Small intentional steps align you with your path.",
    },
];

const VEDIC_DEFAULT: &str = "The planetary positions in your birth chart \
                             offer guidance for every area of life. Ask about \
                             marriage, career, health, or wealth, and I will \
                             read what the grahas reveal.";

const WESTERN_DEFAULT: &str = "Your birth chart holds insight for every area \
                               of life. Ask about love, career, finances, \
                               health, or personal growth, and I will read \
                               what your placements reveal.";

/// A canned, system-flavored reply for the question.
///
/// Pure function of its inputs; the same question always produces the same
/// reply for a given system.
pub fn fallback_reply(
    system: AstrologySystem,
    question: &str,
    first_name: Option<&str>,
) -> String {
    let topics = match system {
        AstrologySystem::Vedic => VEDIC_TOPICS,
        AstrologySystem::Western => WESTERN_TOPICS,
    };
    let lowered = question.to_lowercase();

    let body = topics
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lowered.contains(k)))
        .map(|topic| topic.reply)
        .unwrap_or(match system {
            AstrologySystem::Vedic => VEDIC_DEFAULT,
            AstrologySystem::Western => WESTERN_DEFAULT,
        });

    match first_name {
        Some(name) => format!("{name}, {body}"),
        None => body.to_string(),
    }
}

/// The apology used when a reply cannot be generated at all.
pub fn apology(system: AstrologySystem) -> String {
    format!(
        "I apologize, but I am unable to provide {} astrological guidance at \
         this moment. Please try again shortly.",
        system.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vedic_marriage_keyword() {
        let reply = fallback_reply(AstrologySystem::Vedic, "When will my WEDDING happen?", None);
        assert!(reply.contains("seventh house"));
    }

    #[test]
    fn test_western_career_keyword() {
        let reply = fallback_reply(
            AstrologySystem::Western,
            "Should I change my job this year?",
            None,
        );
        assert!(reply.contains("Midheaven"));
    }

    #[test]
    fn test_priority_order_first_topic_wins() {
        // "marriage" outranks "money" in the Vedic table.
        let reply = fallback_reply(
            AstrologySystem::Vedic,
            "Will marriage bring me money?",
            None,
        );
        assert!(reply.contains("seventh house"));
        assert!(!reply.contains("eleventh house"));
    }

    #[test]
    fn test_default_reply_when_no_keyword() {
        let vedic = fallback_reply(AstrologySystem::Vedic, "Tell me something.", None);
        assert!(vedic.contains("grahas"));
        let western = fallback_reply(AstrologySystem::Western, "Tell me something.", None);
        assert!(western.contains("placements"));
    }

    #[test]
    fn test_personalization() {
        let reply = fallback_reply(AstrologySystem::Western, "What about love?", Some("Maya"));
        assert!(reply.starts_with("Maya, "));
    }

    #[test]
    fn test_deterministic() {
        let a = fallback_reply(AstrologySystem::Vedic, "career advice please", Some("Ravi"));
        let b = fallback_reply(AstrologySystem::Vedic, "career advice please", Some("Ravi"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_apology_names_system() {
        assert!(apology(AstrologySystem::Vedic).contains("vedic"));
        assert!(apology(AstrologySystem::Western).contains("western"));
    }
}
