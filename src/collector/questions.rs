//! @acp:module "Question Bank"
//! @acp:summary "Fixed quiz prompts, answer options and their zone effects"
//! @acp:domain collector
//! @acp:layer data

use crate::diagnosis::{zeroed_scores, Zone, ZoneScores};

/// What choosing an option does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Profiling answer; only the label is kept
    Record,
    /// Explicit self-report of the problem zone
    Perceived(Zone),
    /// Pain points for a zone
    Pain { zone: Zone, points: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct AnswerOption {
    pub id: &'static str,
    pub label: &'static str,
    pub effect: Effect,
    /// Zone the user implicitly blames by picking this answer, with intensity
    pub complaint: Option<(Zone, u8)>,
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    /// May contain `{name}` and `{niche}`
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    pub fn option(&self, id: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Preset niches: (option id, button label, phrase used in prompts)
pub static NICHE_OPTIONS: [(&str, &str, &str); 4] = [
    ("niche_infoproducts", "💼 Info products", "in info products"),
    ("niche_consulting", "📊 Consulting", "in consulting"),
    ("niche_sales", "🚀 Sales", "in sales"),
    ("niche_business", "💰 Business", "in business"),
];

/// Option id that asks for a free-text niche
pub const NICHE_CUSTOM: &str = "niche_custom";

const fn record(id: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { id, label, effect: Effect::Record, complaint: None }
}

const fn complains(id: &'static str, label: &'static str, zone: Zone, level: u8) -> AnswerOption {
    AnswerOption { id, label, effect: Effect::Record, complaint: Some((zone, level)) }
}

const fn pain(id: &'static str, label: &'static str, zone: Zone, points: u32) -> AnswerOption {
    AnswerOption { id, label, effect: Effect::Pain { zone, points }, complaint: None }
}

const fn perceived(id: &'static str, label: &'static str, zone: Zone) -> AnswerOption {
    AnswerOption { id, label, effect: Effect::Perceived(zone), complaint: None }
}

pub static PROFILE_QUESTIONS: [Question; 3] = [
    Question {
        id: "q1",
        title: "Question 1. Point A",
        prompt: "Great, {name}! A few quick questions, about two minutes.\n\n\
                 🎯 Let's start with an honest point A. No guilt, just facts.\n\n\
                 How would you rate your 2025 in money and results {niche}?",
        options: &[
            record("q1_better", "📈 Better than previous years"),
            record("q1_same", "➡️ About the same"),
            complains("q1_worse", "📉 Worse than I wanted", Zone::Sales, 1),
        ],
    },
    Question {
        id: "q2",
        title: "Question 2. Income in 2025",
        prompt: "No exact numbers needed, just the order of magnitude.\n\n\
                 What was your average monthly income in 2025?",
        options: &[
            record("q2_under50", "💵 Up to 50,000 a month"),
            record("q2_50to100", "💰 50–100,000"),
            record("q2_100to300", "💎 100–300,000"),
            record("q2_over300", "🚀 300,000+"),
        ],
    },
    Question {
        id: "q3",
        title: "Question 3. Point B",
        prompt: "📍 Where do you want to be in 2026, so you can say \
                 \"this year was not wasted\"?\n\nWhat does growth mean for you in 2026?",
        options: &[
            complains("q3_x2x3", "📊 A steady x2–x3 of what I have now", Zone::Traffic, 2),
            complains(
                "q3_x5x10",
                "🚀 A leap of x5–x10, ready to work hard even if it's scary",
                Zone::Sales,
                2,
            ),
            complains("q3_x100", "💎 I dream of x100 but don't know how", Zone::Product, 2),
            complains(
                "q3_survive",
                "🌱 I just want to stop surviving and live normally",
                Zone::System,
                2,
            ),
        ],
    },
];

pub static PERCEIVED_QUESTION: Question = Question {
    id: "perceived",
    title: "Your guess",
    prompt: "Before the diagnosis: what do you think holds you back most right now?",
    options: &[
        perceived("perceived_product", "📦 My offer isn't clear enough", Zone::Product),
        perceived("perceived_traffic", "👥 Not enough new people", Zone::Traffic),
        perceived("perceived_content", "📝 My content doesn't convert", Zone::Content),
        perceived("perceived_sales", "💰 I struggle to sell", Zone::Sales),
        perceived("perceived_system", "⚙️ No time, no system, burnout", Zone::System),
    ],
};

pub static DIAGNOSTIC_QUESTIONS: [Question; 5] = [
    Question {
        id: "q4",
        title: "Block 1. Product / offer",
        prompt: "Imagine I'm your ideal client. Can you explain in one or two sentences \
                 what exactly I can buy from you and how you help me?",
        options: &[
            pain("q4_clear", "✅ Yes, I have a clear offer", Zone::Product, 0),
            pain("q4_medium", "🤔 Roughly, but I stumble", Zone::Product, 1),
            pain("q4_chaos", "😵 No, I have a million ideas and formats", Zone::Product, 2),
        ],
    },
    Question {
        id: "q5",
        title: "Block 2. Audience flow (traffic)",
        prompt: "A good product without people is a concert in an empty hall.\n\n\
                 How steadily do new people come to you?",
        options: &[
            pain("q5_stable", "✅ New people arrive every week", Zone::Traffic, 0),
            pain("q5_unstable", "🤷 Sometimes someone, sometimes silence", Zone::Traffic, 1),
            pain("q5_stagnant", "😞 Always the same faces, nobody new", Zone::Traffic, 2),
        ],
    },
    Question {
        id: "q6",
        title: "Block 3. Content / trust",
        prompt: "People buy the story you invite them into, not just the product.\n\n\
                 How do you run content on your main channels?",
        options: &[
            pain("q6_regular", "✅ Regularly, with clear topics and rubrics", Zone::Content, 0),
            pain("q6_irregular", "🎨 When inspiration strikes, however it goes", Zone::Content, 2),
            pain("q6_no_funnel", "📚 Lots of value, but I rarely lead to the product", Zone::Content, 2),
        ],
    },
    Question {
        id: "q7",
        title: "Block 4. Sales and offers",
        prompt: "How often do you calmly tell people: \"here is my format, here is the price, \
                 here is how to sign up\"?",
        options: &[
            pain("q7_regular", "✅ Regularly, I'm fine with selling", Zone::Sales, 0),
            pain("q7_sometimes", "🤔 Sometimes, when things get tight", Zone::Sales, 1),
            pain("q7_ashamed", "😳 I'm embarrassed to sell and hope they'll ask", Zone::Sales, 3),
        ],
    },
    Question {
        id: "q8",
        title: "Block 5. System / resources",
        prompt: "If 20 clients came to you tomorrow at once, what would happen?",
        options: &[
            pain("q8_scale", "✅ I'd plan it and cope", Zone::System, 0),
            pain("q8_struggle", "😰 I'd have to strain, but I'd manage", Zone::System, 1),
            pain("q8_burnout", "🔥 I'd burn out, get confused and drop the ball", Zone::System, 2),
        ],
    },
];

/// Highest pain each zone can collect from the diagnostic questions
pub fn reachable_scores() -> ZoneScores {
    let mut scores = zeroed_scores();
    for question in &DIAGNOSTIC_QUESTIONS {
        let mut best: Vec<(Zone, u32)> = Vec::new();
        for option in question.options {
            if let Effect::Pain { zone, points } = option.effect {
                match best.iter_mut().find(|(z, _)| *z == zone) {
                    Some((_, max)) => *max = (*max).max(points),
                    None => best.push((zone, points)),
                }
            }
        }
        for (zone, max) in best {
            *scores.entry(zone).or_insert(0) += max;
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::DiagnosisEngine;

    #[test]
    fn test_one_diagnostic_question_per_zone() {
        for zone in Zone::ALL {
            let count = DIAGNOSTIC_QUESTIONS
                .iter()
                .filter(|q| {
                    q.options
                        .iter()
                        .any(|o| matches!(o.effect, Effect::Pain { zone: z, .. } if z == zone))
                })
                .count();
            assert_eq!(count, 1, "zone {}", zone);
        }
    }

    #[test]
    fn test_reachable_scores_match_weights() {
        let reachable = reachable_scores();
        assert_eq!(reachable[&Zone::Product], 2);
        assert_eq!(reachable[&Zone::Traffic], 2);
        assert_eq!(reachable[&Zone::Content], 2);
        assert_eq!(reachable[&Zone::Sales], 3);
        assert_eq!(reachable[&Zone::System], 2);
    }

    #[test]
    fn test_builtin_max_scores_hold_reachable() {
        let engine = DiagnosisEngine::builtin().unwrap();
        assert!(engine.check_reachable(&reachable_scores()).is_ok());
    }

    #[test]
    fn test_option_ids_unique() {
        let mut ids: Vec<&str> = PROFILE_QUESTIONS
            .iter()
            .chain(DIAGNOSTIC_QUESTIONS.iter())
            .chain(std::iter::once(&PERCEIVED_QUESTION))
            .flat_map(|q| q.options.iter().map(|o| o.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_every_growth_goal_names_a_complaint() {
        assert!(PROFILE_QUESTIONS[2].options.iter().all(|o| o.complaint.is_some()));
    }

    #[test]
    fn test_pain_answers_carry_no_complaint() {
        for question in &DIAGNOSTIC_QUESTIONS {
            assert!(question.options.iter().all(|o| o.complaint.is_none()));
        }
    }

    #[test]
    fn test_perceived_question_covers_every_zone() {
        for zone in Zone::ALL {
            assert!(PERCEIVED_QUESTION
                .options
                .iter()
                .any(|o| o.effect == Effect::Perceived(zone)));
        }
    }
}
