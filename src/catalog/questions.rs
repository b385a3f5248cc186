use serde::{Deserialize, Serialize};

/// Psychological model a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    Maslow,
    Sdt,
    Perma,
    Habits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Maslow
    Physiological,
    Safety,
    LoveBelonging,
    Esteem,
    SelfActualization,
    // Self-determination theory
    Autonomy,
    Competence,
    Relatedness,
    // PERMA
    PositiveEmotion,
    Engagement,
    Relationships,
    Meaning,
    Accomplishment,
    // Practical habits
    Nutrition,
    Movement,
    Mindfulness,
    DigitalBalance,
    Nature,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Physiological,
        Category::Safety,
        Category::LoveBelonging,
        Category::Esteem,
        Category::SelfActualization,
        Category::Autonomy,
        Category::Competence,
        Category::Relatedness,
        Category::PositiveEmotion,
        Category::Engagement,
        Category::Relationships,
        Category::Meaning,
        Category::Accomplishment,
        Category::Nutrition,
        Category::Movement,
        Category::Mindfulness,
        Category::DigitalBalance,
        Category::Nature,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Physiological => "physiological",
            Category::Safety => "safety",
            Category::LoveBelonging => "love_belonging",
            Category::Esteem => "esteem",
            Category::SelfActualization => "self_actualization",
            Category::Autonomy => "autonomy",
            Category::Competence => "competence",
            Category::Relatedness => "relatedness",
            Category::PositiveEmotion => "positive_emotion",
            Category::Engagement => "engagement",
            Category::Relationships => "relationships",
            Category::Meaning => "meaning",
            Category::Accomplishment => "accomplishment",
            Category::Nutrition => "nutrition",
            Category::Movement => "movement",
            Category::Mindfulness => "mindfulness",
            Category::DigitalBalance => "digital_balance",
            Category::Nature => "nature",
        }
    }

    pub fn model(self) -> Model {
        match self {
            Category::Physiological
            | Category::Safety
            | Category::LoveBelonging
            | Category::Esteem
            | Category::SelfActualization => Model::Maslow,
            Category::Autonomy | Category::Competence | Category::Relatedness => Model::Sdt,
            Category::PositiveEmotion
            | Category::Engagement
            | Category::Relationships
            | Category::Meaning
            | Category::Accomplishment => Model::Perma,
            Category::Nutrition
            | Category::Movement
            | Category::Mindfulness
            | Category::DigitalBalance
            | Category::Nature => Model::Habits,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: Category,
    pub model: Model,
    pub text: &'static str,
}

const fn q(id: &'static str, category: Category, model: Model, text: &'static str) -> Question {
    Question {
        id,
        category,
        model,
        text,
    }
}

/// The daily questionnaire, in display order. Order is also the engine's
/// tie-break whenever two questions score the same.
pub static QUESTIONS: &[Question] = &[
    q(
        "maslow_physiological",
        Category::Physiological,
        Model::Maslow,
        "How well were your basic needs (sleep, food, rest) met today?",
    ),
    q(
        "maslow_energy",
        Category::Physiological,
        Model::Maslow,
        "How physically energized did you feel today?",
    ),
    q(
        "maslow_safety",
        Category::Safety,
        Model::Maslow,
        "How safe and secure did you feel (health, finances, home)?",
    ),
    q(
        "maslow_love",
        Category::LoveBelonging,
        Model::Maslow,
        "How connected and accepted did you feel by the people around you?",
    ),
    q(
        "maslow_esteem",
        Category::Esteem,
        Model::Maslow,
        "How much did you respect and value yourself today?",
    ),
    q(
        "maslow_self_actualization",
        Category::SelfActualization,
        Model::Maslow,
        "How much did you grow or express your potential today?",
    ),
    q(
        "sdt_autonomy",
        Category::Autonomy,
        Model::Sdt,
        "How much did your actions today feel like your own choice?",
    ),
    q(
        "sdt_competence",
        Category::Competence,
        Model::Sdt,
        "How capable and effective did you feel in what you did?",
    ),
    q(
        "sdt_relatedness",
        Category::Relatedness,
        Model::Sdt,
        "How close did you feel to people who matter to you?",
    ),
    q(
        "perma_positive_emotion",
        Category::PositiveEmotion,
        Model::Perma,
        "How often did you experience positive emotions today?",
    ),
    q(
        "perma_engagement",
        Category::Engagement,
        Model::Perma,
        "How absorbed were you in what you were doing?",
    ),
    q(
        "perma_flow",
        Category::Engagement,
        Model::Perma,
        "Did you lose track of time in a meaningful activity?",
    ),
    q(
        "perma_relationships",
        Category::Relationships,
        Model::Perma,
        "How supportive were your relationships today?",
    ),
    q(
        "perma_meaning",
        Category::Meaning,
        Model::Perma,
        "How meaningful and purposeful did your day feel?",
    ),
    q(
        "perma_accomplishment",
        Category::Accomplishment,
        Model::Perma,
        "How much did you accomplish what you set out to do?",
    ),
    q(
        "habit_nutrition",
        Category::Nutrition,
        Model::Habits,
        "How nourishing and regular were your meals today?",
    ),
    q(
        "habit_movement",
        Category::Movement,
        Model::Habits,
        "How much did you move your body today?",
    ),
    q(
        "habit_mindfulness",
        Category::Mindfulness,
        Model::Habits,
        "How present and calm were you during the day?",
    ),
    q(
        "habit_digital_balance",
        Category::DigitalBalance,
        Model::Habits,
        "How balanced was your screen and social media time?",
    ),
    q(
        "habit_nature",
        Category::Nature,
        Model::Habits,
        "How much time did you spend outdoors or in nature?",
    ),
];

pub fn question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Position in the catalog; unknown ids sort after every known one.
pub fn question_rank(id: &str) -> usize {
    QUESTIONS
        .iter()
        .position(|q| q.id == id)
        .unwrap_or(usize::MAX)
}

pub fn is_known_question(id: &str) -> bool {
    question(id).is_some()
}

pub fn category_of(id: &str) -> Option<Category> {
    question(id).map(|q| q.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn question_ids_are_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn every_category_has_a_question() {
        for category in Category::ALL {
            assert!(
                QUESTIONS.iter().any(|q| q.category == category),
                "{} has no question",
                category.as_str()
            );
        }
    }

    #[test]
    fn question_model_matches_category_model() {
        for q in QUESTIONS {
            assert_eq!(q.model, q.category.model(), "{}", q.id);
        }
    }

    #[test]
    fn category_serializes_to_stable_id() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn unknown_question_ranks_last() {
        assert_eq!(question_rank("maslow_physiological"), 0);
        assert_eq!(question_rank("removed_question"), usize::MAX);
        assert!(category_of("removed_question").is_none());
    }
}
