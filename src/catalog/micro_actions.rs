use serde::{Deserialize, Serialize};

use super::questions::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Catalog row. Recommendations are copied out of these into owned
/// [`MicroAction`] values so they can be frozen onto stored records.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MicroActionDef {
    pub id: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroAction {
    pub id: String,
    pub category: Category,
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl From<&MicroActionDef> for MicroAction {
    fn from(def: &MicroActionDef) -> Self {
        Self {
            id: def.id.to_string(),
            category: def.category,
            priority: def.priority,
            title: def.title.to_string(),
            description: def.description.to_string(),
        }
    }
}

const fn a(
    id: &'static str,
    category: Category,
    priority: Priority,
    title: &'static str,
    description: &'static str,
) -> MicroActionDef {
    MicroActionDef {
        id,
        category,
        priority,
        title,
        description,
    }
}

use Category as C;
use Priority as P;

pub static MICRO_ACTIONS: &[MicroActionDef] = &[
    a(
        "quality_sleep",
        C::Physiological,
        P::High,
        "Quality Sleep",
        "Go to bed at the same time tonight and keep screens out of the bedroom for the last 30 minutes.",
    ),
    a(
        "hydration",
        C::Physiological,
        P::Medium,
        "Hydrate",
        "Keep a glass of water within reach and finish it before each meal.",
    ),
    a(
        "power_nap",
        C::Physiological,
        P::Low,
        "Short Rest",
        "Take a 15-minute lie-down or eyes-closed break in the early afternoon.",
    ),
    a(
        "safety_checklist",
        C::Safety,
        P::High,
        "One Worry, One Step",
        "Write down the thing that feels most uncertain and one small step that makes it safer.",
    ),
    a(
        "budget_glance",
        C::Safety,
        P::Medium,
        "Budget Glance",
        "Spend ten minutes reviewing this week's spending without judging it.",
    ),
    a(
        "reach_out",
        C::LoveBelonging,
        P::High,
        "Reach Out",
        "Send a message to someone you miss, just to say you were thinking of them.",
    ),
    a(
        "shared_meal",
        C::LoveBelonging,
        P::Medium,
        "Share a Meal",
        "Eat one meal this week with someone else, phones away.",
    ),
    a(
        "three_strengths",
        C::Esteem,
        P::High,
        "Three Strengths",
        "List three things you did well today, however small.",
    ),
    a(
        "accept_compliment",
        C::Esteem,
        P::Medium,
        "Accept a Compliment",
        "Next time someone praises you, say thank you without deflecting.",
    ),
    a(
        "learn_something",
        C::SelfActualization,
        P::Medium,
        "Learn Something",
        "Spend 20 minutes on a skill or topic you are curious about.",
    ),
    a(
        "values_journal",
        C::SelfActualization,
        P::Low,
        "Values Journal",
        "Write a paragraph about what kind of person you want to become.",
    ),
    a(
        "own_choice",
        C::Autonomy,
        P::High,
        "Make It Your Choice",
        "Pick one task today and decide for yourself how and when you do it.",
    ),
    a(
        "say_no",
        C::Autonomy,
        P::Medium,
        "Practice a Gentle No",
        "Decline one request that does not fit your priorities.",
    ),
    a(
        "small_win",
        C::Competence,
        P::High,
        "Plan a Small Win",
        "Choose a task you can finish in 15 minutes and complete it first thing.",
    ),
    a(
        "skill_practice",
        C::Competence,
        P::Medium,
        "Deliberate Practice",
        "Practice one skill for 10 focused minutes and note what improved.",
    ),
    a(
        "quality_time",
        C::Relatedness,
        P::High,
        "Quality Time",
        "Have one conversation today where you only listen and ask questions.",
    ),
    a(
        "gratitude_message",
        C::Relatedness,
        P::Medium,
        "Gratitude Message",
        "Tell someone specifically what you appreciate about them.",
    ),
    a(
        "savor_moment",
        C::PositiveEmotion,
        P::High,
        "Savor a Moment",
        "Pause for one minute to fully notice something pleasant around you.",
    ),
    a(
        "three_good_things",
        C::PositiveEmotion,
        P::Medium,
        "Three Good Things",
        "Before bed, write down three things that went well and why.",
    ),
    a(
        "focus_block",
        C::Engagement,
        P::High,
        "Focus Block",
        "Work on one meaningful task for 25 minutes with notifications off.",
    ),
    a(
        "hobby_time",
        C::Engagement,
        P::Medium,
        "Hobby Time",
        "Give 30 minutes to an activity you enjoy for its own sake.",
    ),
    a(
        "repair_connection",
        C::Relationships,
        P::High,
        "Repair a Connection",
        "Clear up one small misunderstanding or unspoken tension.",
    ),
    a(
        "plan_meetup",
        C::Relationships,
        P::Medium,
        "Plan a Meetup",
        "Put a date in the calendar to see a friend in person.",
    ),
    a(
        "purpose_reflection",
        C::Meaning,
        P::High,
        "Purpose Reflection",
        "Write down how today's work connects to something you care about.",
    ),
    a(
        "help_someone",
        C::Meaning,
        P::Medium,
        "Help Someone",
        "Do one small, unasked-for kindness for another person.",
    ),
    a(
        "done_list",
        C::Accomplishment,
        P::High,
        "Done List",
        "At the end of the day, list everything you completed.",
    ),
    a(
        "break_down_goal",
        C::Accomplishment,
        P::Medium,
        "Break Down a Goal",
        "Split one stuck goal into three concrete next steps.",
    ),
    a(
        "balanced_plate",
        C::Nutrition,
        P::Medium,
        "Balanced Plate",
        "Add a portion of vegetables or fruit to one meal today.",
    ),
    a(
        "regular_meals",
        C::Nutrition,
        P::Low,
        "Regular Meals",
        "Eat breakfast, lunch and dinner at roughly fixed times.",
    ),
    a(
        "short_walk",
        C::Movement,
        P::High,
        "Short Walk",
        "Take a brisk 10-minute walk, ideally after a meal.",
    ),
    a(
        "stretch_break",
        C::Movement,
        P::Medium,
        "Stretch Break",
        "Stand up and stretch for two minutes every hour of desk work.",
    ),
    a(
        "breathing",
        C::Mindfulness,
        P::High,
        "Box Breathing",
        "Breathe in for 4, hold for 4, out for 4, hold for 4. Repeat five times.",
    ),
    a(
        "body_scan",
        C::Mindfulness,
        P::Medium,
        "Body Scan",
        "Spend five minutes noticing sensations from head to toe.",
    ),
    a(
        "screen_curfew",
        C::DigitalBalance,
        P::High,
        "Screen Curfew",
        "Put your phone away one hour before sleep.",
    ),
    a(
        "notification_cleanup",
        C::DigitalBalance,
        P::Medium,
        "Notification Cleanup",
        "Turn off notifications for three apps you do not need to hear from.",
    ),
    a(
        "outdoor_break",
        C::Nature,
        P::Medium,
        "Outdoor Break",
        "Spend 15 minutes outside in daylight.",
    ),
    a(
        "green_view",
        C::Nature,
        P::Low,
        "Green View",
        "Look at trees, plants or the sky for a few minutes without your phone.",
    ),
];

/// Catalog actions for a category, in catalog order.
pub fn actions_for(category: Category) -> impl Iterator<Item = &'static MicroActionDef> {
    MICRO_ACTIONS.iter().filter(move |a| a.category == category)
}

/// Action with the given priority, or the category's first action if none
/// carries it.
pub fn preferred_action(category: Category, priority: Priority) -> Option<&'static MicroActionDef> {
    actions_for(category)
        .find(|a| a.priority == priority)
        .or_else(|| actions_for(category).next())
}
