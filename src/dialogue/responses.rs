//! Canned response bank
//!
//! Every pool is non-empty. Choosing between entries of the same pool is
//! purely for variety.

use super::{MoodHint, ResponseRng};
use serde::Serialize;

/// Named template pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Greeting,
    Happy,
    SadValidation,
    StressedValidation,
    Encouragement,
    BreathingSuggestion,
    BreathingAccepted,
    BreathingDeclined,
    Closing,
    Reflection,
    OpeningSad,
    OpeningStressed,
}

/// Fixed reply to acute distress; never varied.
pub const GROUNDING_MESSAGE: &str = "I can hear how much you're carrying right now, and I'm really glad you told me. \
You don't have to figure everything out this second. Let's slow things down together: \
notice your feet on the floor, and let your shoulders drop a little.\n\n\
Would you like to do a short breathing exercise with me right now? 🌿";

/// Opening turn when the chat starts without a mood hint.
pub const OPENING_NEUTRAL: &str = "Hello! I'm here to support you on your wellness journey. \
This is a safe space to share how you're feeling. How are you doing today? 💙";

const GREETING: &[&str] = &[
    "Hello! I'm here to support you. How are you feeling today? 💙",
    "Welcome back! I'm glad you're here. What's on your mind?",
    "Hi there! This is a safe space to share. How can I help you today?",
];

const HAPPY: &[&str] = &[
    "That's wonderful to hear! 🌟 What's bringing you joy today?",
    "I'm so glad you're feeling positive! Would you like to share what's making you happy?",
    "That's beautiful! Celebrating the good moments is so important. Tell me more!",
];

const SAD_VALIDATION: &[&str] = &[
    "I'm sorry you're feeling this way. It's okay to feel sad sometimes. Would you like to talk about it? 💙",
    "Thank you for sharing that with me. Your feelings are valid. What's weighing on your heart?",
    "I hear you, and I'm here for you. Sometimes just expressing our feelings helps. What's been happening?",
];

const STRESSED_VALIDATION: &[&str] = &[
    "Stress can feel like a lot to hold. You're not alone in this. What's been on your plate lately?",
    "I understand that feeling. Taking a moment to pause can help. What's been causing you stress?",
    "It's okay to feel this way. Let's take this one step at a time. What feels heaviest right now?",
];

const ENCOURAGEMENT: &[&str] = &[
    "You're doing great by taking time for yourself. That takes courage. 💪",
    "Remember, it's okay to not be okay. What matters is that you're here, working through it.",
    "Every step you take matters. I believe in you. 🌸",
];

const BREATHING_SUGGESTION: &[&str] = &[
    "Would you like to try a calming breathing exercise? It can help settle your mind. 🌿",
    "Sometimes a few slow breaths can make things feel a little lighter. Would you like to try one together?",
    "If it feels right, we could take a short breathing break. Would you like that?",
];

const BREATHING_ACCEPTED: &[&str] = &[
    "Let's do it together. Breathe in slowly through your nose for 4 seconds... and out through your mouth for 6. \
The Calm Mode has a guided circle you can follow too. 🌊",
    "Great idea! Taking a few mindful breaths can make a real difference. \
Try breathing in for 4, holding for 4, out for 4, and holding for 4. How do you feel afterwards?",
    "Breathing exercises are wonderful for finding peace. Take three slow breaths with me, \
and let each exhale be a little longer than the inhale.",
];

const BREATHING_DECLINED: &[&str] = &[
    "That's completely okay. We can just keep talking. What else is on your mind?",
    "No problem at all. The breathing exercise is always here if you change your mind. Tell me more about how you're feeling.",
    "Of course. There's no right way to do this. I'm still here to listen.",
];

const CLOSING: &[&str] = &[
    "I'm really glad we talked. Remember, you can come back anytime you need. Take care of yourself. 💙",
    "Thank you for spending this time with me. Be gentle with yourself today. 🌸",
    "It means a lot that you shared with me. I'm here whenever you want to talk again. 🌟",
];

const REFLECTION: &[&str] = &[
    "Thank you for sharing that with me. How does talking about it make you feel?",
    "I appreciate you opening up. What else is on your mind?",
    "That's really insightful. Would you like to explore those feelings more?",
    "I'm here to listen. What would help you feel better right now?",
];

const OPENING_SAD: &[&str] = &[
    "I noticed you're feeling sad today. I'm really glad you reached out. Would you like to tell me what's going on? 💙",
    "I'm sorry today feels heavy. This is a safe space, and there's no rush. What's been on your heart?",
];

const OPENING_STRESSED: &[&str] = &[
    "I see you're feeling stressed. Let's take a moment together. What's been weighing on you? 🌿",
    "Stress can make everything feel louder. I'm here with you. Do you want to talk about what's causing it?",
];

const QUICK_REPLIES_SAD: &[&str] = &[
    "I want to talk about it",
    "I'm feeling lonely",
    "I don't know why I'm sad",
    "Help me feel better",
];

const QUICK_REPLIES_STRESSED: &[&str] = &[
    "Work is overwhelming",
    "I can't stop worrying",
    "Everything feels too much",
    "Help me calm down",
];

const QUICK_REPLIES_NEUTRAL: &[&str] = &["I'm feeling stressed", "I need to talk", "Help me relax"];

impl Pool {
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Pool::Greeting => GREETING,
            Pool::Happy => HAPPY,
            Pool::SadValidation => SAD_VALIDATION,
            Pool::StressedValidation => STRESSED_VALIDATION,
            Pool::Encouragement => ENCOURAGEMENT,
            Pool::BreathingSuggestion => BREATHING_SUGGESTION,
            Pool::BreathingAccepted => BREATHING_ACCEPTED,
            Pool::BreathingDeclined => BREATHING_DECLINED,
            Pool::Closing => CLOSING,
            Pool::Reflection => REFLECTION,
            Pool::OpeningSad => OPENING_SAD,
            Pool::OpeningStressed => OPENING_STRESSED,
        }
    }

    /// Pick one template uniformly
    pub fn choose(self, rng: &mut impl ResponseRng) -> &'static str {
        let templates = self.templates();
        templates[rng.pick(templates.len())]
    }
}

/// The assistant's first turn for a given entry context
pub fn opening(hint: Option<MoodHint>, rng: &mut impl ResponseRng) -> &'static str {
    match hint {
        Some(MoodHint::Sad) => Pool::OpeningSad.choose(rng),
        Some(MoodHint::Stressed) => Pool::OpeningStressed.choose(rng),
        None => OPENING_NEUTRAL,
    }
}

/// Suggested one-tap replies for the early part of a conversation
pub fn quick_replies(hint: Option<MoodHint>) -> &'static [&'static str] {
    match hint {
        Some(MoodHint::Sad) => QUICK_REPLIES_SAD,
        Some(MoodHint::Stressed) => QUICK_REPLIES_STRESSED,
        None => QUICK_REPLIES_NEUTRAL,
    }
}
