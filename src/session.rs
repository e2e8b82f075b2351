//! Conversation session
//!
//! Owns the transcript and dialogue position for one chat. Submission is
//! split into `begin` (user turn, composing on) and `finish` (classify,
//! transition, assistant turn, composing off) so the async runtime can
//! suspend in between; `submit` runs both around a [`ThinkingDelay`].

use crate::dialogue::responses::{opening, quick_replies};
use crate::dialogue::{
    classify, transition, Category, Effect, Milestone, MoodHint, ResponseRng, Stage,
};
use crate::runtime::ThinkingDelay;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Quick replies are offered while the transcript is shorter than this
const QUICK_REPLY_WINDOW: usize = 3;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp,
        }
    }
}

/// Proof that `begin` accepted an utterance; consumed by `finish`
#[derive(Debug)]
#[must_use = "a pending reply must be finished or the session stays composing"]
pub struct PendingReply {
    text: String,
}

/// Outcome of a completed submission
#[derive(Debug, Clone)]
pub struct Reply {
    pub category: Category,
    pub previous_stage: Stage,
    pub next_stage: Stage,
    pub turn: Turn,
    pub effects: Vec<Effect>,
}

/// Serializable view of a session for the UI
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub mood_hint: Option<MoodHint>,
    pub transcript: Vec<Turn>,
    pub stage: Stage,
    pub milestone: Milestone,
    pub turn_count: u32,
    pub composing: bool,
    pub quick_replies: Vec<String>,
}

/// Single-owner conversation state
pub struct Session {
    id: String,
    mood_hint: Option<MoodHint>,
    transcript: Vec<Turn>,
    stage: Stage,
    turn_count: u32,
    composing: bool,
    rng: Box<dyn ResponseRng>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .field("turn_count", &self.turn_count)
            .field("composing", &self.composing)
            .field("turns", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session; the transcript opens with exactly one assistant turn.
    pub fn new(mood_hint: Option<MoodHint>, rng: impl ResponseRng + 'static) -> Self {
        let mut rng: Box<dyn ResponseRng> = Box::new(rng);
        let greeting = opening(mood_hint, &mut rng);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mood_hint,
            transcript: vec![Turn::new(Role::Assistant, greeting, Utc::now())],
            stage: Stage::Initial,
            turn_count: 0,
            composing: false,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Accept a user utterance. Blank input is ignored and returns `None`.
    pub fn begin(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript
            .push(Turn::new(Role::User, text, self.next_timestamp()));
        self.composing = true;
        self.turn_count += 1;

        Some(PendingReply {
            text: text.to_string(),
        })
    }

    /// Produce and record the assistant's answer to a pending utterance
    pub fn finish(&mut self, pending: PendingReply) -> Reply {
        let category = classify(&pending.text);
        let previous_stage = self.stage;
        let result = transition(self.stage, category, self.turn_count, &mut self.rng);

        let turn = Turn::new(Role::Assistant, result.reply, self.next_timestamp());
        self.transcript.push(turn.clone());
        self.stage = result.next_stage;
        self.composing = false;

        Reply {
            category,
            previous_stage,
            next_stage: self.stage,
            turn,
            effects: result.effects,
        }
    }

    /// Full submission with a thinking pause between the two halves.
    ///
    /// Holding `&mut self` across the pause keeps other mutations out.
    #[allow(dead_code)] // Used in tests; the runtime drives begin/finish itself
    pub async fn submit<D>(&mut self, text: &str, delay: &D) -> Option<Reply>
    where
        D: ThinkingDelay + ?Sized,
    {
        let pending = self.begin(text)?;
        delay.pause().await;
        Some(self.finish(pending))
    }

    pub fn quick_replies(&self) -> Vec<String> {
        if self.transcript.len() < QUICK_REPLY_WINDOW {
            quick_replies(self.mood_hint)
                .iter()
                .map(|r| (*r).to_string())
                .collect()
        } else {
            vec![]
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            mood_hint: self.mood_hint,
            transcript: self.transcript.clone(),
            stage: self.stage,
            milestone: self.stage.milestone(),
            turn_count: self.turn_count,
            composing: self.composing,
            quick_replies: self.quick_replies(),
        }
    }

    /// Wall clock, but never earlier than the last recorded turn
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.transcript
            .last()
            .map_or(now, |last| now.max(last.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::random::ScriptedRng;
    use crate::dialogue::responses::{Pool, OPENING_NEUTRAL};
    use crate::dialogue::FeedbackCue;
    use crate::runtime::testing::InstantDelay;

    fn session() -> Session {
        Session::new(None, ScriptedRng::new())
    }

    #[test]
    fn test_opens_with_single_assistant_turn() {
        let s = session();
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript()[0].role, Role::Assistant);
        assert_eq!(s.transcript()[0].text, OPENING_NEUTRAL);
        assert_eq!(s.stage(), Stage::Initial);
        assert_eq!(s.turn_count(), 0);
        assert!(!s.is_composing());
    }

    #[test]
    fn test_sad_hint_opening() {
        for _ in 0..10 {
            let s = Session::new(Some(MoodHint::Sad), crate::dialogue::StdResponseRng::from_entropy());
            let first = &s.transcript()[0].text;
            assert!(Pool::OpeningSad.templates().contains(&first.as_str()));
            assert_ne!(first, OPENING_NEUTRAL);
            assert_eq!(s.stage(), Stage::Initial);
        }
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut s = session();
        assert!(s.begin("").is_none());
        assert!(s.begin("   \n\t").is_none());
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.turn_count(), 0);
        assert!(!s.is_composing());
    }

    #[test]
    fn test_begin_then_finish_ordering() {
        let mut s = session();
        let pending = s.begin("  I feel happy  ").unwrap();

        assert!(s.is_composing());
        assert_eq!(s.turn_count(), 1);
        let user = s.transcript().last().unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "I feel happy");

        let reply = s.finish(pending);
        assert!(!s.is_composing());
        assert_eq!(reply.category, Category::Happy);
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(s.transcript()[2].role, Role::Assistant);
        assert!(s.transcript()[2].timestamp >= s.transcript()[1].timestamp);
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_assistant() {
        let mut s = session();
        let reply = s.submit("I feel happy", &InstantDelay).await.unwrap();

        let transcript = s.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].text, reply.turn.text);
        assert!(transcript[2].timestamp >= transcript[1].timestamp);
        assert!(!s.is_composing());
    }

    #[tokio::test]
    async fn test_sad_escalates_on_second_turn() {
        let mut s = session();
        s.submit("I feel sad", &InstantDelay).await.unwrap();
        assert_eq!(s.stage(), Stage::Listening);

        let reply = s.submit("still sad", &InstantDelay).await.unwrap();
        assert_eq!(s.stage(), Stage::SuggestedBreathing);
        assert!(reply.turn.text.contains("\n\n"));
        assert_eq!(
            reply.effects,
            vec![Effect::Cue(FeedbackCue::MoodAcknowledged)]
        );

        s.submit("yes please", &InstantDelay).await.unwrap();
        assert_eq!(s.stage(), Stage::PostBreathing);
    }

    #[tokio::test]
    async fn test_closing_is_not_terminal() {
        let mut s = session();
        s.submit("thanks, bye", &InstantDelay).await.unwrap();
        assert_eq!(s.stage(), Stage::Closing);

        // Second turn from closing already meets the breathing offer threshold
        s.submit("I feel sad", &InstantDelay).await.unwrap();
        assert_eq!(s.stage(), Stage::SuggestedBreathing);
        assert_eq!(s.turn_count(), 2);
        assert_eq!(s.transcript().len(), 5);
    }

    #[test]
    fn test_quick_replies_only_early() {
        let mut s = Session::new(Some(MoodHint::Stressed), ScriptedRng::new());
        assert_eq!(s.quick_replies().len(), 4);

        let pending = s.begin("hello").unwrap();
        s.finish(pending);
        assert!(s.quick_replies().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = session();
        let pending = s.begin("I'm so anxious").unwrap();

        let during = s.snapshot();
        assert!(during.composing);
        assert_eq!(during.transcript.len(), 2);

        s.finish(pending);
        let after = s.snapshot();
        assert!(!after.composing);
        assert_eq!(after.stage, Stage::Listening);
        assert_eq!(after.milestone, Milestone::Sharing);
        assert_eq!(after.turn_count, 1);
    }
}
