//! Render model for the deck.
//!
//! `render` is a pure function of the stack: the same state always gives
//! the same view, and the host redraws from it after every transition.

use roster::{Candidate, CastId};
use serde::Serialize;

use crate::quota::format_countdown;
use crate::stack::CardStack;

/// Interest tags shown per card
const CARD_TAGS: usize = 3;

/// Header badges: swipes left and time until refill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badges {
    pub remaining: u32,
    pub countdown: String,
}

/// One card in the rendered stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: CastId,
    pub name: String,
    pub age: Option<u8>,
    pub image: String,
    pub verified: bool,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub occupation: Option<String>,
    pub personality: Option<String>,
    pub zodiac_sign: Option<String>,
    pub introduction: Option<String>,
    /// Higher is closer to the viewer; the top card has the highest
    pub z_index: usize,
    pub scale: f64,
    pub offset_y: f64,
}

impl CardView {
    fn from_candidate(candidate: &Candidate, stack_index: usize, depth: usize) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            age: candidate.age,
            image: candidate.image.clone(),
            verified: candidate.verified,
            location: candidate.location().map(str::to_string),
            tags: candidate.tags(CARD_TAGS).to_vec(),
            occupation: candidate.occupation.clone(),
            personality: candidate.personality.clone(),
            zodiac_sign: candidate.zodiac_sign.clone(),
            introduction: candidate.introduction.clone(),
            z_index: depth - stack_index,
            scale: 1.0 - stack_index as f64 * 0.03,
            offset_y: stack_index as f64 * 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DeckView {
    /// Cards to swipe, top card first
    Stack { badges: Badges, cards: Vec<CardView> },
    /// Daily quota used up; upgrade pitch instead of cards
    Upsell {
        badges: Badges,
        title: String,
        message: String,
    },
    /// No cards left
    Exhausted {
        badges: Badges,
        title: String,
        message: String,
        action_label: String,
    },
}

impl DeckView {
    pub fn badges(&self) -> &Badges {
        match self {
            DeckView::Stack { badges, .. }
            | DeckView::Upsell { badges, .. }
            | DeckView::Exhausted { badges, .. } => badges,
        }
    }

    /// Ids of the cards on screen, top first
    pub fn card_ids(&self) -> Vec<CastId> {
        match self {
            DeckView::Stack { cards, .. } => cards.iter().map(|c| c.id).collect(),
            _ => Vec::new(),
        }
    }
}

/// Build the view for the current state.
///
/// An exhausted queue wins over a depleted quota: there is nothing left
/// to upsell.
pub fn render(stack: &CardStack) -> DeckView {
    let quota = stack.quota();
    let badges = Badges {
        remaining: quota.remaining(),
        countdown: format_countdown(quota.countdown_secs()),
    };

    if stack.is_exhausted() {
        return DeckView::Exhausted {
            badges,
            title: "That's all the new casts for today".to_string(),
            message: "New casts are added tomorrow".to_string(),
            action_label: "Find other casts".to_string(),
        };
    }

    if quota.is_depleted() {
        return DeckView::Upsell {
            badges,
            title: "Today's free likes are used up".to_string(),
            message: format!(
                "You get {} more tomorrow. Go premium to keep swiping now.",
                quota.limit()
            ),
        };
    }

    let depth = stack.config().stack_depth;
    let cards = stack
        .queue()
        .visible(depth)
        .iter()
        .enumerate()
        .map(|(i, candidate)| CardView::from_candidate(candidate, i, depth))
        .collect();

    DeckView::Stack { badges, cards }
}
