//! Gesture classification for the top card.
//!
//! A drag starts on pointer-down over the top card, follows the pointer,
//! and is classified on release. Only the final offset matters:
//!
//! | release offset      | outcome    |
//! |---------------------|------------|
//! | `dx > T`            | Like       |
//! | `dx < -T`           | Skip       |
//! | `dy < -T`           | SuperLike  |
//! | anything else       | Reset      |
//!
//! Rows are checked top to bottom, so a diagonal release that clears the
//! threshold on both axes is decided by its horizontal component.

use roster::CastId;
use serde::Serialize;

use crate::config::SwipeConfig;

/// Pointer position in screen units. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset of `self` from `origin`
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Where a card leaves the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
}

impl Direction {
    /// CSS transform the card animates to on its way out
    pub fn exit_transform(&self) -> &'static str {
        match self {
            Direction::Left => "translateX(-150%) rotate(-30deg)",
            Direction::Right => "translateX(150%) rotate(30deg)",
            Direction::Up => "translateY(-150%) rotate(10deg) scale(0.8)",
        }
    }

    /// Hint stamped on the card while it leaves
    pub fn hint(&self) -> Hint {
        match self {
            Direction::Left => Hint::Nope,
            Direction::Right => Hint::Like,
            Direction::Up => Hint::Super,
        }
    }
}

/// Result of a finished gesture or button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Skip,
    Like,
    SuperLike,
    /// Not far enough: the card springs back and nothing advances
    Reset,
}

impl Outcome {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Outcome::Skip => Some(Direction::Left),
            Outcome::Like => Some(Direction::Right),
            Outcome::SuperLike => Some(Direction::Up),
            Outcome::Reset => None,
        }
    }
}

impl From<Direction> for Outcome {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Outcome::Skip,
            Direction::Right => Outcome::Like,
            Direction::Up => Outcome::SuperLike,
        }
    }
}

/// Classify a release offset.
///
/// Comparisons are strict: a release exactly at the threshold resets.
pub fn classify(dx: f64, dy: f64, threshold: f64) -> Outcome {
    if dx > threshold {
        Outcome::Like
    } else if dx < -threshold {
        Outcome::Skip
    } else if dy < -threshold {
        Outcome::SuperLike
    } else {
        Outcome::Reset
    }
}

/// Stamp shown on the card while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Hint {
    Nope,
    Like,
    Super,
}

impl Hint {
    pub fn label(&self) -> &'static str {
        match self {
            Hint::Nope => "NOPE",
            Hint::Like => "LIKE",
            Hint::Super => "SUPER LIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HintFeedback {
    pub hint: Hint,
    /// 0.0 (hidden) to 1.0
    pub opacity: f64,
}

/// Pick the single hint to show for the current offset.
///
/// Same precedence as [`classify`], but against the lower show
/// threshold. Opacity grows with distance and saturates at `full_at`.
pub fn hint_for(dx: f64, dy: f64, show_threshold: f64, full_at: f64) -> Option<HintFeedback> {
    let (hint, distance) = if dx > show_threshold {
        (Hint::Like, dx)
    } else if dx < -show_threshold {
        (Hint::Nope, -dx)
    } else if dy < -show_threshold {
        (Hint::Super, -dy)
    } else {
        return None;
    };

    Some(HintFeedback {
        hint,
        opacity: (distance / full_at).min(1.0),
    })
}

/// Where the card sits while following the pointer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CardTransform {
    pub dx: f64,
    pub dy: f64,
    pub rotation_deg: f64,
}

impl CardTransform {
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.dx, self.dy, self.rotation_deg
        )
    }
}

/// Everything the view needs to redraw the top card on a move tick.
///
/// Hints not named here are cleared on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragFeedback {
    pub transform: CardTransform,
    pub hint: Option<HintFeedback>,
}

/// One active drag on the top card.
///
/// Exists only between pointer-down and pointer-up; releasing consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    card: CastId,
    origin: Point,
    current: Point,
}

impl DragSession {
    pub fn begin(card: CastId, origin: Point) -> Self {
        Self {
            card,
            origin,
            current: origin,
        }
    }

    pub fn card(&self) -> CastId {
        self.card
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn delta(&self) -> (f64, f64) {
        self.current.delta_from(self.origin)
    }

    /// Follow the pointer and report the visual feedback for this tick
    pub fn move_to(&mut self, point: Point, config: &SwipeConfig) -> DragFeedback {
        self.current = point;
        let (dx, dy) = self.delta();
        DragFeedback {
            transform: CardTransform {
                dx,
                dy,
                rotation_deg: dx * config.rotation_factor,
            },
            hint: hint_for(dx, dy, config.hint_threshold, config.hint_full_opacity),
        }
    }

    /// End the drag and classify where it ended
    pub fn release(self, threshold: f64) -> Outcome {
        let (dx, dy) = self.delta();
        classify(dx, dy, threshold)
    }
}
