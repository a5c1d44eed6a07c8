//! Slide transitions between carousel images.
//!
//! The gallery state changes instantly; only this layer interpolates. During
//! a slide the outgoing and incoming images are both visible. Forward moves
//! bring the new image in from the right and push the old one out to the
//! left; backward moves mirror that. The first image of a gallery appears
//! without a slide.
//!
//! Offsets are fractions of the viewport width: `1.0` is one full width to
//! the right, `-1.0` one to the left, `0.0` centred.

use crate::services::CarouselUpdate;
use crate::state::Direction;
use std::time::{Duration, Instant};

/// Screen side an image enters from or leaves towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Side the incoming image starts on, `None` when nothing should slide.
    pub fn entry_for(direction: Direction) -> Option<Side> {
        match direction {
            Direction::None => None,
            Direction::Forward => Some(Side::Right),
            Direction::Backward => Some(Side::Left),
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Positions and opacities for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub incoming: usize,
    pub incoming_offset: f32,
    pub incoming_opacity: f32,
    /// Image being pushed out, if a slide is running.
    pub outgoing: Option<usize>,
    pub outgoing_offset: f32,
    pub outgoing_opacity: f32,
}

impl SlideFrame {
    fn settled(index: usize) -> Self {
        Self {
            incoming: index,
            incoming_offset: 0.0,
            incoming_opacity: 1.0,
            outgoing: None,
            outgoing_offset: 0.0,
            outgoing_opacity: 0.0,
        }
    }
}

/// A single slide from one image to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransition {
    pub from: usize,
    pub to: usize,
    pub entry: Side,
    pub duration: Duration,
}

impl SlideTransition {
    /// Builds a slide, or `None` for [`Direction::None`].
    pub fn begin(from: usize, to: usize, direction: Direction, duration: Duration) -> Option<Self> {
        Side::entry_for(direction).map(|entry| Self {
            from,
            to,
            entry,
            duration,
        })
    }

    /// Normalised progress in `0.0..=1.0`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    pub fn frame(&self, elapsed: Duration) -> SlideFrame {
        let t = ease_out_cubic(self.progress(elapsed));
        let exit = self.entry.opposite();
        SlideFrame {
            incoming: self.to,
            incoming_offset: self.entry.sign() * (1.0 - t),
            incoming_opacity: t,
            outgoing: Some(self.from),
            outgoing_offset: exit.sign() * t,
            outgoing_opacity: 1.0 - t,
        }
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Drives at most one slide at a time.
///
/// A new update during a running slide replaces it at once: the latest
/// target becomes the outgoing image and nothing is queued.
#[derive(Debug, Clone)]
pub struct TransitionController {
    duration: Duration,
    displayed: Option<usize>,
    generation: Option<u64>,
    active: Option<(SlideTransition, Instant)>,
}

impl TransitionController {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            displayed: None,
            generation: None,
            active: None,
        }
    }

    /// Feeds a carousel update into the view.
    pub fn apply(&mut self, update: &CarouselUpdate, now: Instant) {
        let same_gallery = self.generation == Some(update.generation);
        let from = self.displayed.filter(|_| same_gallery);

        self.active = from
            .filter(|from| *from != update.index)
            .and_then(|from| {
                SlideTransition::begin(from, update.index, update.direction, self.duration)
            })
            .map(|slide| (slide, now));
        self.displayed = Some(update.index);
        self.generation = Some(update.generation);
    }

    /// Frame to draw at `now`; `None` before the first update.
    pub fn frame(&mut self, now: Instant) -> Option<SlideFrame> {
        if let Some((slide, started)) = self.active {
            let elapsed = now.saturating_duration_since(started);
            if !slide.is_finished(elapsed) {
                return Some(slide.frame(elapsed));
            }
            self.active = None;
        }
        self.displayed.map(SlideFrame::settled)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    fn update(index: usize, direction: Direction, generation: u64) -> CarouselUpdate {
        CarouselUpdate {
            index,
            direction,
            image: crate::image_ref::ImageRef::new(format!("{index}.webp")),
            generation,
        }
    }

    #[test]
    fn forward_enters_right_and_exits_left() {
        let slide = SlideTransition::begin(0, 1, Direction::Forward, DURATION).expect("slide");
        let start = slide.frame(Duration::ZERO);
        assert_eq!(start.incoming_offset, 1.0);
        assert_eq!(start.outgoing_offset, 0.0);

        let end = slide.frame(DURATION);
        assert_eq!(end.incoming_offset, 0.0);
        assert_eq!(end.outgoing_offset, -1.0);
    }

    #[test]
    fn backward_is_mirrored() {
        let slide = SlideTransition::begin(1, 0, Direction::Backward, DURATION).expect("slide");
        assert_eq!(slide.frame(Duration::ZERO).incoming_offset, -1.0);
        assert_eq!(slide.frame(DURATION).outgoing_offset, 1.0);
    }

    #[test]
    fn no_direction_means_no_slide() {
        assert!(SlideTransition::begin(0, 0, Direction::None, DURATION).is_none());

        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(0, Direction::None, 0), now);
        assert!(!controller.is_animating());
        assert_eq!(controller.frame(now), Some(SlideFrame::settled(0)));
    }

    #[test]
    fn both_images_visible_mid_slide() {
        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(0, Direction::None, 0), now);
        controller.apply(&update(1, Direction::Forward, 0), now);

        let frame = controller
            .frame(now + DURATION / 2)
            .expect("frame available");
        assert_eq!(frame.incoming, 1);
        assert_eq!(frame.outgoing, Some(0));
        assert!(frame.incoming_offset > 0.0 && frame.incoming_offset < 1.0);
        assert!(frame.outgoing_offset < 0.0 && frame.outgoing_offset > -1.0);
    }

    #[test]
    fn interrupting_starts_from_latest_target() {
        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(0, Direction::None, 0), now);
        controller.apply(&update(1, Direction::Forward, 0), now);
        controller.apply(&update(2, Direction::Forward, 0), now + DURATION / 3);

        let frame = controller
            .frame(now + DURATION / 3)
            .expect("frame available");
        assert_eq!(frame.incoming, 2);
        assert_eq!(frame.outgoing, Some(1));
        assert_eq!(frame.incoming_offset, 1.0);
    }

    #[test]
    fn finished_slide_settles() {
        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(0, Direction::None, 0), now);
        controller.apply(&update(2, Direction::Backward, 0), now);

        assert_eq!(controller.frame(now + DURATION), Some(SlideFrame::settled(2)));
        assert!(!controller.is_animating());
    }

    #[test]
    fn unchanged_index_does_not_slide() {
        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(0, Direction::None, 0), now);
        controller.apply(&update(0, Direction::Forward, 0), now);

        assert!(!controller.is_animating());
        assert_eq!(controller.frame(now), Some(SlideFrame::settled(0)));
    }

    #[test]
    fn new_gallery_appears_without_slide() {
        let mut controller = TransitionController::new(DURATION);
        let now = Instant::now();
        controller.apply(&update(3, Direction::Forward, 0), now);
        controller.apply(&update(0, Direction::None, 1), now);
        assert!(!controller.is_animating());
    }
}
