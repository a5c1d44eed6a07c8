//! Layout choice for a project's gallery and the marquee rows of the showcase layout.

use crate::catalog::ProjectCategory;
use crate::config::SHOWCASE_REPEAT;
use crate::image_ref::ImageRef;

/// How a project's images are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryLayout {
    /// One image at a time with prev/next navigation.
    #[default]
    Carousel,
    /// Two endlessly scrolling rows, no navigation.
    Showcase,
}

impl GalleryLayout {
    /// Showcase for visual-only categories with more than `threshold` images.
    pub fn for_project(category: ProjectCategory, image_count: usize, threshold: usize) -> Self {
        if category.is_visual_only() && image_count > threshold {
            GalleryLayout::Showcase
        } else {
            GalleryLayout::Carousel
        }
    }

    pub fn is_carousel(self) -> bool {
        self == GalleryLayout::Carousel
    }
}

/// Horizontal scroll direction of a marquee row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// One endlessly scrolling row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeRow {
    pub direction: ScrollDirection,
    /// Row images repeated end-to-end.
    pub track: Vec<ImageRef>,
}

impl MarqueeRow {
    fn new(images: &[ImageRef], direction: ScrollDirection) -> Self {
        let track = std::iter::repeat_n(images, SHOWCASE_REPEAT)
            .flatten()
            .cloned()
            .collect();
        Self { direction, track }
    }

    /// Number of distinct images before the track repeats.
    pub fn period(&self) -> usize {
        self.track.len() / SHOWCASE_REPEAT
    }
}

/// The two rows of the showcase layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseLayout {
    pub rows: Vec<MarqueeRow>,
}

impl ShowcaseLayout {
    /// Splits the images at the rounded-up half.
    ///
    /// The first half scrolls left; the second half, reversed, scrolls right.
    /// An empty second half produces a single row.
    pub fn build(images: &[ImageRef]) -> Self {
        let half = images.len().div_ceil(2);
        let (first, second) = images.split_at(half);

        let mut rows = Vec::with_capacity(2);
        if !first.is_empty() {
            rows.push(MarqueeRow::new(first, ScrollDirection::Left));
        }
        if !second.is_empty() {
            let reversed: Vec<ImageRef> = second.iter().rev().cloned().collect();
            rows.push(MarqueeRow::new(&reversed, ScrollDirection::Right));
        }
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(count: usize) -> Vec<ImageRef> {
        (1..=count)
            .map(|i| ImageRef::new(format!("/portfolio/graphics/{i}.webp")))
            .collect()
    }

    #[test]
    fn only_large_design_galleries_use_showcase() {
        assert_eq!(
            GalleryLayout::for_project(ProjectCategory::Design, 17, 3),
            GalleryLayout::Showcase
        );
        assert_eq!(
            GalleryLayout::for_project(ProjectCategory::Design, 3, 3),
            GalleryLayout::Carousel
        );
        assert_eq!(
            GalleryLayout::for_project(ProjectCategory::Web, 17, 3),
            GalleryLayout::Carousel
        );
    }

    #[test]
    fn odd_count_puts_extra_image_in_first_row() {
        let layout = ShowcaseLayout::build(&images(5));
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0].period(), 3);
        assert_eq!(layout.rows[1].period(), 2);
        assert_eq!(layout.rows[0].direction, ScrollDirection::Left);
        assert_eq!(layout.rows[1].direction, ScrollDirection::Right);
    }

    #[test]
    fn tracks_are_tripled_and_second_row_reversed() {
        let all = images(4);
        let layout = ShowcaseLayout::build(&all);

        let first = &layout.rows[0].track;
        assert_eq!(first.len(), 6);
        assert_eq!(&first[..2], &all[..2]);
        assert_eq!(&first[2..4], &all[..2]);

        let second = &layout.rows[1].track;
        assert_eq!(second[0], all[3]);
        assert_eq!(second[1], all[2]);
        assert_eq!(second[2], all[3]);
    }

    #[test]
    fn single_image_yields_one_row() {
        let layout = ShowcaseLayout::build(&images(1));
        assert_eq!(layout.rows.len(), 1);
        assert_eq!(layout.rows[0].track.len(), SHOWCASE_REPEAT);
    }
}
