//! Glyph Line Grouper: buckets a page's glyphs into lines by vertical position.

use std::collections::BTreeMap;

use crate::extraction::models::{Glyph, Line};

/// Default vertical tolerance, in PDF user-space units.
pub const DEFAULT_LINE_TOLERANCE: f64 = 5.0;

/// Lines of one page keyed by their bucket index (`round(y / tolerance)`).
#[derive(Debug, Clone, Default)]
pub struct LineGroups {
    buckets: BTreeMap<i64, Line>,
}

impl LineGroups {
    /// Lines ordered top-to-bottom (descending y).
    pub fn top_to_bottom(&self) -> impl Iterator<Item = &Line> {
        self.buckets.values().rev()
    }

    pub fn line_count(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[cfg(test)]
    pub fn glyph_count(&self) -> usize {
        self.buckets.values().map(|l| l.glyphs.len()).sum()
    }

    #[cfg(test)]
    pub fn into_lines(self) -> Vec<Line> {
        self.buckets.into_values().rev().collect()
    }
}

/// Groups glyphs into lines.
///
/// Glyphs are visited in descending y, bucketed by rounding `y / tolerance` to the
/// nearest integer (halves round up), and each bucket is then sorted by ascending x.
/// The sort is stable, so glyphs with equal x keep their top-to-bottom order.
pub fn group_into_lines(glyphs: &[Glyph], tolerance: f64) -> LineGroups {
    let tolerance = if tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_LINE_TOLERANCE
    };

    let mut sorted: Vec<&Glyph> = glyphs.iter().collect();
    sorted.sort_by(|a, b| b.y().total_cmp(&a.y()));

    let mut buckets: BTreeMap<i64, Line> = BTreeMap::new();
    for glyph in sorted {
        let key = bucket_of(glyph.y(), tolerance);
        buckets
            .entry(key)
            .or_insert_with(|| Line {
                y: key as f64 * tolerance,
                glyphs: Vec::new(),
            })
            .glyphs
            .push(glyph.clone());
    }

    for line in buckets.values_mut() {
        line.glyphs.sort_by(|a, b| a.x().total_cmp(&b.x()));
    }

    LineGroups { buckets }
}

fn bucket_of(y: f64, tolerance: f64) -> i64 {
    (y / tolerance + 0.5).floor() as i64
}
