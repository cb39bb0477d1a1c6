//! Font size statistics for heading detection.

use std::collections::HashMap;

use crate::model::{SizeLevel, TextSpan};

use super::OutlineConfig;

/// Per-document font size profile.
///
/// Computed once per document and passed by reference; it holds no state
/// shared between documents. Sizes are keyed by their exact bit pattern, so
/// `11.5` and `11.499` are distinct sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSizeProfile {
    /// Body text font size (most common, first seen wins ties)
    pub body_size: f32,
    /// Distinct sizes, largest first
    pub size_rank: Vec<f32>,
    /// Sizes that received a heading level, largest first
    pub heading_sizes: Vec<f32>,
    /// Observed sizes with frequency, in first-seen order
    histogram: Vec<(f32, usize)>,
    levels: HashMap<u32, SizeLevel>,
}

impl FontSizeProfile {
    /// Build a profile from the non-blank spans of a document.
    ///
    /// Returns `None` when there is no text to profile.
    pub fn from_spans(spans: &[TextSpan], config: &OutlineConfig) -> Option<Self> {
        Self::from_sizes(
            spans
                .iter()
                .filter(|s| !s.is_blank())
                .map(|s| s.font_size),
            config,
        )
    }

    /// Build a profile from raw font size observations.
    pub fn from_sizes<I>(sizes: I, config: &OutlineConfig) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut histogram: Vec<(f32, usize)> = Vec::new();
        let mut index: HashMap<u32, usize> = HashMap::new();

        for size in sizes {
            let slot = *index.entry(size.to_bits()).or_insert_with(|| {
                histogram.push((size, 0));
                histogram.len() - 1
            });
            histogram[slot].1 += 1;
        }

        // Strictly-greater keeps the first-seen size on ties
        let mut body = *histogram.first()?;
        for &(size, count) in &histogram[1..] {
            if count > body.1 {
                body = (size, count);
            }
        }
        let body_size = body.0;

        let mut size_rank: Vec<f32> = histogram.iter().map(|(s, _)| *s).collect();
        size_rank.sort_by(|a, b| b.total_cmp(a));

        let threshold = f64::from(body_size) * config.heading_size_ratio;
        let mut heading_sizes: Vec<f32> = size_rank
            .iter()
            .copied()
            .filter(|s| f64::from(*s) >= threshold)
            .collect();
        if heading_sizes.is_empty() {
            heading_sizes.push(size_rank[0]);
        }
        heading_sizes.truncate(config.max_heading_sizes.clamp(1, 4));

        let mut levels: HashMap<u32, SizeLevel> = size_rank
            .iter()
            .map(|s| (s.to_bits(), SizeLevel::Body))
            .collect();
        for (rank, size) in heading_sizes.iter().enumerate() {
            levels.insert(size.to_bits(), SizeLevel::from_rank(rank));
        }

        log::debug!(
            "font profile: body={} headings={:?} distinct={}",
            body_size,
            heading_sizes,
            size_rank.len()
        );

        Some(Self {
            body_size,
            size_rank,
            heading_sizes,
            histogram,
            levels,
        })
    }

    /// Level assigned to a font size. Unobserved sizes are body text.
    pub fn level_of(&self, font_size: f32) -> SizeLevel {
        self.levels
            .get(&font_size.to_bits())
            .copied()
            .unwrap_or(SizeLevel::Body)
    }

    /// The size that maps to the Title level.
    pub fn title_size(&self) -> Option<f32> {
        self.heading_sizes.first().copied()
    }

    /// Number of spans observed at a font size.
    pub fn frequency(&self, font_size: f32) -> usize {
        self.histogram
            .iter()
            .find(|(s, _)| s.to_bits() == font_size.to_bits())
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Total number of size observations.
    pub fn total_spans(&self) -> usize {
        self.histogram.iter().map(|(_, count)| count).sum()
    }
}
