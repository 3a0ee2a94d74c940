//! Sliding page window.
//!
//! Computes which page indices are shown as discrete handles. The window is
//! aligned to `window_size` blocks and slides forward by a fraction of the
//! window once the current page passes the middle of its block. Everything
//! here works on 0-based indices.

use crate::PaginationState;
use serde::Serialize;
use std::ops::Range;

/// Inputs handed to a [`SlidePolicy`], all normalized to 0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideContext {
    /// Index base of the collection (0 or 1).
    pub first_page: usize,
    pub last_page: usize,
    pub current_page: usize,
    pub window_size: usize,
    pub slide_scale: f64,
}

/// Decides when and how far the window slides.
///
/// Each method can be overridden on its own.
pub trait SlidePolicy {
    /// Returns true when the window should slide forward.
    ///
    /// The default slides once the current page reaches the middle of its
    /// block, i.e. `round((current mod size) / size) == 1`.
    fn slide_maybe(&self, ctx: &SlideContext) -> bool {
        if ctx.window_size == 0 {
            return false;
        }
        2 * (ctx.current_page % ctx.window_size) >= ctx.window_size
    }

    /// Number of pages to advance when sliding.
    fn slide_this_much(&self, ctx: &SlideContext) -> usize {
        (ctx.window_size as f64 * ctx.slide_scale).floor().max(0.0) as usize
    }
}

/// Half-block sliding with a scaled increment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSlidePolicy;

impl SlidePolicy for DefaultSlidePolicy {}

/// Half-open range of 0-based page indices to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Window geometry plus the policy that slides it.
pub struct WindowCalculator<'a> {
    window_size: usize,
    slide_scale: f64,
    policy: &'a dyn SlidePolicy,
}

impl<'a> WindowCalculator<'a> {
    pub fn new(window_size: usize, slide_scale: f64, policy: &'a dyn SlidePolicy) -> Self {
        Self {
            window_size: window_size.max(1),
            slide_scale,
            policy,
        }
    }

    /// Compute the window for a pagination state.
    pub fn calculate(&self, state: &PaginationState) -> PageWindow {
        let (last_page, current_page) = state.normalized();
        self.calculate_normalized(state.first_page(), last_page, current_page)
    }

    /// Compute the window from already 0-based indices.
    pub fn calculate_normalized(
        &self,
        first_page: usize,
        last_page: usize,
        current_page: usize,
    ) -> PageWindow {
        let ctx = SlideContext {
            first_page,
            last_page,
            current_page,
            window_size: self.window_size,
            slide_scale: self.slide_scale,
        };

        let slide_amount = self.policy.slide_this_much(&ctx);
        let mut start = (current_page / self.window_size) * self.window_size;

        // The decision is only consulted while a full slide still fits.
        if last_page >= slide_amount
            && current_page <= last_page - slide_amount
            && self.policy.slide_maybe(&ctx)
        {
            start = start.saturating_add(slide_amount);
        }

        let end = last_page
            .saturating_add(1)
            .min(start.saturating_add(self.window_size));
        PageWindow {
            start: start.min(end),
            end,
        }
    }
}
