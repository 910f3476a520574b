//! # Detail Reduction
//!
//! Automatic detail reduction applied when a collider exceeds the polygon
//! budget. A reduction step never mutates its input; it returns the reduced
//! parameters so the caller decides whether to keep them.

use crate::params::ShapeParameters;
use serde::{Deserialize, Serialize};

/// Policy for lowering detail when over budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DetailReduction {
    /// Never reduce; an over-budget shape fails
    None,
    /// Lower every positive detail value by one per step
    All,
    /// Lower the single largest detail value by one per step
    #[default]
    LargestFirst,
}

/// Number of detail values taking part in reduction.
pub const DETAIL_LEVEL_COUNT: usize = 9;

impl ShapeParameters {
    /// Detail values in reduction scan order: the four corner columns, top
    /// segments, bottom segments, then the X-Y, Y-Z and X-Z plane details.
    pub fn detail_levels(&self) -> [u32; DETAIL_LEVEL_COUNT] {
        let [c0, c1, c2, c3] = self.corner_details;
        [
            c0,
            c1,
            c2,
            c3,
            self.top_segments,
            self.bottom_segments,
            self.xy_detail,
            self.yz_detail,
            self.xz_detail,
        ]
    }

    /// Writes detail values given in [`ShapeParameters::detail_levels`] order.
    pub fn set_detail_levels(&mut self, levels: [u32; DETAIL_LEVEL_COUNT]) {
        let [c0, c1, c2, c3, top, bottom, xy, yz, xz] = levels;
        self.corner_details = [c0, c1, c2, c3];
        self.top_segments = top;
        self.bottom_segments = bottom;
        self.xy_detail = xy;
        self.yz_detail = yz;
        self.xz_detail = xz;
    }

    /// Largest detail value.
    pub fn max_detail(&self) -> u32 {
        self.detail_levels().into_iter().max().unwrap_or(0)
    }

    /// Sum of all detail values.
    pub fn total_detail(&self) -> u32 {
        self.detail_levels().into_iter().sum()
    }

    /// One reduction step under `mode`.
    ///
    /// Returns `None` when the policy is [`DetailReduction::None`] or every
    /// detail value is already zero.
    pub fn reduced(&self, mode: DetailReduction) -> Option<ShapeParameters> {
        let mut levels = self.detail_levels();
        match mode {
            DetailReduction::None => return None,
            DetailReduction::All => {
                if levels.iter().all(|&level| level == 0) {
                    return None;
                }
                for level in &mut levels {
                    *level = level.saturating_sub(1);
                }
            }
            DetailReduction::LargestFirst => {
                let max = levels.iter().copied().max().filter(|&max| max > 0)?;
                let first = levels.iter().position(|&level| level == max)?;
                levels[first] -= 1;
            }
        }

        let mut params = self.clone();
        params.set_detail_levels(levels);
        Some(params)
    }
}
