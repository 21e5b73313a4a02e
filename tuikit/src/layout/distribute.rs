//! Space distribution along a container's primary axis.
//!
//! Both entry points are pure integer arithmetic. Whenever cells cannot be
//! split evenly the remainder goes one cell at a time to the earliest slots,
//! so the distributed total always matches the input exactly.

use crate::error::LayoutError;

/// Result of an equal-slot distribution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    /// Floor of the per-slot size before the remainder spread.
    pub base: i32,
    /// Final size of every slot.
    pub slots: Vec<i32>,
    /// Gap after each slot except the last (`slots.len() - 1` entries).
    pub gaps: Vec<i32>,
}

impl Distribution {
    /// Sum of all slots and gaps.
    pub fn total(&self) -> i32 {
        self.slots.iter().sum::<i32>() + self.gaps.iter().sum::<i32>()
    }
}

/// Per-slot extra cells handed to expanding children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpandDistribution {
    pub extra: Vec<i32>,
    pub gaps: Vec<i32>,
}

impl ExpandDistribution {
    pub fn total_extra(&self) -> i32 {
        self.extra.iter().sum()
    }
}

/// Divide `total_extent` into `n` equal slots separated by `spacing`.
///
/// `(n - 1) * spacing` is reserved for the gaps first. When the extent cannot
/// even cover the gaps, the gaps shrink to fit and every slot is empty.
pub fn homogeneous(total_extent: i32, spacing: i32, n: usize) -> Result<Distribution, LayoutError> {
    if n == 0 {
        return Err(LayoutError::NoSlots);
    }
    if spacing < 0 {
        return Err(LayoutError::Negative {
            what: "spacing",
            value: spacing,
        });
    }

    let total = total_extent.max(0);
    let count = n as i32;
    let gap_count = count - 1;
    let wanted_gaps = gap_count.saturating_mul(spacing);

    if total < wanted_gaps {
        return Ok(Distribution {
            base: 0,
            slots: vec![0; n],
            gaps: spread(total, gap_count as usize),
        });
    }

    let free = total - wanted_gaps;
    let base = free / count;
    Ok(Distribution {
        base,
        slots: spread(free, n),
        gaps: vec![spacing; gap_count as usize],
    })
}

/// Distribute `shortfall` spare cells among the slots flagged in `expanding`.
///
/// Each expanding slot receives `shortfall / num_expanding`; the first
/// `shortfall % num_expanding` expanding slots get one more. Non-expanding
/// slots receive nothing. A non-positive shortfall hands out nothing.
pub fn expand(
    shortfall: i32,
    expanding: &[bool],
    spacing: i32,
) -> Result<ExpandDistribution, LayoutError> {
    if expanding.is_empty() {
        return Err(LayoutError::NoSlots);
    }
    if spacing < 0 {
        return Err(LayoutError::Negative {
            what: "spacing",
            value: spacing,
        });
    }

    let gaps = vec![spacing; expanding.len() - 1];
    let num_expanding = expanding.iter().filter(|e| **e).count();
    if shortfall <= 0 || num_expanding == 0 {
        return Ok(ExpandDistribution {
            extra: vec![0; expanding.len()],
            gaps,
        });
    }

    let mut shares = spread(shortfall, num_expanding).into_iter();
    let extra = expanding
        .iter()
        .map(|e| if *e { shares.next().unwrap_or(0) } else { 0 })
        .collect();

    Ok(ExpandDistribution { extra, gaps })
}

/// Fair share of `total` per child when a child states no preference.
pub fn fair_share(total: i32, n: usize) -> i32 {
    if n == 0 {
        return 0;
    }
    total.max(0) / n as i32
}

/// Split `amount` into `parts` integers, remainder to the front.
fn spread(amount: i32, parts: usize) -> Vec<i32> {
    if parts == 0 {
        return Vec::new();
    }
    let count = parts as i32;
    let base = amount / count;
    let remainder = (amount % count) as usize;
    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_remainder_goes_first() {
        assert_eq!(spread(8, 3), vec![3, 3, 2]);
        assert_eq!(spread(9, 3), vec![3, 3, 3]);
        assert_eq!(spread(1, 4), vec![1, 0, 0, 0]);
        assert!(spread(5, 0).is_empty());
    }

    #[test]
    fn test_fair_share() {
        assert_eq!(fair_share(10, 3), 3);
        assert_eq!(fair_share(-4, 3), 0);
        assert_eq!(fair_share(10, 0), 0);
    }
}
