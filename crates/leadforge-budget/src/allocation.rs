//! Integer percentage allocation across channels.
//!
//! Every function here returns percentages that sum to exactly 100 for a
//! non-empty input.

use serde::{Deserialize, Serialize};

use crate::channels::LeadChannel;

/// One channel's share of the monthly budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub channel: LeadChannel,
    pub percent: u32,
}

/// A channel mix row: label, share and the dollars that share buys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub channel: String,
    pub percent: u32,
    pub budget_usd: u64,
}

/// Scale raw weights to integer percentages summing to 100.
///
/// Negatives and NaN count as zero. All-zero input splits 100 evenly with
/// the remainder going to the leading entries. Otherwise each share is
/// floored and the leftover units go one each to the largest fractional
/// parts, ties resolved by position.
pub fn normalize_allocations_to_100(raw: &[f64]) -> Vec<u32> {
    if raw.is_empty() {
        return Vec::new();
    }

    let values: Vec<f64> = raw
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let sum: f64 = values.iter().sum();
    let n = values.len() as u32;

    if sum <= 0.0 {
        let equal = 100 / n;
        let remainder = 100 - equal * n;
        return (0..n).map(|i| equal + u32::from(i < remainder)).collect();
    }

    let scaled: Vec<f64> = values.iter().map(|v| v * 100.0 / sum).collect();
    let mut floored: Vec<u32> = scaled.iter().map(|v| v.floor() as u32).collect();

    // stable sort keeps original order among equal fractions
    let mut order: Vec<(usize, f64)> = scaled
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v - v.floor()))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: u32 = floored.iter().sum();
    if total <= 100 {
        for &(index, _) in order.iter().cycle().take((100 - total) as usize) {
            floored[index] += 1;
        }
    } else {
        // float error pushed a share over an integer boundary
        let mut excess = total - 100;
        for &(index, _) in order.iter().rev().cycle() {
            if excess == 0 {
                break;
            }
            if floored[index] > 0 {
                floored[index] -= 1;
                excess -= 1;
            }
        }
    }

    floored
}

/// Set one channel's share and spread the rest over the others.
///
/// `next_percent` is rounded and clamped to 0..=100. The remaining share
/// is split in proportion to the other channels' current percentages.
/// A sole channel always holds 100. Unknown `changed` channels leave the
/// input untouched.
pub fn rebalance_allocations(
    allocations: &[Allocation],
    changed: LeadChannel,
    next_percent: f64,
) -> Vec<Allocation> {
    let mut updated = allocations.to_vec();
    let Some(target) = updated.iter().position(|a| a.channel == changed) else {
        return updated;
    };

    if updated.len() == 1 {
        updated[target].percent = 100;
        return updated;
    }

    let clamped = if next_percent.is_finite() {
        next_percent.round().clamp(0.0, 100.0) as u32
    } else {
        0
    };
    let remaining = f64::from(100 - clamped);

    let others: Vec<f64> = updated
        .iter()
        .filter(|a| a.channel != changed)
        .map(|a| f64::from(a.percent))
        .collect();
    let mut spread = normalize_allocations_to_100(&others)
        .into_iter()
        .map(|share| (f64::from(share) / 100.0 * remaining).round() as u32);

    for allocation in updated.iter_mut() {
        allocation.percent = if allocation.channel == changed {
            clamped
        } else {
            spread.next().unwrap_or(0)
        };
    }

    let weights: Vec<f64> = updated.iter().map(|a| f64::from(a.percent)).collect();
    for (allocation, percent) in updated.iter_mut().zip(normalize_allocations_to_100(&weights)) {
        allocation.percent = percent;
    }
    updated
}

/// Even split over `channels`, via [`normalize_allocations_to_100`].
pub fn even_allocations(channels: &[LeadChannel]) -> Vec<Allocation> {
    let percents = normalize_allocations_to_100(&vec![0.0; channels.len()]);
    channels
        .iter()
        .zip(percents)
        .map(|(&channel, percent)| Allocation { channel, percent })
        .collect()
}

/// Dollar breakdown of a monthly budget across allocations.
pub fn channel_mix(monthly_budget: f64, allocations: &[Allocation]) -> Vec<BudgetAllocation> {
    allocations
        .iter()
        .map(|a| BudgetAllocation {
            channel: a.channel.label().to_string(),
            percent: a.percent,
            budget_usd: (monthly_budget * f64::from(a.percent) / 100.0).round().max(0.0) as u64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(values: &[u32]) -> u32 {
        values.iter().sum()
    }

    #[test]
    fn test_all_zero_splits_evenly() {
        assert_eq!(normalize_allocations_to_100(&[0.0, 0.0, 0.0]), vec![34, 33, 33]);
        assert_eq!(normalize_allocations_to_100(&[0.0; 6]), vec![17, 17, 17, 17, 16, 16]);
        assert_eq!(normalize_allocations_to_100(&[-5.0, f64::NAN]), vec![50, 50]);
    }

    #[test]
    fn test_exact_shares_unchanged() {
        assert_eq!(normalize_allocations_to_100(&[10.0, 10.0, 80.0]), vec![10, 10, 80]);
        assert_eq!(normalize_allocations_to_100(&[1.0, 1.0, 2.0]), vec![25, 25, 50]);
    }

    #[test]
    fn test_largest_remainder_with_positional_ties() {
        assert_eq!(normalize_allocations_to_100(&[1.0, 1.0, 1.0]), vec![34, 33, 33]);
        // 14.2857 each, 2 leftover units go to the first two
        assert_eq!(normalize_allocations_to_100(&[1.0; 7]), vec![15, 15, 14, 14, 14, 14, 14]);
        // 16.67 / 33.33 / 50: fraction .67 wins
        assert_eq!(normalize_allocations_to_100(&[1.0, 2.0, 3.0]), vec![17, 33, 50]);
    }

    #[test]
    fn test_always_sums_to_100() {
        let cases: Vec<Vec<f64>> = vec![
            vec![3.3, 3.3, 3.4],
            vec![0.001, 1_000_000.0],
            vec![7.0; 13],
            vec![1.0, 0.0, -3.0, 2.5, 9.75],
            (1..=40).map(f64::from).collect(),
            vec![42.0],
        ];
        for case in cases {
            let result = normalize_allocations_to_100(&case);
            assert_eq!(result.len(), case.len());
            assert_eq!(sum(&result), 100, "input {:?}", case);
        }
        assert!(normalize_allocations_to_100(&[]).is_empty());
    }

    fn allocations(percents: &[(LeadChannel, u32)]) -> Vec<Allocation> {
        percents
            .iter()
            .map(|&(channel, percent)| Allocation { channel, percent })
            .collect()
    }

    #[test]
    fn test_rebalance_spreads_remainder_proportionally() {
        let current = allocations(&[
            (LeadChannel::GoogleAds, 50),
            (LeadChannel::FacebookAds, 30),
            (LeadChannel::Seo, 20),
        ]);
        let next = rebalance_allocations(&current, LeadChannel::GoogleAds, 60.0);
        let percents: Vec<u32> = next.iter().map(|a| a.percent).collect();
        assert_eq!(percents, vec![60, 24, 16]);
    }

    #[test]
    fn test_rebalance_clamps_and_sums() {
        let current = allocations(&[
            (LeadChannel::GoogleAds, 34),
            (LeadChannel::FacebookAds, 33),
            (LeadChannel::Seo, 33),
        ]);
        let next = rebalance_allocations(&current, LeadChannel::Seo, 250.0);
        assert_eq!(next[2].percent, 100);
        assert_eq!(sum(&next.iter().map(|a| a.percent).collect::<Vec<_>>()), 100);

        let next = rebalance_allocations(&current, LeadChannel::Seo, -10.0);
        assert_eq!(next[2].percent, 0);
        assert_eq!(next[0].percent + next[1].percent, 100);
    }

    #[test]
    fn test_rebalance_sole_and_unknown_channel() {
        let sole = allocations(&[(LeadChannel::Seo, 40)]);
        assert_eq!(rebalance_allocations(&sole, LeadChannel::Seo, 10.0)[0].percent, 100);

        let current = allocations(&[(LeadChannel::GoogleAds, 70), (LeadChannel::Seo, 30)]);
        assert_eq!(rebalance_allocations(&current, LeadChannel::FacebookAds, 10.0), current);
    }

    #[test]
    fn test_channel_mix_rounds_dollars() {
        let mix = channel_mix(
            2_500.0,
            &allocations(&[(LeadChannel::GoogleAds, 33), (LeadChannel::FacebookAds, 67)]),
        );
        assert_eq!(mix[0].channel, "Google Ads");
        assert_eq!(mix[0].budget_usd, 825);
        assert_eq!(mix[1].budget_usd, 1_675);
        let wire = serde_json::to_value(&mix[0]).unwrap();
        assert_eq!(wire["budgetUsd"], 825);
    }

    #[test]
    fn test_even_allocations() {
        let even = even_allocations(&[LeadChannel::GoogleAds, LeadChannel::Seo, LeadChannel::FacebookAds]);
        let percents: Vec<u32> = even.iter().map(|a| a.percent).collect();
        assert_eq!(percents, vec![34, 33, 33]);
    }
}
