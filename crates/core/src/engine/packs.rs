use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::plan::PackLine;

/// Minimal whole-unit purchase covering `total_need_g`.
///
/// Never under-covers: rounding is always up, by design, so a plan can
/// never recommend less product than the computed need. Among covering
/// combinations the smallest surplus wins, then the fewest units.
/// With a single pack size this reduces to plain ceiling division.
pub fn pack_breakdown(total_need_g: Decimal, pack_sizes_g: &[u32]) -> Vec<PackLine> {
    let mut sizes: Vec<u32> = pack_sizes_g.to_vec();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();

    if sizes.is_empty() || total_need_g <= Decimal::ZERO {
        return Vec::new();
    }

    let mut best: Option<Candidate> = None;
    let mut counts = vec![0u32; sizes.len()];
    search(&sizes, 0, total_need_g, &mut counts, &mut best);

    match best {
        Some(candidate) => sizes
            .iter()
            .zip(candidate.counts)
            .filter(|(_, units)| *units > 0)
            .map(|(&unit_g, units)| PackLine { unit_g, units })
            .collect(),
        None => Vec::new(),
    }
}

struct Candidate {
    surplus: Decimal,
    units: u32,
    counts: Vec<u32>,
}

fn search(
    sizes: &[u32],
    idx: usize,
    remaining: Decimal,
    counts: &mut Vec<u32>,
    best: &mut Option<Candidate>,
) {
    let size = sizes[idx];

    if idx == sizes.len() - 1 {
        let units = ceil_units(remaining, size);
        counts[idx] = units;
        let surplus = Decimal::from(units) * Decimal::from(size) - remaining;
        let total_units = counts.iter().sum::<u32>();

        let better = match best {
            Some(current) => {
                surplus < current.surplus
                    || (surplus == current.surplus && total_units < current.units)
            }
            None => true,
        };
        if better {
            *best = Some(Candidate { surplus, units: total_units, counts: counts.clone() });
        }
        counts[idx] = 0;
        return;
    }

    let cap = ceil_units(remaining, size);
    for units in 0..=cap {
        counts[idx] = units;
        let covered = Decimal::from(units) * Decimal::from(size);
        search(sizes, idx + 1, remaining - covered, counts, best);
    }
    counts[idx] = 0;
}

fn ceil_units(remaining: Decimal, size_g: u32) -> u32 {
    if remaining <= Decimal::ZERO {
        return 0;
    }
    (remaining / Decimal::from(size_g)).ceil().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::pack_breakdown;
    use crate::domain::plan::PackLine;

    fn purchased(lines: &[PackLine]) -> Decimal {
        lines.iter().map(PackLine::purchased_g).sum()
    }

    #[test]
    fn single_size_is_ceiling_division() {
        let lines = pack_breakdown(Decimal::from(2100), &[1000]);
        assert_eq!(lines, vec![PackLine { unit_g: 1000, units: 3 }]);
    }

    #[test]
    fn exact_multiple_has_zero_surplus() {
        let lines = pack_breakdown(Decimal::from(1500), &[3000, 750]);
        assert_eq!(lines, vec![PackLine { unit_g: 750, units: 2 }]);
        assert_eq!(purchased(&lines), Decimal::from(1500));
    }

    #[test]
    fn larger_pack_wins_when_surplus_ties() {
        // 1900 g: one 2000 g pack (surplus 100, 1 unit) beats four
        // 500 g packs (surplus 100, 4 units).
        let lines = pack_breakdown(Decimal::from(1900), &[2000, 500]);
        assert_eq!(lines, vec![PackLine { unit_g: 2000, units: 1 }]);
    }

    #[test]
    fn mixed_sizes_minimize_surplus() {
        // 2600 g over {2000, 500}: 1x2000 + 2x500 covers with 400 g
        // surplus; 2x2000 would waste 1400 g.
        let lines = pack_breakdown(Decimal::from(2600), &[2000, 500]);
        assert_eq!(
            lines,
            vec![PackLine { unit_g: 2000, units: 1 }, PackLine { unit_g: 500, units: 2 }]
        );
    }

    #[test]
    fn minimal_sufficient_covering_holds_for_single_size() {
        for need in [1, 499, 500, 501, 999, 1000, 1250, 9999] {
            let need = Decimal::from(need);
            let lines = pack_breakdown(need, &[500]);
            let bought = purchased(&lines);
            assert!(bought >= need, "must never under-cover {need}");
            assert!(
                bought - Decimal::from(500) < need,
                "one pack fewer must under-cover {need}"
            );
        }
    }

    #[test]
    fn fractional_needs_are_still_covered() {
        let need = Decimal::new(10505, 1); // 1050.5 g
        let lines = pack_breakdown(need, &[1000]);
        assert_eq!(lines, vec![PackLine { unit_g: 1000, units: 2 }]);
    }

    #[test]
    fn zero_need_buys_nothing() {
        assert!(pack_breakdown(Decimal::ZERO, &[500]).is_empty());
    }
}
