//! Per-cage analysis: which values can fill a cage's empty cells
//!
//! Sum and Product cages reduce to picking addends or factors for the
//! remainder of the target. Difference and Ratio cages give the largest
//! member an asymmetric role, so their analysis splits on whether that
//! maximum is already placed; without the split the candidate set would
//! require enumerating every tuple of missing values.

use crate::grid::Grid;
use crate::puzzle::{Cage, CageType, MAX_CAGE_SIZE};
use crate::ValueSet;

/// The set of values that could fill any one of the cage's empty cells,
/// given the values its cells currently hold
pub(crate) fn cage_candidates(cage: &Cage, values: &Grid, max: i32) -> ValueSet {
    let mut known = [0; MAX_CAGE_SIZE];
    let mut count = 0;
    for &pos in cage.cells() {
        let v = values[pos];
        if v != 0 {
            known[count] = i32::from(v);
            count += 1;
        }
    }
    let known = &known[..count];
    let size = cage.size() as i32;
    let target = cage.target();

    match cage.cage_type() {
        CageType::Sum => sum_candidates(target, size, known, max),
        CageType::Difference => difference_candidates(target, size, known, max),
        CageType::Product => product_candidates(target, size, known, max),
        CageType::Ratio => ratio_candidates(target, size, known, max),
    }
}

/// If `n` addends in `1..=max` must sum to `target`, which values can any
/// one addend take?
fn addends_for(target: i32, n: i32, max: i32) -> ValueSet {
    if target < 1 || n < 1 {
        return ValueSet::empty();
    }
    if n == 1 {
        return if target <= max {
            ValueSet::singleton(target)
        } else {
            ValueSet::empty()
        };
    }
    let lo = (target - max * (n - 1)).max(1);
    let hi = (target - (n - 1)).min(max);
    ValueSet::range(lo, hi)
}

/// If `n` factors in `1..=max` must multiply to `target`, which values can
/// any one factor take?
fn factors_for(target: i32, n: i32, max: i32) -> ValueSet {
    if target < 1 || n < 1 {
        return ValueSet::empty();
    }
    if n == 1 {
        return if target <= max {
            ValueSet::singleton(target)
        } else {
            ValueSet::empty()
        };
    }
    let mut out = ValueSet::empty();
    let mut i = 1;
    while i * i <= target && i <= max {
        if target % i == 0 {
            out.insert(i);
            let j = target / i;
            if j <= max {
                out.insert(j);
            }
        }
        i += 1;
    }
    out
}

fn sum_candidates(target: i32, size: i32, known: &[i32], max: i32) -> ValueSet {
    let partial_sum: i32 = known.iter().sum();
    addends_for(target - partial_sum, size - known.len() as i32, max)
}

fn difference_candidates(target: i32, size: i32, known: &[i32], max: i32) -> ValueSet {
    let missing = size - known.len() as i32;
    let partial_sum: i32 = known.iter().sum();
    let mut out = ValueSet::empty();

    // The maximum may already be placed, leaving only addends to fill in.
    if let Some(&max_m) = known.iter().max() {
        out |= addends_for(max_m * 2 - partial_sum - target, missing, max);
    }

    // Or the maximum is missing: either it is the only empty cell, or it
    // is empty along with one or more addends.
    if missing == 1 {
        let sum = target + partial_sum;
        if sum <= max {
            out.insert(sum);
        }
    } else {
        let min_sum = target + partial_sum + (missing - 1);
        for m in min_sum..=max {
            let addends = addends_for(m - partial_sum - target, missing - 1, max);
            if !addends.is_empty() {
                out |= addends;
                out.insert(m);
            }
        }
    }

    out
}

fn product_candidates(target: i32, size: i32, known: &[i32], max: i32) -> ValueSet {
    // wide enough for eight known factors of up to 16
    let partial_product: i64 = known.iter().map(|&v| i64::from(v)).product();
    if i64::from(target) % partial_product != 0 {
        return ValueSet::empty();
    }
    let remaining = (i64::from(target) / partial_product) as i32;
    factors_for(remaining, size - known.len() as i32, max)
}

fn ratio_candidates(target: i32, size: i32, known: &[i32], max: i32) -> ValueSet {
    let missing = size - known.len() as i32;
    // the divisibility tests can overflow 32 bits for large cages
    let target = i64::from(target);
    let partial_product: i64 = known.iter().map(|&v| i64::from(v)).product();
    let mut out = ValueSet::empty();

    // The maximum may already be placed, leaving only factors to fill in.
    if let Some(&max_m) = known.iter().max() {
        let square = i64::from(max_m) * i64::from(max_m);
        let divisor = partial_product * target;
        if divisor != 0 && square % divisor == 0 {
            out |= factors_for((square / divisor) as i32, missing, max);
        }
    }

    // Or the maximum is missing: either it is the only empty cell, or it
    // is empty along with one or more factors.
    if missing == 1 {
        let product = partial_product * target;
        if product >= 1 && product <= i64::from(max) {
            out.insert(product as i32);
        }
    } else {
        let min_product = partial_product * target;
        if min_product >= 1 {
            let mut i = 1;
            while i * min_product <= i64::from(max) {
                let factors = factors_for(i as i32, missing - 1, max);
                if !factors.is_empty() {
                    out |= factors;
                    out.insert((i * min_product) as i32);
                }
                i += 1;
            }
        }
    }

    out
}
