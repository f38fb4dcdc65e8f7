/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

//! Binomial coefficients and expectations of order statistics of fair dice.

/// `n` choose `r`, or 0 when `r > n`.
///
/// Exact for every `n` a die group can hold; overflows `u128` from roughly `n = 125` on.
pub fn binomial(n: u32, r: u32) -> u128 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut result: u128 = 1;
    for i in 0..r {
        // result * (n - i) is divisible by i + 1 since result == C(n, i)
        result = result * u128::from(n - i) / u128::from(i + 1);
    }
    result
}

/// `C(n, i)` for every `i` in `0..=n`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialRow {
    coefficients: Vec<f64>,
}

impl BinomialRow {
    pub fn new(n: u32) -> BinomialRow {
        BinomialRow {
            coefficients: (0..=n).map(|i| binomial(n, i) as f64).collect(),
        }
    }

    pub fn n(&self) -> u32 {
        (self.coefficients.len() - 1) as u32
    }

    pub fn get(&self, i: u32) -> f64 {
        self.coefficients.get(i as usize).copied().unwrap_or(0.0)
    }
}

/// Probability mass terms for face `face` of `n` dice with `sides` sides.
///
/// Element `i` is `C(n, i) * (p(i) - q(i))` where `p(i)` is the chance that exactly the `i`
/// chosen dice show more than `face` and the rest at most `face`, and `q(i)` the same with
/// `face - 1`. Summing elements `0..=k` gives the chance that the `k+1`-th highest die shows
/// exactly `face`.
fn face_terms(row: &BinomialRow, sides: u32, face: u32) -> Vec<f64> {
    let n = row.n();
    let s = f64::from(sides);
    let above = f64::from(sides - face) / s;
    let at_most = f64::from(face) / s;
    let above_or_at = f64::from(sides - face + 1) / s;
    let below = f64::from(face - 1) / s;
    (0..=n)
        .map(|i| {
            let rest = (n - i) as i32;
            let p = above.powi(i as i32) * at_most.powi(rest);
            let q = above_or_at.powi(i as i32) * below.powi(rest);
            row.get(i) * (p - q)
        })
        .collect()
}

/// Sums `face * P(order statistic == face)` over all faces, where `prefix_ends` lists
/// for each order statistic the last `i` included in the inner binomial sum.
fn order_statistics_sum(n: u32, sides: u32, prefix_ends: impl Iterator<Item = u32> + Clone) -> f64 {
    let row = BinomialRow::new(n);
    (1..=sides)
        .map(|face| {
            let mut prefix = Vec::with_capacity(n as usize + 1);
            let mut running = 0.0;
            for term in face_terms(&row, sides, face) {
                running += term;
                prefix.push(running);
            }
            let probability: f64 = prefix_ends.clone().map(|end| prefix[end as usize]).sum();
            f64::from(face) * probability
        })
        .sum()
}

/// Expected sum of the `keep` highest of `n` dice with `sides` sides.
pub fn expected_keep_highest(n: u32, sides: u32, keep: u32) -> f64 {
    let keep = keep.min(n);
    order_statistics_sum(n, sides, 0..keep)
}

/// Expected sum of the `keep` lowest of `n` dice with `sides` sides.
pub fn expected_keep_lowest(n: u32, sides: u32, keep: u32) -> f64 {
    let keep = keep.min(n);
    order_statistics_sum(n, sides, (1..=keep).map(move |k| n - k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_binomial_values() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(10, 3), 120);
        assert_eq!(binomial(20, 10), 184_756);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(99, 49), 50_445_672_272_782_096_667_406_248_628);
    }

    #[test]
    fn test_binomial_edges() {
        for n in 0..=100 {
            assert_eq!(binomial(n, 0), 1);
            assert_eq!(binomial(n, n), 1);
        }
    }

    #[test]
    fn test_binomial_row() {
        let row = BinomialRow::new(4);
        assert_eq!(row.n(), 4);
        let values: Vec<f64> = (0..=4).map(|i| row.get(i)).collect();
        assert_eq!(values, vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(row.get(5), 0.0);
    }

    #[test]
    fn test_advantage_and_disadvantage() {
        assert!(close(expected_keep_highest(2, 20, 1), 13.825));
        assert!(close(expected_keep_lowest(2, 20, 1), 7.175));
    }

    #[test]
    fn test_keep_all_matches_closed_form() {
        assert!(close(expected_keep_highest(3, 6, 3), 10.5));
        assert!(close(expected_keep_lowest(2, 6, 2), 7.0));
        assert!(close(expected_keep_highest(1, 6, 1), 3.5));
        assert!(close(expected_keep_lowest(4, 8, 9), 18.0));
    }

    #[test]
    fn test_four_d_six() {
        assert!(close(expected_keep_highest(4, 6, 3), 12.244_598_765_432_1));
        assert!(close(expected_keep_lowest(4, 6, 3), 8.755_401_234_567_9));
    }

    #[test]
    fn test_keep_none() {
        assert_eq!(expected_keep_highest(4, 6, 0), 0.0);
        assert_eq!(expected_keep_lowest(4, 6, 0), 0.0);
    }

    proptest! {
        #[test]
        fn binomial_is_symmetric(n in 0u32..=20, r in 0u32..=20) {
            prop_assume!(r <= n);
            prop_assert_eq!(binomial(n, r), binomial(n, n - r));
        }

        #[test]
        fn binomial_follows_pascal(n in 1u32..=60, r in 1u32..=60) {
            prop_assume!(r <= n);
            prop_assert_eq!(binomial(n, r), binomial(n - 1, r - 1) + binomial(n - 1, r));
        }

        #[test]
        fn highest_and_lowest_split_the_total(n in 1u32..=12, sides in 1u32..=20, keep in 0u32..=12) {
            prop_assume!(keep <= n);
            let total = f64::from(n) * f64::from(sides + 1) / 2.0;
            let split = expected_keep_highest(n, sides, keep) + expected_keep_lowest(n, sides, n - keep);
            prop_assert!((split - total).abs() < 1e-6);
        }
    }
}
