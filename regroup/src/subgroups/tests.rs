use super::*;
use std::time::{Duration, Instant};

fn validate_plan(n: usize, sizes: &GroupSizePlan) {
    assert_eq!(sizes.total(), n, "population {}", n);
    assert_eq!(sizes.len(), sizes.small_groups() + sizes.large_groups());
    assert_eq!(sizes.small_groups() * 3 + sizes.large_groups() * 4, n);
}

/// Fewest groups of 4 over every split, found by trying them all.
fn exhaustive_large_groups(n: usize) -> Option<usize> {
    (0..=n / 3)
        .flat_map(|x| (0..=n / 4).map(move |y| (x, y)))
        .filter(|&(x, y)| 3 * x + 4 * y == n)
        .map(|(_, y)| y)
        .min()
}

#[test]
fn infeasible_populations() {
    for n in [1, 2, 5] {
        assert!(plan(n).is_none(), "population {} should be infeasible", n);
    }
}

#[test]
fn empty_population_is_an_empty_plan() {
    let sizes = plan(0).expect("zero participants form zero groups");
    assert!(sizes.is_empty());
    assert_eq!(sizes.total(), 0);
    assert_eq!(sizes.sizes().count(), 0);
}

#[test]
fn four_is_a_single_group() {
    assert_eq!(plan(4).unwrap().to_vec(), [4]);
}

#[test]
fn specific_cases() {
    assert_eq!(plan(3).unwrap().to_vec(), [3]);
    assert_eq!(plan(6).unwrap().to_vec(), [3, 3]);
    assert_eq!(plan(7).unwrap().to_vec(), [3, 4]);
    assert_eq!(plan(8).unwrap().to_vec(), [4, 4]);
    assert_eq!(plan(10).unwrap().to_vec(), [3, 3, 4]);
    assert_eq!(plan(11).unwrap().to_vec(), [3, 4, 4]);
    assert_eq!(plan(12).unwrap().to_vec(), [3, 3, 3, 3]);
}

#[test]
fn matches_exhaustive_search() {
    for n in 0..=200 {
        match exhaustive_large_groups(n) {
            None => assert!(plan(n).is_none(), "population {}", n),
            Some(y) => {
                let planned = plan(n).unwrap_or_else(|| panic!("population {} has no plan", n));
                validate_plan(n, &planned);
                assert_eq!(planned.large_groups(), y, "population {}", n);
                let sizes = planned.to_vec();
                assert!(sizes.iter().all(|size| ALLOWED_GROUP_SIZES.contains(size)));
                assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}

#[test]
fn populations_past_u32_are_planned() {
    let n = u32::MAX as usize + 3;
    let sizes = plan(n).expect("every population above 5 can be split");
    validate_plan(n, &sizes);
    assert!(sizes.large_groups() <= 2);
    assert_eq!(plan(usize::MAX).map(|sizes| sizes.total()), Some(usize::MAX));
}

#[test]
fn large_populations_plan_quickly() {
    let started = Instant::now();
    for n in (1_000_000..1_000_100).chain([20_000, 50_000_000]) {
        validate_plan(n, &plan(n).unwrap());
    }
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn plan_is_stored_as_counts() {
    let sizes = plan(11).unwrap();
    assert_eq!(sizes.small_groups(), 1);
    assert_eq!(sizes.large_groups(), 2);
    assert_eq!(
        serde_json::to_string(&sizes).unwrap(),
        r#"{"small_groups":1,"large_groups":2}"#
    );
}
