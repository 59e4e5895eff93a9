use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regroup::*;
use std::collections::HashSet;

fn history_strategy() -> impl Strategy<Value = Vec<Partition<u8>>> {
    let group = prop::collection::vec(0u8..20, 0..5);
    let partition = prop::collection::vec(group, 0..5).prop_map(Partition::new);
    prop::collection::vec(partition, 0..6)
}

fn weights_strategy(n: u8) -> impl Strategy<Value = PairWeights<u8>> {
    prop::collection::vec((0..n, 0..n, 0u32..4), 0..40).prop_map(|entries| {
        let mut weights = PairWeights::new();
        for (a, b, w) in entries {
            weights.set(&a, &b, w);
        }
        weights
    })
}

proptest! {
    #[test]
    fn history_ignores_session_order(history in history_strategy(), seed in any::<u64>()) {
        let forward = PairWeights::build(&history);
        let mut shuffled = history.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        rand::seq::SliceRandom::shuffle(shuffled.as_mut_slice(), &mut rng);
        prop_assert_eq!(forward.clone(), PairWeights::build(&shuffled));
        let mut reversed = history;
        reversed.reverse();
        prop_assert_eq!(forward, PairWeights::build(&reversed));
    }

    #[test]
    fn weights_are_symmetric(history in history_strategy(), a in 0u8..20, b in 0u8..20) {
        let weights = PairWeights::build(&history);
        prop_assert_eq!(weights.weight(&a, &b), weights.weight(&b, &a));
    }

    #[test]
    fn plan_is_minimal_or_absent(n in 0usize..500) {
        match plan(n) {
            None => prop_assert!(matches!(n, 1 | 2 | 5)),
            Some(sizes) => {
                prop_assert!(!matches!(n, 1 | 2 | 5));
                prop_assert_eq!(sizes.total(), n);
                prop_assert!(sizes.sizes().all(|s| s == 3 || s == 4));
                let fewest = (0..=n / 4).find(|y| (n - 4 * y) % 3 == 0).unwrap();
                prop_assert_eq!(sizes.large_groups(), fewest);
            }
        }
    }

    #[test]
    fn assignment_covers_everyone_once(
        n in 0u8..40,
        weights in weights_strategy(40),
        attempts in 1u32..30,
        seed in any::<u64>()
    ) {
        let present: Vec<u8> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        match plan(present.len()) {
            None => {
                let err = assign(&present, &weights, attempts, &mut rng).unwrap_err();
                prop_assert!(matches!(err, Error::Infeasible { .. }), "unexpected error");
            }
            Some(sizes) => {
                let found = assign(&present, &weights, attempts, &mut rng).unwrap();
                let group_sizes: Vec<u32> =
                    found.partition.groups().iter().map(|g| g.len() as u32).collect();
                prop_assert_eq!(group_sizes, sizes.to_vec());

                let members: HashSet<u8> = found.partition.members().copied().collect();
                prop_assert_eq!(members.len(), present.len());
                prop_assert_eq!(members, present.iter().copied().collect::<HashSet<u8>>());

                prop_assert_eq!(found.score, total_score(&found.partition, &weights));
                prop_assert!(found.attempts >= 1 && found.attempts <= attempts);
            }
        }
    }

    #[test]
    fn no_history_means_one_attempt(n in 0u8..40, attempts in 1u32..2000, seed in any::<u64>()) {
        prop_assume!(plan(n as usize).is_some());
        let present: Vec<u8> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let found = assign(&present, &PairWeights::new(), attempts, &mut rng).unwrap();
        prop_assert_eq!(found.score, 0);
        prop_assert_eq!(found.attempts, 1);
    }

    #[test]
    fn labels_repeat_every_cycle(groups in 1usize..40, names in 1usize..15) {
        let partition = Partition::new((0..groups).map(|g| vec![g]).collect());
        let list: Vec<String> = (0..names).map(|i| format!("g{}", i)).collect();
        let labels = name_groups(&partition, &list).unwrap();
        for g in 0..groups {
            prop_assert_eq!(&labels[&g], &list[g % names]);
            if g + names < groups {
                prop_assert_eq!(&labels[&g], &labels[&(g + names)]);
            }
        }
    }
}

#[test]
fn twelve_groups_with_eleven_names_wrap() {
    let partition = Partition::new((0..12u32).map(|g| vec![g]).collect());
    let labels = name_groups(&partition, &DEFAULT_GROUP_NAMES).unwrap();
    assert_eq!(labels[&0], labels[&11]);
    assert_ne!(labels[&0], labels[&10]);
}
