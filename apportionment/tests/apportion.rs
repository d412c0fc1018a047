use apportionment::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parties(votes: &[u64]) -> Vec<Party> {
    votes
        .iter()
        .enumerate()
        .map(|(idx, v)| Party::new(&format!("party {}", idx + 1), *v))
        .collect()
}

fn seats(res: &[Party]) -> Vec<u32> {
    res.iter().map(|p| p.seats).collect()
}

fn hagenbach_bischoff() -> ApportionmentRules {
    ApportionmentRules {
        method: ApportionmentMethod::HagenbachBischoff,
        tiebreak_mode: TieBreakMode::UseInputOrder,
    }
}

#[test]
fn largest_remainder_example() {
    init();
    let res = apportion(&parties(&[400000, 250000, 100000, 73000, 5000]), 5).unwrap();
    assert_eq!(seats(&res), vec![2, 2, 1, 0, 0]);
    let remainders: Vec<u64> = res.iter().map(|p| p.remainder).collect();
    assert_eq!(remainders, vec![68800, 84400, 100000, 73000, 5000]);
    let extra: Vec<bool> = res.iter().map(|p| p.extra_seat()).collect();
    assert_eq!(extra, vec![false, true, true, false, false]);
}

#[test]
fn hagenbach_bischoff_example() {
    init();
    let res = apportion_with_rules(
        &parties(&[400000, 250000, 100000, 73000, 5000]),
        5,
        &hagenbach_bischoff(),
    )
    .unwrap();
    assert_eq!(seats(&res), vec![3, 2, 0, 0, 0]);
}

#[test]
fn names_and_order_are_kept() {
    init();
    let input = vec![Party::new("Republican", 10), Party::new("Democratic", 20)];
    let res = apportion(&input, 3).unwrap();
    let names: Vec<&str> = res.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Republican", "Democratic"]);
    assert_eq!(seats(&res), vec![1, 2]);
}

#[test]
fn seats_always_sum_to_total() {
    init();
    let vote_sets: Vec<Vec<u64>> = vec![
        vec![1],
        vec![0, 5],
        vec![3, 2],
        vec![1, 1, 1, 1, 1],
        vec![2473633, 2461854, 62229],
        vec![100, 200, 300, 400, 500, 600, 700],
        vec![7, 0, 0, 0, 13, 1],
        vec![999_999_999, 1, 1],
    ];
    for votes in vote_sets.iter() {
        for total in 1..60 {
            for rules in [ApportionmentRules::DEFAULT_RULES, hagenbach_bischoff()] {
                let res = apportion_with_rules(&parties(votes), total, &rules).unwrap();
                let sum: u32 = res.iter().map(|p| p.seats).sum();
                assert_eq!(sum, total, "votes {:?} seats {} rules {:?}", votes, total, rules);
            }
        }
    }
}

#[test]
fn ties_go_to_the_first_listed() {
    init();
    let res = apportion(&parties(&[100, 100, 100]), 2).unwrap();
    assert_eq!(seats(&res), vec![1, 1, 0]);
    let res = apportion_with_rules(&parties(&[100, 100, 100]), 2, &hagenbach_bischoff()).unwrap();
    assert_eq!(seats(&res), vec![1, 1, 0]);
}

#[test]
fn equal_votes_never_favour_the_later_party() {
    init();
    for total in 1..20 {
        let res = apportion(&parties(&[50, 30, 50, 30]), total).unwrap();
        assert!(res[0].seats >= res[2].seats);
        assert!(res[0].seats <= res[2].seats + 1);
        assert!(res[1].seats >= res[3].seats);
    }
}

#[test]
fn no_votes_cycles_in_input_order() {
    init();
    let res = apportion(&parties(&[0, 0]), 5).unwrap();
    assert_eq!(seats(&res), vec![3, 2]);
}

#[test]
fn fewer_votes_than_seats() {
    init();
    // Quota 0: the remainders are the votes themselves.
    let res = apportion(&parties(&[1, 2]), 4).unwrap();
    assert_eq!(seats(&res), vec![2, 2]);
}

#[test]
fn overallocating_quota_uses_exact_shares() {
    init();
    let res = apportion(&parties(&[3, 2]), 3).unwrap();
    assert_eq!(seats(&res), vec![2, 1]);
    let res = apportion(&parties(&[60, 3]), 40).unwrap();
    assert_eq!(seats(&res), vec![38, 2]);
    let res = apportion(&parties(&[46, 39]), 40).unwrap();
    assert_eq!(seats(&res), vec![22, 18]);
}

// Each party gets its exact share of the seats, rounded down or up.
fn check_quota(votes: &[u64], res: &[Party], total: u32) {
    let total_votes: u64 = votes.iter().sum();
    for (v, p) in votes.iter().zip(res.iter()) {
        let scaled = *v as u128 * total as u128;
        let lower = scaled / total_votes as u128;
        let upper = lower + u128::from(scaled % total_votes as u128 != 0);
        let s = p.seats as u128;
        assert!(
            lower <= s && s <= upper,
            "votes {:?} seats {} party {:?}",
            votes,
            total,
            p
        );
    }
}

#[test]
fn few_votes_per_seat_respect_the_quota() {
    init();
    let vote_sets: Vec<Vec<u64>> = vec![
        vec![60, 3],
        vec![46, 39],
        vec![3, 2],
        vec![50, 7, 7, 1],
        vec![99, 98, 2],
    ];
    for votes in vote_sets.iter() {
        let total_votes: u64 = votes.iter().sum();
        for total in 1..60 {
            let res = apportion(&parties(votes), total).unwrap();
            if total_votes >= total as u64 {
                assert!(
                    res.iter().all(|p| p.extra_seats <= 1),
                    "votes {:?} seats {}: {:?}",
                    votes,
                    total,
                    res
                );
            }
            // Over-allocating quotas fall back to the exact shares.
            let quota = total_votes / total as u64;
            if quota > 0 && votes.iter().map(|v| v / quota).sum::<u64>() > total as u64 {
                check_quota(votes, &res, total);
            }
        }
    }
}

#[test]
fn hagenbach_bischoff_without_votes_matches_largest_remainder() {
    init();
    let res = apportion_with_rules(&parties(&[0, 0]), 5, &hagenbach_bischoff()).unwrap();
    assert_eq!(seats(&res), vec![3, 2]);
}

#[test]
fn zero_seats_is_a_division_by_zero() {
    init();
    assert_eq!(
        apportion(&parties(&[1, 2]), 0),
        Err(AllocationError::DivisionByZero)
    );
}

#[test]
fn invalid_inputs() {
    init();
    assert!(matches!(
        apportion(&[], 3),
        Err(AllocationError::InvalidInput(_))
    ));
    let dup = vec![Party::new("A", 1), Party::new("A", 2)];
    assert!(matches!(
        apportion(&dup, 3),
        Err(AllocationError::InvalidInput(_))
    ));
    assert!(matches!(
        Party::try_new("A", -5),
        Err(AllocationError::InvalidInput(_))
    ));
    assert_eq!(Party::try_new("A", 5), Ok(Party::new("A", 5)));
}

#[test]
fn input_seats_are_ignored() {
    init();
    let mut input = parties(&[400000, 250000, 100000, 73000, 5000]);
    input[4].seats = 12;
    input[4].extra_seats = 3;
    let res = apportion(&input, 5).unwrap();
    assert_eq!(seats(&res), vec![2, 2, 1, 0, 0]);
}

#[test]
fn deterministic() {
    init();
    let input = parties(&[12, 7, 7, 3, 9, 1]);
    for total in 1..15 {
        assert_eq!(apportion(&input, total), apportion(&input, total));
    }
}
