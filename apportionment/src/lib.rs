mod config;
pub mod hemicycle;
pub mod layout;
pub mod manual;
pub mod nested;
pub mod summary;

use log::{debug, info};

use std::collections::HashSet;

pub use crate::config::*;

// **** Private structures ****

type SeatCount = u64;

#[derive(Eq, PartialEq, Debug, Clone)]
struct ProvisionalAllocation {
    seats: Vec<SeatCount>,
    awarded: SeatCount,
    // Ranking keys of the leftover votes. They are exact, and only comparable
    // within one allocation.
    keys: Vec<u64>,
    // The leftover votes reported to the caller.
    remainders: Vec<u64>,
}

/// Apportions `total_seats` among the parties with the Hare largest-remainder
/// method. Ties are broken by input order.
///
/// The parties are returned in input order, with their `seats`, `remainder`
/// and `extra_seats` fields filled in. The seats always sum to `total_seats`.
///
/// ```
/// use apportionment::{apportion, Party};
///
/// let parties = vec![
///     Party::new("A", 400000),
///     Party::new("B", 250000),
///     Party::new("C", 100000),
///     Party::new("D", 73000),
///     Party::new("E", 5000),
/// ];
/// let res = apportion(&parties, 5)?;
/// let seats: Vec<u32> = res.iter().map(|p| p.seats).collect();
/// assert_eq!(seats, vec![2, 2, 1, 0, 0]);
/// # Ok::<(), apportionment::AllocationError>(())
/// ```
pub fn apportion(parties: &[Party], total_seats: u32) -> Result<Vec<Party>, AllocationError> {
    apportion_with_rules(parties, total_seats, &ApportionmentRules::DEFAULT_RULES)
}

/// Runs the apportionment with the given rules.
///
/// Arguments:
/// * `parties` the contenders, in tie-break order. Only the name and the votes are read.
/// * `total_seats` the number of seats to distribute. Zero is rejected with `DivisionByZero`.
/// * `rules` the quota scheme and the tie-break mode
pub fn apportion_with_rules(
    parties: &[Party],
    total_seats: u32,
    rules: &ApportionmentRules,
) -> Result<Vec<Party>, AllocationError> {
    info!(
        "Apportioning {:?} seats among {:?} parties, rules: {:?}",
        total_seats,
        parties.len(),
        rules
    );
    let total_votes = checks(parties, total_seats)?;
    let seats = total_seats as SeatCount;

    let res = match rules.method {
        ApportionmentMethod::LargestRemainder => {
            run_largest_remainder(parties, total_votes, seats, rules.tiebreak_mode)
        }
        ApportionmentMethod::HagenbachBischoff => {
            run_hagenbach_bischoff(parties, total_votes, seats, rules.tiebreak_mode)
        }
    };

    let allocated: SeatCount = res.iter().map(|p| p.seats as SeatCount).sum();
    assert_eq!(
        allocated, seats,
        "Allocated seats differ from the requested seats: {:?}",
        res
    );
    for p in res.iter() {
        debug!(
            "{:>10} {} -> {} seats ({} extra, remainder {})",
            p.votes, p.name, p.seats, p.extra_seats, p.remainder
        );
    }
    Ok(res)
}

/// The Gallagher least-squares index of the allocation, on a 0-100 scale.
///
/// The vote and seat totals are taken from the parties themselves. Returns 0
/// if there are no votes or no seats.
pub fn gallagher_index(parties: &[Party]) -> f64 {
    let total_votes: u64 = parties.iter().map(|p| p.votes).sum();
    let total_seats: u64 = parties.iter().map(|p| p.seats as u64).sum();
    if total_votes == 0 || total_seats == 0 {
        return 0.0;
    }
    let squares: f64 = parties
        .iter()
        .map(|p| {
            let vote_share = p.votes as f64 / total_votes as f64 * 100.0;
            let seat_share = p.seats as f64 / total_seats as f64 * 100.0;
            (vote_share - seat_share).powi(2)
        })
        .sum();
    (0.5 * squares).sqrt()
}

// Returns the total number of votes.
fn checks(parties: &[Party], total_seats: u32) -> Result<u64, AllocationError> {
    if total_seats == 0 {
        return Err(AllocationError::DivisionByZero);
    }
    if parties.is_empty() {
        return Err(AllocationError::InvalidInput(
            "no party to apportion seats to".to_string(),
        ));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for p in parties.iter() {
        if !seen.insert(p.name.as_str()) {
            return Err(AllocationError::InvalidInput(format!(
                "party {:?} is listed more than once",
                p.name
            )));
        }
    }
    parties
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(p.votes))
        .ok_or_else(|| AllocationError::InvalidInput("total number of votes overflows".to_string()))
}

/// Whole-quota allocation, with the quota `total_votes / divisor` rounded down.
///
/// A floored quota may award more seats than available when there are few
/// votes per seat. In that case every party gets its exact Hare share
/// `votes * total_seats / total_votes`, rounded down, which always fits.
fn provisional_seats(
    parties: &[Party],
    total_votes: u64,
    divisor: SeatCount,
    total_seats: SeatCount,
) -> ProvisionalAllocation {
    let quota = total_votes / divisor;
    if quota == 0 {
        let votes: Vec<u64> = parties.iter().map(|p| p.votes).collect();
        return ProvisionalAllocation {
            seats: vec![0; parties.len()],
            awarded: 0,
            keys: votes.clone(),
            remainders: votes,
        };
    }
    let seats: Vec<SeatCount> = parties.iter().map(|p| p.votes / quota).collect();
    let awarded: SeatCount = seats.iter().sum();
    if awarded > total_seats {
        debug!(
            "provisional_seats: quota {:?} awards {:?} seats out of {:?}, using exact shares",
            quota, awarded, total_seats
        );
        return exact_shares(parties, total_votes, total_seats);
    }
    debug!(
        "provisional_seats: quota: {:?} awarded: {:?} / {:?}",
        quota, awarded, total_seats
    );
    let remainders: Vec<u64> = parties
        .iter()
        .zip(seats.iter())
        .map(|(p, s)| p.votes - s * quota)
        .collect();
    ProvisionalAllocation {
        seats,
        awarded,
        keys: remainders.clone(),
        remainders,
    }
}

// Requires total_votes > 0.
fn exact_shares(parties: &[Party], total_votes: u64, total_seats: SeatCount) -> ProvisionalAllocation {
    let votes_total = total_votes as u128;
    let seats_total = total_seats as u128;
    let mut seats: Vec<SeatCount> = Vec::with_capacity(parties.len());
    let mut keys: Vec<u64> = Vec::with_capacity(parties.len());
    let mut remainders: Vec<u64> = Vec::with_capacity(parties.len());
    for p in parties.iter() {
        let scaled = p.votes as u128 * seats_total;
        let key = scaled % votes_total;
        // Both bounded by the votes of the party.
        seats.push((scaled / votes_total) as SeatCount);
        keys.push(key as u64);
        remainders.push((key / seats_total) as u64);
    }
    let awarded: SeatCount = seats.iter().sum();
    ProvisionalAllocation {
        seats,
        awarded,
        keys,
        remainders,
    }
}

fn run_largest_remainder(
    parties: &[Party],
    total_votes: u64,
    total_seats: SeatCount,
    tiebreak: TieBreakMode,
) -> Vec<Party> {
    let prov = provisional_seats(parties, total_votes, total_seats, total_seats);

    // The ranking is computed once against the provisional seats.
    let mut ranking = tiebreak_order(parties, tiebreak);
    ranking.sort_by(|a, b| prov.keys[*b].cmp(&prov.keys[*a]));
    debug!("run_largest_remainder: ranking: {:?}", ranking);

    // More seats than parties can only remain with a zero quota, when there
    // are fewer votes than seats. The ranking is then cycled.
    let mut extra: Vec<SeatCount> = vec![0; parties.len()];
    let remaining = (total_seats - prov.awarded) as usize;
    for idx in ranking.iter().cycle().take(remaining) {
        extra[*idx] += 1;
    }

    assemble(parties, &prov, &extra)
}

fn run_hagenbach_bischoff(
    parties: &[Party],
    total_votes: u64,
    total_seats: SeatCount,
    tiebreak: TieBreakMode,
) -> Vec<Party> {
    let prov = provisional_seats(parties, total_votes, total_seats + 1, total_seats);
    let order = tiebreak_order(parties, tiebreak);

    let mut extra: Vec<SeatCount> = vec![0; parties.len()];
    for _ in prov.awarded..total_seats {
        let mut best: Option<usize> = None;
        for &idx in order.iter() {
            match best {
                Some(b) if !outranks(idx, b, &prov.keys, &extra) => {}
                _ => best = Some(idx),
            }
        }
        if let Some(idx) = best {
            extra[idx] += 1;
        }
    }

    assemble(parties, &prov, &extra)
}

// Compares key / (extra + 1) exactly. Equal averages go to the party with
// fewer extra seats.
fn outranks(a: usize, b: usize, keys: &[u64], extra: &[SeatCount]) -> bool {
    let lhs = keys[a] as u128 * (extra[b] as u128 + 1);
    let rhs = keys[b] as u128 * (extra[a] as u128 + 1);
    lhs > rhs || (lhs == rhs && extra[a] < extra[b])
}

fn assemble(parties: &[Party], prov: &ProvisionalAllocation, extra: &[SeatCount]) -> Vec<Party> {
    parties
        .iter()
        .enumerate()
        .map(|(idx, p)| Party {
            name: p.name.clone(),
            votes: p.votes,
            // Bounded by the total number of seats, which is a u32.
            seats: (prov.seats[idx] + extra[idx]) as u32,
            remainder: prov.remainders[idx],
            extra_seats: extra[idx] as u32,
        })
        .collect()
}

/// The order in which tied parties are served: the first index wins.
fn tiebreak_order(parties: &[Party], tiebreak: TieBreakMode) -> Vec<usize> {
    match tiebreak {
        TieBreakMode::UseInputOrder => (0..parties.len()).collect(),
        TieBreakMode::Random(seed) => {
            let res = party_permutation_crypto(parties, seed);
            debug!("tiebreak_order: random order with seed {}: {:?}", seed, res);
            res
        }
    }
}

/// Generates a "random" permutation of the parties. Random in this context means hard to guess in advance.
/// This uses a cryptographic hash that is resilient to collisions.
fn party_permutation_crypto(parties: &[Party], seed: u32) -> Vec<usize> {
    let mut data: Vec<(usize, String)> = parties
        .iter()
        .enumerate()
        .map(|(idx, p)| (idx, sha256::digest(format!("{:08}{}", seed, p.name))))
        .collect();
    data.sort_by(|a, b| a.1.cmp(&b.1));
    data.iter().map(|p| p.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(res: &[Party]) -> Vec<u32> {
        res.iter().map(|p| p.seats).collect()
    }

    #[test]
    fn overallocating_quota_falls_back_to_exact_shares() {
        // Quota 1 would award 5 seats out of 3.
        let parties = vec![Party::new("A", 3), Party::new("B", 2)];
        let prov = provisional_seats(&parties, 5, 3, 3);
        assert_eq!(prov.seats, vec![1, 1]);
        assert_eq!(prov.awarded, 2);
        // 9 = 1 * 5 + 4, 6 = 1 * 5 + 1
        assert_eq!(prov.keys, vec![4, 1]);
        assert_eq!(prov.remainders, vec![1, 0]);
    }

    #[test]
    fn exact_shares_leave_fewer_seats_than_parties() {
        let parties = vec![Party::new("A", 60), Party::new("B", 3)];
        let prov = provisional_seats(&parties, 63, 40, 40);
        assert_eq!(prov.seats, vec![38, 1]);
        assert_eq!(prov.keys, vec![6, 57]);
        let res = run_largest_remainder(&parties, 63, 40, TieBreakMode::UseInputOrder);
        assert_eq!(seats(&res), vec![38, 2]);
        assert!(res.iter().all(|p| p.extra_seats <= 1));
    }

    #[test]
    fn zero_quota_awards_nothing() {
        let parties = vec![Party::new("A", 1), Party::new("B", 0)];
        let prov = provisional_seats(&parties, 1, 3, 3);
        assert_eq!(prov.awarded, 0);
        assert_eq!(prov.remainders, vec![1, 0]);
        assert_eq!(prov.keys, vec![1, 0]);
    }

    #[test]
    fn larger_average_is_exact() {
        // 7 / 2 < 4 / 1
        assert!(!outranks(0, 1, &[7, 4], &[1, 0]));
        assert!(outranks(1, 0, &[7, 4], &[1, 0]));
        // 8 / 2 == 4 / 1: the party with fewer extra seats wins
        assert!(!outranks(0, 1, &[8, 4], &[1, 0]));
        assert!(outranks(1, 0, &[8, 4], &[1, 0]));
        // Full tie: neither outranks the other
        assert!(!outranks(0, 1, &[0, 0], &[0, 0]));
    }

    #[test]
    fn hagenbach_bischoff_without_votes_alternates() {
        let parties = vec![Party::new("A", 0), Party::new("B", 0)];
        let res = run_hagenbach_bischoff(&parties, 0, 5, TieBreakMode::UseInputOrder);
        assert_eq!(seats(&res), vec![3, 2]);
    }

    #[test]
    fn random_tiebreak_is_a_permutation() {
        let parties = vec![
            Party::new("A", 10),
            Party::new("B", 10),
            Party::new("C", 10),
        ];
        let mut order = party_permutation_crypto(&parties, 42);
        assert_eq!(order, party_permutation_crypto(&parties, 42));
        order.sort();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn random_tiebreak_only_affects_ties() {
        let parties = vec![
            Party::new("A", 400000),
            Party::new("B", 250000),
            Party::new("C", 100000),
            Party::new("D", 73000),
            Party::new("E", 5000),
        ];
        let rules = ApportionmentRules {
            method: ApportionmentMethod::LargestRemainder,
            tiebreak_mode: TieBreakMode::Random(7),
        };
        let res = apportion_with_rules(&parties, 5, &rules).unwrap();
        assert_eq!(seats(&res), vec![2, 2, 1, 0, 0]);
    }

    #[test]
    fn gallagher_index_of_exact_allocation() {
        let mut a = Party::new("A", 50);
        a.seats = 1;
        let mut b = Party::new("B", 50);
        b.seats = 1;
        assert!(gallagher_index(&[a, b]).abs() < 1e-12);
    }

    #[test]
    fn gallagher_index_of_winner_take_all() {
        let mut a = Party::new("A", 60);
        a.seats = 2;
        let b = Party::new("B", 40);
        // sqrt(0.5 * (40^2 + 40^2)) = 40
        assert!((gallagher_index(&[a, b]) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn gallagher_index_without_votes() {
        assert_eq!(gallagher_index(&[Party::new("A", 0)]), 0.0);
    }
}
