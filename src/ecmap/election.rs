use std::collections::{HashMap, HashSet};

use apportionment::Party;
use log::{debug, warn};

use crate::ecmap::config_reader::SourceSettings;
use crate::ecmap::electors::electors;

/// One row of the vote database: the votes of a candidate on one party line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ListRecord {
    pub year: String,
    pub state: String,
    pub candidate: String,
    pub party: String,
    pub votes: u64,
}

/// The contest of one state in one year, ready to be apportioned.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    pub year: String,
    pub state: String,
    pub total_seats: u32,
    /// In tie-break order. The seats are not filled yet.
    pub parties: Vec<Party>,
    /// The seats found in the input, if any, for comparison.
    pub stored_seats: Option<Vec<u32>>,
}

impl Election {
    pub fn name(&self) -> String {
        format!("{} {}", self.state, self.year)
    }
}

/// Groups the database rows into elections, in order of first appearance.
pub fn build_elections(
    lists: &[ListRecord],
    source: &SourceSettings,
    default_electors: u32,
) -> Vec<Election> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String), Vec<&ListRecord>> = HashMap::new();
    for l in lists.iter() {
        let key = (l.state.clone(), l.year.clone());
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().push(l);
    }

    let mut res: Vec<Election> = Vec::new();
    for key in order.iter() {
        let (state, year) = key;
        let state_lists = match grouped.get(key) {
            Some(x) => x,
            None => continue,
        };
        let total_seats = year
            .parse::<i32>()
            .ok()
            .and_then(|y| electors(state, y))
            .unwrap_or_else(|| {
                warn!(
                    "No elector count for {} {}, using {}",
                    state, year, default_electors
                );
                default_electors
            });
        let parties = nominees(state_lists, source);
        debug!(
            "build_elections: {} {}: {} seats, parties: {:?}",
            state, year, total_seats, parties
        );
        res.push(Election {
            year: year.clone(),
            state: state.clone(),
            total_seats,
            parties,
            stored_seats: None,
        });
    }
    res
}

/// The votes of each candidate, summed over all its lines, under the name of
/// its strongest party line.
fn nominees(lists: &[&ListRecord], source: &SourceSettings) -> Vec<Party> {
    let invalid = source.invalid_label();
    let independent = source.independent_label();

    let mut candidates: Vec<&str> = Vec::new();
    let mut votes: HashMap<&str, u64> = HashMap::new();
    // The strongest line of each candidate: (votes, party)
    let mut strongest: HashMap<&str, (u64, &str)> = HashMap::new();
    for l in lists.iter().filter(|l| l.candidate != invalid) {
        let c = l.candidate.as_str();
        match votes.get_mut(c) {
            Some(v) => *v += l.votes,
            None => {
                candidates.push(c);
                votes.insert(c, l.votes);
            }
        }
        let best = strongest.entry(c).or_insert((l.votes, l.party.as_str()));
        if l.votes > best.0 {
            *best = (l.votes, l.party.as_str());
        }
    }

    let mut taken: HashSet<String> = HashSet::new();
    let mut res: Vec<Party> = Vec::new();
    for c in candidates {
        let party = strongest.get(c).map(|(_, p)| *p).unwrap_or(c);
        let mut name = if party == independent {
            format!("{} - {}", independent, c)
        } else {
            party.to_string()
        };
        // Two candidates may share their strongest line.
        if taken.contains(&name) {
            name = format!("{} - {}", party, c);
        }
        taken.insert(name.clone());
        res.push(Party::new(&name, votes.get(c).copied().unwrap_or(0)));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(state: &str, year: &str, candidate: &str, party: &str, votes: u64) -> ListRecord {
        ListRecord {
            year: year.to_string(),
            state: state.to_string(),
            candidate: candidate.to_string(),
            party: party.to_string(),
            votes,
        }
    }

    fn names(e: &Election) -> Vec<(&str, u64)> {
        e.parties.iter().map(|p| (p.name.as_str(), p.votes)).collect()
    }

    #[test]
    fn candidates_take_their_strongest_line() {
        let lists = vec![
            list("New York", "2016", "Clinton", "Democratic", 4143874),
            list("New York", "2016", "Trump", "Republican", 2527141),
            list("New York", "2016", "Clinton", "Working Families", 140041),
            list("New York", "2016", "Trump", "Conservative", 292393),
            list("New York", "2016", "Void", "Invalid", 12),
            list("New York", "2016", "Invalid", "Blank", 5000),
        ];
        let res = build_elections(&lists, &SourceSettings::default(), 10);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].total_seats, 29);
        assert_eq!(
            names(&res[0]),
            vec![
                ("Democratic", 4283915),
                ("Republican", 2819534),
                ("Invalid", 12)
            ]
        );
    }

    #[test]
    fn independents_are_named_after_the_candidate() {
        let lists = vec![
            list("Utah", "2016", "McMullin", "Independent", 243690),
            list("Utah", "2016", "Trump", "Republican", 515231),
        ];
        let res = build_elections(&lists, &SourceSettings::default(), 10);
        assert_eq!(
            names(&res[0]),
            vec![("Independent - McMullin", 243690), ("Republican", 515231)]
        );
    }

    #[test]
    fn shared_lines_are_disambiguated() {
        let lists = vec![
            list("Ohio", "1980", "A", "Other", 10),
            list("Ohio", "1980", "B", "Other", 5),
        ];
        let res = build_elections(&lists, &SourceSettings::default(), 10);
        assert_eq!(names(&res[0]), vec![("Other", 10), ("Other - B", 5)]);
    }

    #[test]
    fn elections_in_first_seen_order() {
        let lists = vec![
            list("Ohio", "1980", "A", "X", 10),
            list("Iowa", "1980", "A", "X", 10),
            list("Ohio", "1984", "A", "X", 10),
            list("Ohio", "1980", "B", "Y", 10),
            list("Atlantis", "1980", "B", "Y", 10),
        ];
        let res = build_elections(&lists, &SourceSettings::default(), 7);
        let keys: Vec<String> = res.iter().map(|e| e.name()).collect();
        assert_eq!(keys, vec!["Ohio 1980", "Iowa 1980", "Ohio 1984", "Atlantis 1980"]);
        assert_eq!(res[0].parties.len(), 2);
        assert_eq!(res[0].total_seats, 25);
        assert_eq!(res[3].total_seats, 7);
    }
}
