use std::collections::HashMap;

use crate::config::Party;

/// Votes and seats of one party, summed over many entities.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyTotal {
    pub name: String,
    pub votes: u64,
    pub seats: u64,
}

/// The national tally, built once from the per-state results.
///
/// Parties are kept in order of first appearance.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NationalSummary {
    parties: Vec<PartyTotal>,
    total_votes: u64,
    total_seats: u64,
}

impl NationalSummary {
    pub fn from_results<'a, I>(results: I) -> NationalSummary
    where
        I: IntoIterator<Item = &'a [Party]>,
    {
        let (parties, _) = results.into_iter().flatten().fold(
            (Vec::<PartyTotal>::new(), HashMap::<String, usize>::new()),
            |(mut parties, mut index), p| {
                let found = index.get(&p.name).copied();
                match found {
                    Some(idx) => {
                        parties[idx].votes += p.votes;
                        parties[idx].seats += p.seats as u64;
                    }
                    None => {
                        index.insert(p.name.clone(), parties.len());
                        parties.push(PartyTotal {
                            name: p.name.clone(),
                            votes: p.votes,
                            seats: p.seats as u64,
                        });
                    }
                }
                (parties, index)
            },
        );
        NationalSummary {
            total_votes: parties.iter().map(|p| p.votes).sum(),
            total_seats: parties.iter().map(|p| p.seats).sum(),
            parties,
        }
    }

    pub fn parties(&self) -> &[PartyTotal] {
        &self.parties
    }

    pub fn get(&self, name: &str) -> Option<&PartyTotal> {
        self.parties.iter().find(|p| p.name == name)
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn total_seats(&self) -> u64 {
        self.total_seats
    }
}
