//! Apportionment among alliances of lists (apparentments).
//!
//! Seats are first apportioned among the top-level contenders. Each contender
//! that won seats then shares them among its own members, with the same
//! rules, down to the leaves.

use log::debug;

use crate::{apportion_with_rules, AllocationError, ApportionmentRules, Party};

/// A contender at some level of the alliance tree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Contender {
    pub name: String,
    pub votes: u64,
    pub members: Vec<Contender>,
}

impl Contender {
    /// A leaf: a list that receives votes directly.
    pub fn list(name: &str, votes: u64) -> Contender {
        Contender {
            name: name.to_string(),
            votes,
            members: Vec::new(),
        }
    }

    /// A group, whose votes are the sum of its members' votes.
    pub fn group(name: &str, members: Vec<Contender>) -> Contender {
        Contender {
            name: name.to_string(),
            votes: members.iter().map(|m| m.votes).sum(),
            members,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NestedAllocation {
    pub name: String,
    pub votes: u64,
    pub seats: u32,
    pub members: Vec<NestedAllocation>,
}

pub fn apportion_nested(
    contenders: &[Contender],
    total_seats: u32,
    rules: &ApportionmentRules,
) -> Result<Vec<NestedAllocation>, AllocationError> {
    let parties: Vec<Party> = contenders
        .iter()
        .map(|c| Party::new(&c.name, c.votes))
        .collect();
    let allocated = apportion_with_rules(&parties, total_seats, rules)?;

    let mut res: Vec<NestedAllocation> = Vec::new();
    for (c, p) in contenders.iter().zip(allocated.iter()) {
        let members = if c.members.is_empty() {
            Vec::new()
        } else if p.seats == 0 {
            unseated(&c.members)
        } else {
            debug!(
                "apportion_nested: sharing {} seats of {:?} among {} members",
                p.seats,
                c.name,
                c.members.len()
            );
            apportion_nested(&c.members, p.seats, rules)?
        };
        res.push(NestedAllocation {
            name: c.name.clone(),
            votes: c.votes,
            seats: p.seats,
            members,
        });
    }
    Ok(res)
}

fn unseated(contenders: &[Contender]) -> Vec<NestedAllocation> {
    contenders
        .iter()
        .map(|c| NestedAllocation {
            name: c.name.clone(),
            votes: c.votes,
            seats: 0,
            members: unseated(&c.members),
        })
        .collect()
}
