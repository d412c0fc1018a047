use std::f64::consts::PI;

use log::debug;

use crate::config::{AllocationError, Party};
use crate::layout::Point;

/// Places `total_seats` markers on the upper half of a circle.
///
/// Seats are ordered from left to right, in screen coordinates (the y axis
/// points down), so that seat 0 is the leftmost one.
pub fn hemicycle(
    total_seats: usize,
    center: &Point,
    radius: f64,
) -> Result<Vec<Point>, AllocationError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(AllocationError::InvalidInput(format!(
            "hemicycle radius must be positive, got {}",
            radius
        )));
    }
    let n = total_seats as f64;
    Ok((0..total_seats)
        .map(|idx| {
            let angle = PI / n * (idx as f64 + n + 0.5);
            Point::new(
                radius * angle.cos() + center.x,
                radius * angle.sin() + center.y,
            )
        })
        .collect())
}

/// Assigns the parties to a fixed sequence of slots.
///
/// The parties are ranked by decreasing votes (ties keep the input order) and
/// each one fills as many consecutive slots as it has seats. The slots left
/// over are `None`.
pub fn assign_slots(parties: &[Party], slot_count: usize) -> Result<Vec<Option<String>>, AllocationError> {
    let total_seats: usize = parties.iter().map(|p| p.seats as usize).sum();
    if slot_count < total_seats {
        return Err(AllocationError::InvalidInput(format!(
            "{} slots cannot hold {} seats",
            slot_count, total_seats
        )));
    }
    let mut ranked: Vec<&Party> = parties.iter().collect();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));

    let mut slots: Vec<Option<String>> = Vec::with_capacity(slot_count);
    for p in ranked.iter() {
        for _ in 0..p.seats {
            slots.push(Some(p.name.clone()));
        }
    }
    debug!(
        "assign_slots: {} seats in {} slots",
        slots.len(),
        slot_count
    );
    slots.resize(slot_count, None);
    Ok(slots)
}
