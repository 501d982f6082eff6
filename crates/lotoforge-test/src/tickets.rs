//! Ticket builders.

use lotoforge_core::{NumberMask, Ticket, MAX_NUMBER, TICKET_SIZE};

/// Builds a ticket, panicking on invalid input.
pub fn ticket(numbers: &[u8]) -> Ticket {
    Ticket::new(numbers.iter().copied()).expect("fixture ticket must be valid")
}

/// `1..=15`: the lowest possible sum (120).
pub fn low_ticket() -> Ticket {
    ticket(&(1..=15).collect::<Vec<u8>>())
}

/// `11..=25`: the highest possible sum (270).
pub fn high_ticket() -> Ticket {
    ticket(&(11..=25).collect::<Vec<u8>>())
}

/// A ticket sharing exactly `shared` numbers with `base`.
///
/// Keeps the `shared` smallest members of `base` and fills up with the
/// smallest numbers outside it. Two 15-of-25 selections always share at
/// least 5 numbers, so `shared` must be in `5..=15`.
pub fn ticket_sharing(base: &Ticket, shared: usize) -> Ticket {
    assert!(
        (TICKET_SIZE - (MAX_NUMBER as usize - TICKET_SIZE)..=TICKET_SIZE).contains(&shared),
        "shared count {shared} is impossible"
    );
    let kept = base.numbers().iter().copied().take(shared);
    let outside = (1..=MAX_NUMBER)
        .filter(|n| !base.contains(*n))
        .take(TICKET_SIZE - shared);
    let mask = NumberMask::from_numbers(kept.chain(outside)).expect("distinct by construction");
    Ticket::from_mask(mask).expect("fifteen members by construction")
}
