//! Tests for the domain model.

use super::*;
use crate::error::LotoError;

/// Small deterministic generator so the mask tests cover many bit patterns.
fn xorshift(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

fn naive_intersection(a: &[u8], b: &[u8]) -> u32 {
    a.iter().filter(|n| b.contains(n)).count() as u32
}

#[test]
fn test_intersect_count_matches_set_intersection() {
    let mut state = 0x9E37_79B9;
    let mut masks = vec![NumberMask::EMPTY, NumberMask::FULL];
    for _ in 0..200 {
        masks.push(NumberMask::from_bits_truncate(xorshift(&mut state)));
    }

    for a in &masks {
        for b in &masks {
            assert_eq!(
                a.intersect_count(*b),
                naive_intersection(&a.numbers(), &b.numbers()),
                "{a:?} & {b:?}"
            );
        }
    }
}

#[test]
fn test_mask_round_trip() {
    let mut state = 12345;
    let mut checked = 0;
    while checked < 100 {
        let mask = NumberMask::from_bits_truncate(xorshift(&mut state));
        if mask.len() as usize != TICKET_SIZE {
            continue;
        }
        let rebuilt = NumberMask::from_numbers(mask.numbers()).unwrap();
        assert_eq!(rebuilt, mask);
        checked += 1;
    }
}

#[test]
fn test_mask_rejects_bad_numbers() {
    assert_eq!(
        NumberMask::from_numbers([0]),
        Err(LotoError::NumberOutOfRange(0))
    );
    assert_eq!(
        NumberMask::from_numbers([26]),
        Err(LotoError::NumberOutOfRange(26))
    );
    assert_eq!(
        NumberMask::from_numbers([4, 5, 4]),
        Err(LotoError::DuplicateNumber(4))
    );
}

#[test]
fn test_mask_above() {
    assert_eq!(NumberMask::above(0), NumberMask::FULL);
    assert_eq!(NumberMask::above(24).numbers(), vec![25]);
    assert_eq!(NumberMask::above(25), NumberMask::EMPTY);
    assert_eq!(NumberMask::above(20).len(), 5);
}

#[test]
fn test_mask_display() {
    let mask = NumberMask::of(&[1, 7, 25]);
    assert_eq!(mask.to_string(), "01 07 25");
    assert_eq!(mask.sum(), 33);
}

#[test]
fn test_runs_of_at_least() {
    assert_eq!(NumberMask::EMPTY.runs_of_at_least(3), 0);
    assert_eq!(NumberMask::of(&[1, 2, 4, 5, 7]).runs_of_at_least(3), 0);
    assert_eq!(
        NumberMask::of(&[1, 2, 3, 5, 6, 7, 8, 10, 11]).runs_of_at_least(3),
        2
    );
    assert_eq!(NumberMask::of(&[23, 24, 25]).runs_of_at_least(3), 1);
    assert_eq!(NumberMask::FULL.runs_of_at_least(3), 1);
}

#[test]
fn test_ticket_validation() {
    assert_eq!(
        Ticket::new(1..=14),
        Err(LotoError::WrongCardinality {
            expected: 15,
            actual: 14
        })
    );
    assert_eq!(
        Ticket::new(1..=16),
        Err(LotoError::WrongCardinality {
            expected: 15,
            actual: 16
        })
    );
    assert!(Ticket::from_mask(NumberMask::FULL).is_err());
}

#[test]
fn test_ticket_equality_ignores_order() {
    let a = Ticket::new([25, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 2, 4]).unwrap();
    let b = Ticket::new([1, 2, 3, 4, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.numbers()[14], 25);
    assert_eq!(a.shared_with(b.mask()), 15);
}

#[test]
fn test_full_range_extremes() {
    let lowest = Ticket::new(1..=15).unwrap();
    let highest = Ticket::new(11..=25).unwrap();

    assert_eq!(ConstraintType::Sum.measure(lowest.mask(), None), 120);
    assert_eq!(ConstraintType::Sum.measure(highest.mask(), None), 270);
    assert_eq!(ConstraintType::Sum.full_range().min(), 120);
    assert_eq!(ConstraintType::Sum.full_range().max(), 270);

    let odds_first = Ticket::new([1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25, 2, 4]).unwrap();
    assert_eq!(
        ConstraintType::Evens.measure(odds_first.mask(), None),
        ConstraintType::Evens.full_range().min()
    );
}

#[test]
fn test_measure_low_ticket() {
    let mask = Ticket::new(1..=15).unwrap().mask();
    let metrics = GeneratedMetrics::measure(mask, None);

    assert_eq!(metrics.get(ConstraintType::Sum), 120);
    assert_eq!(metrics.get(ConstraintType::Evens), 7);
    assert_eq!(metrics.get(ConstraintType::Primes), 6);
    assert_eq!(metrics.get(ConstraintType::Fibonacci), 6);
    assert_eq!(metrics.get(ConstraintType::Frame), 9);
    assert_eq!(metrics.get(ConstraintType::Sequences), 1);
    assert_eq!(metrics.get(ConstraintType::MultiplesOfThree), 5);
    assert_eq!(metrics.get(ConstraintType::Center), 6);
    assert_eq!(metrics.get(ConstraintType::Repeats), 0);
    assert!(!metrics.has_reference());
}

#[test]
fn test_measure_repeats_with_reference() {
    let ticket = Ticket::new(1..=15).unwrap();
    let reference = Ticket::new(6..=20).unwrap();
    let metrics = GeneratedMetrics::measure(ticket.mask(), Some(reference.mask()));

    assert_eq!(metrics.get(ConstraintType::Repeats), 10);
    assert!(metrics.has_reference());
}

#[test]
fn test_member_masks_are_disjoint_from_measure_special_cases() {
    assert!(ConstraintType::Sum.member_mask().is_none());
    assert!(ConstraintType::Sequences.member_mask().is_none());
    assert!(ConstraintType::Repeats.member_mask().is_none());
    assert_eq!(FRAME_NUMBERS.len() + CENTER_NUMBERS.len(), 25);
    assert_eq!(FRAME_NUMBERS.intersect_count(CENTER_NUMBERS), 0);
}

#[test]
fn test_constraint_type_from_str() {
    assert_eq!(
        "multiples_of_three".parse::<ConstraintType>(),
        Ok(ConstraintType::MultiplesOfThree)
    );
    assert_eq!("SUM".parse::<ConstraintType>(), Ok(ConstraintType::Sum));
    assert!(matches!(
        "odds".parse::<ConstraintType>(),
        Err(LotoError::UnknownConstraint(_))
    ));
    for (i, t) in ConstraintType::ALL.iter().enumerate() {
        assert_eq!(t.index(), i);
    }
}

#[test]
fn test_number_range() {
    assert!(NumberRange::new(5, 4).is_err());

    let range = NumberRange::new(7, 9).unwrap();
    assert!(range.contains(7));
    assert!(range.contains(9));
    assert!(!range.contains(10));
    assert_eq!(range.distance(4), 3);
    assert_eq!(range.distance(8), 0);
    assert_eq!(range.distance(12), 3);
    assert!(range.overlaps(9, 20));
    assert!(!range.overlaps(10, 20));
    assert!(!range.overlaps(0, 6));
}

#[test]
fn test_draw_history_orders_and_measures_repeats() {
    let history = DrawHistory::from_results(vec![
        (3u32, (11..=25).collect::<Vec<u8>>()),
        (1, (1..=15).collect()),
        (2, (6..=20).collect()),
    ])
    .unwrap();

    let contests: Vec<u32> = history.draws().iter().map(Draw::contest).collect();
    assert_eq!(contests, vec![3, 2, 1]);

    // 11..=25 vs 6..=20 share 11..=20
    assert_eq!(history.draws()[0].stats().get(ConstraintType::Repeats), 10);
    assert_eq!(history.draws()[1].stats().get(ConstraintType::Repeats), 10);
    assert!(!history.draws()[2].stats().has_reference());

    assert_eq!(history.window(2).len(), 2);
    assert_eq!(history.window(10).len(), 3);
    assert_eq!(history.last_draw().map(Draw::contest), Some(3));
}

#[test]
fn test_draw_history_rejects_duplicate_contest() {
    let result = DrawHistory::from_results(vec![
        (7u32, (1..=15).collect::<Vec<u8>>()),
        (7, (6..=20).collect()),
    ]);
    assert_eq!(result, Err(LotoError::DuplicateContest(7)));
}

#[test]
fn test_filter_state_constructors() {
    let off = FilterState::disabled(ConstraintType::Primes);
    assert!(!off.enabled);
    assert_eq!(off.range, ConstraintType::Primes.full_range());

    let ideal = FilterState::ideal(ConstraintType::Frame);
    assert!(ideal.enabled);
    assert_eq!(ideal.range, ConstraintType::Frame.ideal_range());
}
