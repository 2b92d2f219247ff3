use flipcounter_core::{diff, initial_layout, to_digits, SlotOp, Transition};

/// Minimal structural model of the rendered display: digit slots by
/// position plus the set of separator positions.
#[derive(Debug, Default, PartialEq)]
struct SlotModel {
    digits: Vec<u8>,
    separators: Vec<usize>,
}

impl SlotModel {
    fn from_value(n: u64) -> Self {
        let mut model = Self::default();
        for op in initial_layout(&to_digits(n)) {
            model.apply(op);
        }
        model
    }

    fn apply(&mut self, op: SlotOp) {
        match op {
            SlotOp::AddSlot { position, digit } => {
                assert_eq!(position, self.digits.len(), "slots grow lowest first");
                self.digits.push(digit);
            }
            SlotOp::RemoveSlot { position } => {
                assert_eq!(position + 1, self.digits.len(), "slots shrink highest first");
                self.digits.pop();
            }
            SlotOp::InsertSeparator { position } => self.separators.push(position),
            SlotOp::RemoveSeparator { position } => {
                let idx = self
                    .separators
                    .iter()
                    .position(|p| *p == position)
                    .expect("removing a separator that exists");
                self.separators.remove(idx);
            }
        }
    }

    fn transition(&mut self, t: Transition) {
        assert_eq!(self.digits[t.position], t.from);
        self.digits[t.position] = t.to;
    }
}

const VALUES: &[u64] = &[
    0, 1, 5, 9, 10, 42, 99, 100, 105, 999, 1000, 1234, 9999, 10000, 123456, 999999, 1000000,
];

/// it should transform any slot model into the target layout when its diff
/// is applied structurally and per-slot
#[test]
fn diff_applied_to_model_reaches_target() {
    for &a in VALUES {
        for &b in VALUES {
            let mut model = SlotModel::from_value(a);
            let d = diff(&to_digits(a), &to_digits(b));
            for op in d.structural {
                model.apply(op);
            }
            for t in d.transitions {
                model.transition(t);
            }
            assert_eq!(model, SlotModel::from_value(b), "{a} -> {b}");
        }
    }
}

#[test]
fn zero_to_105_adds_two_slots_and_flips_the_low_digit() {
    let d = diff(&to_digits(0), &to_digits(105));
    assert_eq!(
        d.structural,
        vec![
            SlotOp::AddSlot {
                position: 1,
                digit: 0
            },
            SlotOp::AddSlot {
                position: 2,
                digit: 1
            },
        ]
    );
    assert_eq!(
        d.transitions,
        vec![Transition {
            position: 0,
            from: 0,
            to: 5
        }]
    );
}

#[test]
fn crossing_a_thousand_inserts_the_separator_first() {
    let d = diff(&to_digits(999), &to_digits(1000));
    assert_eq!(
        d.structural,
        vec![
            SlotOp::InsertSeparator { position: 3 },
            SlotOp::AddSlot {
                position: 3,
                digit: 1
            },
        ]
    );
    assert_eq!(d.transitions.len(), 3);
    assert!(d.transitions.iter().all(|t| t.from == 9 && t.to == 0));
}

#[test]
fn dropping_below_a_thousand_removes_the_dangling_separator() {
    let d = diff(&to_digits(1000), &to_digits(999));
    assert_eq!(
        d.structural,
        vec![
            SlotOp::RemoveSlot { position: 3 },
            SlotOp::RemoveSeparator { position: 3 },
        ]
    );
    assert_eq!(d.transitions.len(), 3);
    assert!(d.transitions.iter().all(|t| t.from == 0 && t.to == 9));
}

#[test]
fn multi_slot_shrink_removes_highest_first() {
    let d = diff(&to_digits(12345), &to_digits(7));
    let removed: Vec<_> = d
        .structural
        .iter()
        .filter_map(|op| match op {
            SlotOp::RemoveSlot { position } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(removed, vec![4, 3, 2, 1]);
}

#[test]
fn equal_values_diff_to_nothing() {
    for &n in VALUES {
        assert!(diff(&to_digits(n), &to_digits(n)).is_empty());
    }
}

#[test]
fn separators_group_by_three() {
    let model = SlotModel::from_value(1_000_000);
    assert_eq!(model.digits.len(), 7);
    assert_eq!(model.separators, vec![3, 6]);

    // Exactly three digits: no separator above the top digit.
    assert!(SlotModel::from_value(999).separators.is_empty());
}
