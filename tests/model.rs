use logical_ring::{Buffer, Iter, Position, RingBuf, SyncBuf};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append(u32),
    // distance back from the write frontier
    Drop(i64),
    Read(i64),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u32>().prop_map(Op::Append),
        1 => (-2i64..12).prop_map(Op::Drop),
        2 => (-2i64..12).prop_map(Op::Read),
    ]
}

fn any_start() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(0),
        Just(-1),
        Just(Position::MAX - 5),
        Just(Position::MIN),
        any::<Position>(),
    ]
}

/// Unbounded reference: every item ever appended, indexed by offset from the first
/// position.
struct Model {
    cap: i64,
    items: Vec<u32>,
    dropped: i64,
}

impl Model {
    fn new(cap: usize) -> Self {
        Self {
            cap: cap as i64,
            items: Vec::new(),
            dropped: -1,
        }
    }

    fn frontier(&self) -> i64 {
        self.items.len() as i64
    }

    fn append(&mut self, item: u32) -> bool {
        if self.frontier() - self.dropped - 1 >= self.cap {
            return false;
        }
        self.items.push(item);
        true
    }

    fn drop_until(&mut self, offset: i64) -> bool {
        if offset >= self.frontier() {
            return false;
        }
        self.dropped = self.dropped.max(offset);
        true
    }

    fn read(&self, offset: i64) -> Option<Vec<u32>> {
        let frontier = self.frontier();
        if offset > frontier || offset < frontier - self.cap {
            return None;
        }
        // slots never written still hold the default value
        let items = (offset..frontier)
            .map(|p| if p < 0 { 0 } else { self.items[p as usize] })
            .collect();
        Some(items)
    }
}

fn at(start: Position, offset: i64) -> Position {
    start.wrapping_add(offset as Position)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ring_matches_model(
        cap in 1usize..8,
        start in any_start(),
        ops in prop::collection::vec(any_op(), 0..96),
    ) {
        let mut buf = RingBuf::<u32>::starting_at(cap, start);
        let mut model = Model::new(cap);

        for op in ops {
            match op {
                Op::Append(item) => {
                    prop_assert_eq!(buf.append(item).is_ok(), model.append(item));
                }
                Op::Drop(back) => {
                    let offset = model.frontier() - back;
                    prop_assert_eq!(
                        buf.drop_until(at(start, offset)).is_ok(),
                        model.drop_until(offset)
                    );
                }
                Op::Read(back) => {
                    let offset = model.frontier() - back;
                    let expected = model.read(offset);
                    prop_assert_eq!(buf.to_vec(at(start, offset)).ok(), expected.clone());
                    prop_assert_eq!(
                        buf.iter(at(start, offset)).ok().map(Iter::into_vec),
                        expected
                    );
                }
            }
            prop_assert_eq!(buf.frontier(), at(start, model.frontier()));
            prop_assert_eq!(buf.len() as i64, model.frontier() - model.dropped - 1);
        }
    }

    #[test]
    fn sync_wrapper_is_transparent(
        cap in 1usize..8,
        start in any_start(),
        ops in prop::collection::vec(any_op(), 0..64),
    ) {
        let mut plain = RingBuf::<u32>::starting_at(cap, start);
        let wrapped = SyncBuf::new(RingBuf::<u32>::starting_at(cap, start));

        for op in ops {
            let frontier = plain.frontier();
            match op {
                Op::Append(item) => {
                    prop_assert_eq!(plain.append(item), wrapped.append(item));
                }
                Op::Drop(back) => {
                    let position = frontier.wrapping_sub(back as Position);
                    prop_assert_eq!(plain.drop_until(position), wrapped.drop_until(position));
                }
                Op::Read(back) => {
                    let position = frontier.wrapping_sub(back as Position);
                    prop_assert_eq!(plain.to_vec(position), wrapped.to_vec(position));
                    prop_assert_eq!(
                        plain.iter(position).map(Iter::into_vec),
                        wrapped.iter(position).map(Iter::into_vec)
                    );
                }
            }
        }
    }
}
