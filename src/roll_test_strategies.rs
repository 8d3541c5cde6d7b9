use proptest::prelude::*;
use crate::roll::Roll;


pub(crate) fn roll_strategy() -> impl Strategy<Value = Roll> {
    (1..=100u16, 1..=100u16)
        .prop_map(|(size, count)| Roll::builder(size).count(count).build().unwrap())
}

pub(crate) fn rolls_strategy() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1..=100u16, 1..30)
}
