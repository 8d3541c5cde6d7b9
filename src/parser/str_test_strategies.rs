use proptest::prelude::*;


pub(crate) fn processor_strategy() -> impl Strategy<Value = Option<char>> {
    prop::option::of(prop_oneof![Just('<'), Just('>'), Just('+')])
}

pub(crate) fn dice_token_strategy() -> impl Strategy<Value = String> {
    (prop::option::of(1u16..=100), 1u16..=1000, processor_strategy())
        .prop_map(|(count, size, processor)| {
            let count = count.map(|c| c.to_string()).unwrap_or_default();
            let processor = processor.map(String::from).unwrap_or_default();
            format!("{count}d{size}{processor}")
        })
}

pub(crate) fn separator_strategy() -> impl Strategy<Value = String> {
    "[ ,]{1,3}"
}

pub(crate) fn dice_line_strategy() -> impl Strategy<Value = String> {
    (
        "[ ,\\t]{0,3}",
        prop::collection::vec((dice_token_strategy(), separator_strategy()), 1..8),
        "[ ,\\t]{0,3}"
    ).prop_map(|(lead, tokens, trail)| {
        let count = tokens.len();
        let body: String = tokens.into_iter()
            .enumerate()
            .map(|(i, (token, sep))| if i + 1 == count { token } else { format!("{token}{sep}") })
            .collect();

        format!("{lead}{body}{trail}")
    })
}
