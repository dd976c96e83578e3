use proptest::prelude::*;
use textobjects::{
    AiType, Engine, Position, Region, SearchMethod, TextSource, TextobjectSpec, builtin,
    candidates, expand,
};

mod support;
use support::mock_buffer::MockBuffer;

// Bracket-heavy ASCII text so that most queries find something
fn ascii_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("".to_string()),
        "[()\\[\\]{}ab _,]{0,40}",
        "[()\\[\\]{}<>\"'ab _,\n]{0,80}",
        r"[a-z]{0,5}\([a-z, ]{0,10}\)[a-z]{0,5}",
    ]
}

// Includes multi-byte characters and combining marks
fn unicode_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ascii_text_strategy(),
        "[()\\[\\]\"'<>/a_,\n éü\u{301}\u{4E00}-\u{4E10}\u{1F600}-\u{1F610}]{0,60}",
    ]
}

fn id_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('('),
        Just(')'),
        Just(']'),
        Just('{'),
        Just('b'),
        Just('q'),
        Just('"'),
        Just('t'),
        Just('f'),
        Just('a'),
        Just('_'),
        Just(','),
    ]
}

fn method_strategy() -> impl Strategy<Value = SearchMethod> {
    prop_oneof![
        Just(SearchMethod::Cover),
        Just(SearchMethod::CoverOrNext),
        Just(SearchMethod::CoverOrPrev),
        Just(SearchMethod::CoverOrNearest),
        Just(SearchMethod::Next),
        Just(SearchMethod::Prev),
        Just(SearchMethod::Nearest),
    ]
}

fn ai_strategy() -> impl Strategy<Value = AiType> {
    prop_oneof![Just(AiType::Around), Just(AiType::Inside)]
}

/// A cursor on an existing character (or the start of an empty line).
fn cursor_in(buf: &MockBuffer, line_seed: u32, col_seed: u32) -> Position {
    let line = line_seed % buf.line_count().max(1) + 1;
    let len = buf.line(line).map_or(0, |l| l.len()) as u32;
    Position::new(line, col_seed % len.max(1) + 1)
}

proptest! {
    #[test]
    fn search_never_panics(
        text in unicode_text_strategy(),
        id in id_strategy(),
        ai_type in ai_strategy(),
        method in method_strategy(),
        line in 0u32..20,
        col in 0u32..100,
        n_times in 0u32..4,
    ) {
        let buf = MockBuffer::new(&text);
        let eng = Engine::new();
        // Cursor may be anywhere, including past the end of the buffer.
        let opts = eng
            .options(Position::new(line, col))
            .with_method(method)
            .with_n_times(n_times);

        let found = eng.find_textobject(&buf, ai_type, id, &opts);
        prop_assert!(found.is_ok(), "{found:?}");
    }

    #[test]
    fn cover_contains_cursor(
        text in ascii_text_strategy(),
        id in id_strategy(),
        line in 0u32..20,
        col in 0u32..100,
    ) {
        let buf = MockBuffer::new(&text);
        let eng = Engine::new();
        let cursor = cursor_in(&buf, line, col);
        let opts = eng.options(cursor).with_method(SearchMethod::Cover);

        if let Some(region) = eng.find_textobject(&buf, AiType::Around, id, &opts).unwrap() {
            let to = region.to.unwrap_or(region.from);
            prop_assert!(region.from <= cursor && cursor <= to, "{region:?} misses {cursor:?}");
        }
    }

    #[test]
    fn inner_lies_within_outer(
        text in unicode_text_strategy(),
        id in id_strategy(),
    ) {
        let Some(TextobjectSpec::Pattern(pattern)) = builtin(id).unwrap() else {
            unreachable!("built-in ids are patterns");
        };
        let patterns = expand(&pattern).unwrap();

        for candidate in candidates(&text, &patterns).unwrap() {
            prop_assert!(candidate.outer.start <= candidate.inner.start);
            prop_assert!(candidate.inner.start <= candidate.inner.end);
            prop_assert!(candidate.inner.end <= candidate.outer.end);
            prop_assert!(candidate.outer.end <= text.len());
        }
    }

    #[test]
    fn search_is_deterministic(
        text in ascii_text_strategy(),
        id in id_strategy(),
        ai_type in ai_strategy(),
        line in 0u32..20,
        col in 0u32..100,
    ) {
        let buf = MockBuffer::new(&text);
        let eng = Engine::new();
        let opts = eng.options(cursor_in(&buf, line, col));

        let first = eng.find_textobject(&buf, ai_type, id, &opts).unwrap();
        let second = eng.find_textobject(&buf, ai_type, id, &opts).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reselecting_never_returns_the_reference(
        text in ascii_text_strategy(),
        id in id_strategy(),
        method in method_strategy(),
        line in 0u32..20,
        col in 0u32..100,
    ) {
        let buf = MockBuffer::new(&text);
        let eng = Engine::new();
        let opts = eng.options(cursor_in(&buf, line, col)).with_method(method);

        if let Some(first) = eng.find_textobject(&buf, AiType::Around, id, &opts).unwrap() {
            let again = eng
                .find_textobject(&buf, AiType::Around, id, &opts.with_reference(first))
                .unwrap();
            prop_assert!(again.is_none_or(|r: Region| !r.same_extent(&first)));
        }
    }
}

#[test]
fn empty_buffer_finds_nothing() {
    let buf = MockBuffer::new("");
    let eng = Engine::new();
    let opts = eng.options(Position::ORIGIN);

    for id in ['(', ')', 'b', 'q', 't', 'f', 'a', '_'] {
        for ai_type in [AiType::Around, AiType::Inside] {
            assert_eq!(
                eng.find_textobject(&buf, ai_type, id, &opts).unwrap(),
                None,
                "textobject '{id}'"
            );
        }
    }
}

#[test]
fn every_builtin_expands() {
    for id in "()[]{}<>bq\"'`tfa_-.,;:!?*=/\\| ".chars() {
        let spec = builtin(id).unwrap();
        let Some(TextobjectSpec::Pattern(pattern)) = spec else {
            panic!("no pattern for '{id}'");
        };
        assert!(!expand(&pattern).unwrap().is_empty(), "textobject '{id}'");
    }
    assert!(builtin('z').unwrap().is_none());
}
