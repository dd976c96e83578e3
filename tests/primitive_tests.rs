use textobjects::{Atom, Error, Span, find};

fn span(start: usize, end: usize) -> Span {
    Span::new(start, end)
}

#[test]
fn balanced_finds_shortest_balanced_run() {
    let atom = Atom::balanced('(', ')');
    let text = "(a(b)c)";

    assert_eq!(find(text, &atom, 0).unwrap(), Some(span(0, 7)));
    assert_eq!(find(text, &atom, 1).unwrap(), Some(span(2, 5)));
    assert_eq!(find(text, &atom, 5).unwrap(), None);
}

#[test]
fn balanced_skips_unclosed_open() {
    let atom = Atom::balanced('(', ')');
    assert_eq!(find("((a)", &atom, 0).unwrap(), Some(span(1, 4)));
    assert_eq!(find("(((", &atom, 0).unwrap(), None);
}

#[test]
fn minimal_width_prefers_latest_left() {
    let atom = Atom::minimal_width("a", "b");
    assert_eq!(find("a a b", &atom, 0).unwrap(), Some(span(2, 5)));

    let atom = Atom::minimal_width("<<", ">>");
    assert_eq!(find("x << y >> z", &atom, 0).unwrap(), Some(span(2, 9)));
}

#[test]
fn quoted_pairs_left_to_right() {
    let atom = Atom::quoted('"');
    let text = r#"a "b" c "d""#;

    assert_eq!(find(text, &atom, 0).unwrap(), Some(span(2, 5)));
    assert_eq!(find(text, &atom, 5).unwrap(), Some(span(8, 11)));
    assert_eq!(find(text, &atom, 9).unwrap(), None);
}

#[test]
fn literal_anchor_is_haystack_start() {
    let atom = Atom::literal("^x").unwrap();
    assert_eq!(find("xx", &atom, 0).unwrap(), Some(span(0, 1)));
    assert_eq!(find("xx", &atom, 1).unwrap(), None);
}

#[test]
fn invalid_literal_is_reported() {
    let err = Atom::literal("(unclosed").unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn init_out_of_range_finds_nothing() {
    let atom = Atom::balanced('(', ')');
    assert_eq!(find("()", &atom, 3).unwrap(), None);
    // Inside a multi-byte character.
    assert_eq!(find("é()", &atom, 1).unwrap(), None);
}

#[test]
fn custom_finder_must_not_go_backwards() {
    let atom = Atom::custom(|_, _| Some(Span::new(0, 1)));

    assert_eq!(find("abc", &atom, 0).unwrap(), Some(span(0, 1)));
    assert_eq!(
        find("abc", &atom, 2).unwrap_err(),
        Error::NonProgressing {
            init: 2,
            start: 0,
            end: 1,
            len: 3
        }
    );
}

#[test]
fn custom_finder_must_stay_in_text() {
    let atom = Atom::custom(|text, init| Some(Span::new(init, text.len() + 1)));
    assert!(matches!(
        find("abc", &atom, 0),
        Err(Error::NonProgressing { end: 4, .. })
    ));
}

#[test]
fn multibyte_offsets_are_bytes() {
    let atom = Atom::balanced('(', ')');
    assert_eq!(find("é(ü)", &atom, 0).unwrap(), Some(span(2, 6)));
}

#[test]
fn capture_marks_count_groups() {
    assert_eq!(Atom::literal("x()x()x").unwrap().capture_marks(), 2);
    assert_eq!(Atom::literal("x").unwrap().capture_marks(), 0);
    assert_eq!(Atom::balanced('[', ']').capture_marks(), 0);
}

#[test]
fn only_empty_groups_are_marks() {
    assert_eq!(Atom::literal(r"^(\w+)=(\w+)$").unwrap().capture_marks(), 0);
    assert_eq!(Atom::literal(r"(\w+)=()(\w+)()").unwrap().capture_marks(), 2);
    assert_eq!(Atom::literal(r"(?P<key>\w+)()=()").unwrap().capture_marks(), 2);
    // Escaped and bracketed parentheses are not groups.
    assert_eq!(Atom::literal(r"\(()[()]*()\)").unwrap().capture_marks(), 2);
    assert_eq!(Atom::literal(r"(?s)(?:a)()b()").unwrap().capture_marks(), 2);
}
