// tests/grammar_tests.rs
//
// End-to-end grammars over realistic record-style inputs: labeled number
// rows, nested comma/semicolon records, and a recursive grammar built
// through shared references.

use pretty_assertions::assert_eq;

use weft::grammar::{
    adjacent, any_char, ch, end_of_input, first_of, literal, opt_ws, reference, sep_by, sequence,
    shared, take_many1, take_many_until1, take_n, uint, ws, Parser,
};
use weft::runner::parse;
use weft::{Out, SourceContext};

// === Labeled number rows ===
//
//   Time:      7  15   30
//   Distance:  9  40  200

fn labeled_row(label: &str) -> Parser {
    sequence(vec![
        adjacent(None, literal(label), Some(ws())),
        take_many1(adjacent(None, uint(), Some(ws()))),
    ])
}

fn row_values(row: &Out) -> Vec<u64> {
    row.get(1)
        .expect("row has a number list")
        .iter()
        .filter_map(Out::as_u64)
        .collect()
}

#[test]
fn labeled_rows_parse_into_number_lists() {
    let text = "Time:      7  15   30\nDistance:  9  40  200\n";
    let ctx = SourceContext::from_input("races", text);
    let grammar = sequence(vec![labeled_row("Time:"), labeled_row("Distance:")]);

    let out = parse(&ctx, &grammar).unwrap();
    assert_eq!(row_values(out.get(0).unwrap()), vec![7, 15, 30]);
    assert_eq!(row_values(out.get(1).unwrap()), vec![9, 40, 200]);
}

#[test]
fn labeled_rows_report_a_bad_label_with_its_position() {
    let text = "Time:      7  15   30\nDustance:  9  40  200\n";
    let ctx = SourceContext::from_input("races", text);
    let grammar = sequence(vec![labeled_row("Time:"), labeled_row("Distance:")]);

    let err = parse(&ctx, &grammar).unwrap_err();
    assert_eq!(err.position().line, 1);
}

// === Nested comma/semicolon records ===
//
//   Game 1: 3 blue, 4 red; 1 red, 2 green
//   Game 2: 1 green, 1 blue

fn color() -> Parser {
    first_of(vec![literal("red"), literal("green"), literal("blue")])
}

fn draw() -> Parser {
    sep_by(
        ch(','),
        sequence(vec![
            adjacent(Some(opt_ws()), uint(), None),
            adjacent(Some(opt_ws()), color(), Some(opt_ws())),
        ]),
    )
}

fn game() -> Parser {
    sequence(vec![
        literal("Game"),
        adjacent(Some(opt_ws()), uint(), None),
        ch(':'),
        adjacent(Some(opt_ws()), sep_by(ch(';'), draw()), Some(opt_ws())),
    ])
}

#[test]
fn games_parse_into_nested_lists() {
    let text = "Game 1: 3 blue, 4 red; 1 red, 2 green\nGame 2: 1 green, 1 blue\n";
    let ctx = SourceContext::from_input("games", text);
    let grammar = take_many_until1(game(), end_of_input());

    let out = parse(&ctx, &grammar).unwrap();
    assert_eq!(out.len(), Some(2));

    let first = out.get(0).unwrap();
    assert_eq!(first.get(1).and_then(Out::as_u64), Some(1));

    let draws = first.get(3).unwrap();
    assert_eq!(draws.len(), Some(2));

    // "3 blue, 4 red"
    let first_draw = draws.get(0).unwrap();
    assert_eq!(first_draw.len(), Some(2));
    let pair = first_draw.get(0).unwrap();
    assert_eq!(pair.get(0).and_then(Out::as_u64), Some(3));
    assert_eq!(pair.get(1).and_then(Out::as_str), Some("blue"));

    let second = out.get(1).unwrap();
    assert_eq!(second.get(1).and_then(Out::as_u64), Some(2));
}

#[test]
fn unknown_color_fails_instead_of_partially_matching() {
    let text = "Game 1: 3 mauve\n";
    let ctx = SourceContext::from_input("games", text);
    let grammar = take_many_until1(game(), end_of_input());

    let err = parse(&ctx, &grammar).unwrap_err();
    // Nothing matched at minimum one repetition.
    assert!(matches!(
        err.kind,
        weft::ErrorKind::QuantityShortfall { min: 1, actual: 0 }
    ));
}

// === Recursive grammar through shared references ===
//
//   LLR
//
//   AAA = (BBB, CCC)
//   BBB = (AAA, ZZZ)

fn node_name(out: &Out) -> String {
    out.iter().filter_map(Out::as_char).collect()
}

#[test]
fn shared_node_ids_parse_a_network() {
    let text = "LLR\n\nAAA = (BBB, CCC)\nBBB = (AAA, ZZZ)\nZZZ = (ZZZ, ZZZ)\n";
    let ctx = SourceContext::from_input("network", text);

    let node_id = shared(take_n(3, any_char()));
    let directions = adjacent(None, take_many1(first_of(vec![ch('L'), ch('R')])), Some(ws()));
    let node = sequence(vec![
        reference(&node_id),
        adjacent(Some(literal(" = (")), reference(&node_id), None),
        adjacent(
            Some(literal(", ")),
            reference(&node_id),
            Some(sequence(vec![literal(")"), opt_ws()])),
        ),
    ]);
    let grammar = sequence(vec![directions, take_many1(node)]);

    let out = parse(&ctx, &grammar).unwrap();

    let dirs: String = out
        .get(0)
        .unwrap()
        .iter()
        .filter_map(Out::as_str)
        .collect();
    assert_eq!(dirs, "LLR");

    let nodes = out.get(1).unwrap();
    assert_eq!(nodes.len(), Some(3));

    let second = nodes.get(1).unwrap();
    assert_eq!(node_name(second.get(0).unwrap()), "BBB");
    assert_eq!(node_name(second.get(1).unwrap()), "AAA");
    assert_eq!(node_name(second.get(2).unwrap()), "ZZZ");
}

#[test]
fn grammar_trees_are_reusable_across_runs() {
    let grammar = sep_by(ch(','), uint());

    for (text, expected) in [("1,2", vec![1, 2]), ("30,40,50", vec![30, 40, 50])] {
        let ctx = SourceContext::from_input("input", text);
        let out = parse(&ctx, &grammar).unwrap();
        let values: Vec<u64> = out.iter().filter_map(Out::as_u64).collect();
        assert_eq!(values, expected);
    }
}
