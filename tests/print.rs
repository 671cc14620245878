use attrexp::read::parse;
use attrexp::value::{attribute, decimal, integer, list, string, Atom, Expression};

#[test]
fn strings() {
    assert_eq!(string("a").to_string(), "a");
    assert_eq!(string("a b").to_string(), "\"a b\"");
    assert_eq!(string("a\"b").to_string(), "\"a\\\"b\"");
    assert_eq!(string("it's").to_string(), "\"it's\"");
    assert_eq!(string("[x]").to_string(), "\"[x]\"");
    assert_eq!(string("f(x)").to_string(), "\"f(x)\"");
    assert_eq!(string("k=v").to_string(), "\"k=v\"");
}

#[test]
fn strings_that_would_read_back_as_something_else() {
    assert_eq!(string("").to_string(), "\"\"");
    assert_eq!(string("12").to_string(), "\"12\"");
    assert_eq!(string("1.5").to_string(), "\"1.5\"");
    assert_eq!(string("1/").to_string(), "\"1/\"");
    assert_eq!(string("-1").to_string(), "-1");
}

#[test]
fn unbalanced_openers_are_escaped() {
    assert_eq!(string("a(").to_string(), "\"a\\u0028\"");
    assert_eq!(string("((a)").to_string(), "\"\\u0028(a)\"");
    assert_eq!(string(")(").to_string(), "\")\\u0028\"");
    // balanced ones are left alone
    assert_eq!(string("f(a b)").to_string(), "\"f(a b)\"");
    let e = list(vec![string("a("), string("b")]);
    assert_eq!(e.to_string(), "(\"a\\u0028\" b)");
    assert_eq!(parse(&e.to_string()), Ok(e));
    assert_eq!(parse(&string("f(").to_string()), Ok(string("f(")));
}

#[test]
fn control_characters_are_not_escaped() {
    assert_eq!(string("a\tb").to_string(), "\"a\tb\"");
    assert_eq!(string("a\nb").to_string(), "\"a\nb\"");
    // no protected character, so not even quoted
    assert_eq!(string("a\u{8}b").to_string(), "a\u{8}b");
    assert_eq!(string("a\\b").to_string(), "a\\b");
}

#[test]
fn decimals() {
    assert_eq!(decimal(0.5).to_string(), "0.5");
    assert_eq!(decimal(13.37).to_string(), "13.37");
    assert_eq!(decimal(1.0 / 3.0).to_string(), "0.3333333333333333");
    assert_eq!(decimal(2.0).to_string(), "2.0");
}

#[test]
fn integers() {
    assert_eq!(integer(1).to_string(), "1");
    assert_eq!(integer(-7).to_string(), "-7");
}

#[test]
fn lists() {
    assert_eq!(list(vec![string("a"), string("b")]).to_string(), "(a b)");
    assert_eq!(list(vec![]).to_string(), "()");
    assert_eq!(list(vec![list(vec![]), integer(1)]).to_string(), "(() 1)");
}

#[test]
fn attributes() {
    assert_eq!(attribute("a", integer(1)).to_string(), "a=1");
    assert_eq!(attribute("a b", integer(1)).to_string(), "\"a b\"=1");
    assert_eq!(attribute(Atom::Decimal(0.5), list(vec![string("x")])).to_string(),
               "0.5=(x)");
    assert_eq!(attribute("a", attribute("b", string("c d"))).to_string(),
               "a=b=\"c d\"");
}

#[test]
fn atom_display_matches_expression_display() {
    let a = Atom::from("x y");
    assert_eq!(a.to_string(), Expression::from(a.clone()).to_string());
    assert_eq!(a.pretty_description("  "), "  \"x y\"");
}

#[test]
fn pretty_atoms_and_attributes_are_indented_descriptions() {
    assert_eq!(string("a").pretty_description("    "), "    a");
    assert_eq!(attribute("k", list(vec![integer(1), list(vec![])]))
               .pretty_description("> "),
               "> k=(1 ())");
}

#[test]
fn pretty_lists() {
    let e = list(vec![
        string("a"),
        list(vec![string("b"), string("c")]),
        string("d"),
        string("e"),
        list(vec![list(vec![string("f")])]),
    ]);
    assert_eq!(e.pretty_description(""),
               "(a\n  (b c) d e\n  (\n    (f)))");
    assert_eq!(e.pretty_description("\t"),
               "\t(a\n\t  (b c) d e\n\t  (\n\t    (f)))");
}

#[test]
fn pretty_list_starting_with_a_list() {
    let e = list(vec![list(vec![]), string("x")]);
    assert_eq!(e.pretty_description(""), "(\n  () x)");
}

#[test]
fn rendering_is_repeatable() {
    let e = parse("(a \"b c\" d=[e f] (1 2.5))").unwrap();
    assert_eq!(e.to_string(), e.to_string());
    assert_eq!(e.to_string(), "(a \"b c\" d=\"[e f]\" (1 2.5))");
}

#[test]
fn reading_back_a_description() {
    for input in ["(a \"b c\" d=[e f] (1 2.5 \"7\"))",
                  "x=(y=\"it's\" z=\"say \\\"hi\\\"\")",
                  "(\"\" () (()))"] {
        let e = parse(input).unwrap();
        assert_eq!(parse(&e.to_string()), Ok(e.clone()), "input: {}", input);
    }
}

#[test]
fn control_characters_do_not_survive_bare() {
    // backspace prints bare and the backslash form is lost
    let e = string("a\\b");
    assert_eq!(parse(&e.to_string()), Ok(string("a\u{8}")));
}
