use esparse::node::*;
use esparse::Parser;
use ress::{Position, SourceLocation};

fn parse(js: &str) -> Program {
    let mut parser = Parser::new(js).expect("failed to create parser");
    parser.parse().expect("failed to parse js")
}

fn loc(start: (usize, usize), end: (usize, usize)) -> SourceLocation {
    SourceLocation::new(
        Position::new(start.0, start.1),
        Position::new(end.0, end.1),
    )
}

#[test]
fn var_statement_locations() {
    let program = parse("var x = 1;");
    let part = &program.parts()[0];
    assert_eq!(part.loc(), loc((1, 0), (1, 10)));
    let decls = match part {
        ProgramPart::Decl(Decl::Var(decls)) => decls,
        other => panic!("expected a var declaration, found {:?}", other),
    };
    let decl = &decls.decls[0];
    assert_eq!(decl.loc, loc((1, 4), (1, 9)));
    assert_eq!(decl.id.loc(), loc((1, 4), (1, 5)));
    match &decl.init {
        Some(init) => assert_eq!(init.loc(), loc((1, 8), (1, 9))),
        None => panic!("expected an initializer"),
    }
}

#[test]
fn statement_location_excludes_asi_gap() {
    let program = parse("a\nb");
    assert_eq!(program.parts()[0].loc(), loc((1, 0), (1, 1)));
    assert_eq!(program.parts()[1].loc(), loc((2, 0), (2, 1)));
}

#[test]
fn binary_location_spans_operands() {
    let program = parse("a + b * c;");
    let expr = match &program.parts()[0] {
        ProgramPart::Stmt(Stmt::Expr(inner)) => &inner.expr,
        other => panic!("expected an expression statement, found {:?}", other),
    };
    assert_eq!(expr.loc(), loc((1, 0), (1, 9)));
    match expr {
        Expr::Binary(plus) => {
            assert_eq!(plus.left.loc(), loc((1, 0), (1, 1)));
            assert_eq!(plus.right.loc(), loc((1, 4), (1, 9)));
        }
        other => panic!("expected a binary expression, found {:?}", other),
    }
}

#[test]
fn multi_line_function_location() {
    let js = "function f(a) {
    return a;
}";
    let program = parse(js);
    let func = match &program.parts()[0] {
        ProgramPart::Decl(Decl::Func(func)) => func,
        other => panic!("expected a function, found {:?}", other),
    };
    assert_eq!(func.loc, loc((1, 0), (3, 1)));
    assert_eq!(func.body.loc, loc((1, 14), (3, 1)));
    let ret = &func.body.stmts[0];
    assert_eq!(ret.loc(), loc((2, 4), (2, 13)));
}

/// Every node should cover all of its children
#[test]
fn parents_cover_children() {
    let js = "for (let [a, b] of xs) { a ? b : [a, b]; }";
    let program = parse(js);
    let for_of = match &program.parts()[0] {
        ProgramPart::Stmt(Stmt::ForOf(inner)) => inner,
        other => panic!("expected a for-of, found {:?}", other),
    };
    let outer = for_of.loc;
    for inner in [
        match &for_of.left {
            LoopLeft::Variable(decls) => decls.loc,
            other => panic!("expected a variable loop left, found {:?}", other),
        },
        for_of.right.loc(),
        for_of.body.loc(),
    ] {
        assert!(
            outer.start <= inner.start && outer.end >= inner.end,
            "{:?} does not cover {:?}",
            outer,
            inner
        );
    }
}

#[test]
fn paren_location_includes_the_parens() {
    let program = parse("(a, b);");
    let paren = match &program.parts()[0] {
        ProgramPart::Stmt(Stmt::Expr(inner)) => match &inner.expr {
            Expr::Paren(paren) => (paren.loc, paren.expr.loc()),
            other => panic!("expected a parenthesized expression, found {:?}", other),
        },
        other => panic!("expected an expression statement, found {:?}", other),
    };
    assert_eq!(paren.0, loc((1, 0), (1, 6)));
    assert_eq!(paren.1, loc((1, 1), (1, 5)));
}
