use esparse::node::*;
use esparse::{Error, Parser};

fn parse(js: &str) -> Program {
    let mut parser = Parser::new(js).expect("failed to create parser");
    parser.parse().expect("failed to parse js")
}

fn parse_module(js: &str) -> Program {
    let mut parser = Parser::builder()
        .js(js)
        .module(true)
        .build()
        .expect("failed to create parser");
    parser.parse().expect("failed to parse module")
}

fn parse_err(js: &str) -> Error {
    let mut parser = Parser::new(js).expect("failed to create parser");
    match parser.parse() {
        Ok(prog) => panic!("expected an error for {:?}, found {:?}", js, prog),
        Err(e) => e,
    }
}

fn first_stmt<'a, 'b>(program: &'a Program<'b>) -> &'a Stmt<'b> {
    match program.parts().first() {
        Some(ProgramPart::Stmt(stmt)) => stmt,
        other => panic!("expected a statement, found {:?}", other),
    }
}

fn first_expr<'a, 'b>(program: &'a Program<'b>) -> &'a Expr<'b> {
    match first_stmt(program) {
        Stmt::Expr(inner) => &inner.expr,
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn doc1() {
    let _ = env_logger::try_init();
    let js = "function helloWorld() { alert('Hello world'); }";
    let program = parse(js);
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function declaration, found {:?}", other),
    };
    assert_eq!(func.id.as_ref().map(|id| &*id.name), Some("helloWorld"));
    assert!(func.params.is_empty());
    assert!(!func.generator);
    assert_eq!(func.body.stmts.len(), 1);
}

#[test]
fn precedence_ladder() {
    let _ = env_logger::try_init();
    let js = "a || b && c | d ^ e & f == g < h >> i + j * k";
    let program = parse(js);
    // a || (b && (c | (d ^ (e & (f == (g < (h >> (i + (j * k)))))))))
    let or = match first_expr(&program) {
        Expr::Logical(l) => l,
        other => panic!("expected a logical or, found {:?}", other),
    };
    assert_eq!(or.operator, LogicalOp::Or);
    assert!(matches!(&*or.left, Expr::Ident(id) if id.matches("a")));
    let and = match &*or.right {
        Expr::Logical(l) => l,
        other => panic!("expected a logical and, found {:?}", other),
    };
    assert_eq!(and.operator, LogicalOp::And);
    assert!(matches!(&*and.left, Expr::Ident(id) if id.matches("b")));
    let bit_or = expect_binary(&and.right, BinaryOp::Or, "c");
    let bit_xor = expect_binary(bit_or, BinaryOp::XOr, "d");
    let bit_and = expect_binary(bit_xor, BinaryOp::And, "e");
    let eq = expect_binary(bit_and, BinaryOp::Equal, "f");
    let less = expect_binary(eq, BinaryOp::LessThan, "g");
    let shift = expect_binary(less, BinaryOp::RightShift, "h");
    let plus = expect_binary(shift, BinaryOp::Plus, "i");
    let times = match plus {
        Expr::Binary(b) => b,
        other => panic!("expected the innermost product, found {:?}", other),
    };
    assert_eq!(times.operator, BinaryOp::Times);
    assert!(matches!(&*times.left, Expr::Ident(id) if id.matches("j")));
    assert!(matches!(&*times.right, Expr::Ident(id) if id.matches("k")));
}

/// Assert `expr` is a binary with `op` and the named identifier on
/// the left, handing back the right hand side
fn expect_binary<'a, 'b>(expr: &'a Expr<'b>, op: BinaryOp, left: &str) -> &'a Expr<'b> {
    match expr {
        Expr::Binary(b) => {
            assert_eq!(b.operator, op);
            assert!(
                matches!(&*b.left, Expr::Ident(id) if id.matches(left)),
                "expected {} on the left of {:?}, found {:?}",
                left,
                op,
                b.left
            );
            &b.right
        }
        other => panic!("expected a binary expression, found {:?}", other),
    }
}

#[test]
fn asi_return_without_arg() {
    let _ = env_logger::try_init();
    let js = "function f() {
return
a+b
}";
    let program = parse(js);
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function, found {:?}", other),
    };
    assert_eq!(func.body.stmts.len(), 2);
    match &func.body.stmts[0] {
        ProgramPart::Stmt(Stmt::Return(ret)) => assert!(ret.argument.is_none()),
        other => panic!("expected a bare return, found {:?}", other),
    }
    match &func.body.stmts[1] {
        ProgramPart::Stmt(Stmt::Expr(inner)) => {
            assert!(matches!(&inner.expr, Expr::Binary(_)))
        }
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn asi_return_with_arg() {
    let _ = env_logger::try_init();
    let js = "function f() {
return a
+b
}";
    let program = parse(js);
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function, found {:?}", other),
    };
    assert_eq!(func.body.stmts.len(), 1);
    match &func.body.stmts[0] {
        ProgramPart::Stmt(Stmt::Return(ret)) => {
            assert!(matches!(ret.argument, Some(Expr::Binary(_))))
        }
        other => panic!("expected a return with an argument, found {:?}", other),
    }
}

#[test]
fn asi_return_with_string_on_next_line() {
    let _ = env_logger::try_init();
    let js = "function f() {
return
'x';
}";
    let program = parse(js);
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function, found {:?}", other),
    };
    assert_eq!(func.body.stmts.len(), 2);
    match &func.body.stmts[0] {
        ProgramPart::Stmt(Stmt::Return(ret)) => assert!(ret.argument.is_none()),
        other => panic!("expected a bare return, found {:?}", other),
    }
    match &func.body.stmts[1] {
        ProgramPart::Stmt(Stmt::Expr(inner)) => {
            assert!(matches!(&inner.expr, Expr::Lit(Lit::String(_))))
        }
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn arrow_cover_commits_on_fat_arrow() {
    let _ = env_logger::try_init();
    let js = "(a, b) => a + b";
    let program = parse(js);
    let arrow = match first_expr(&program) {
        Expr::ArrowFunc(a) => a,
        other => panic!("expected an arrow function, found {:?}", other),
    };
    assert_eq!(arrow.params.len(), 2);
    assert!(arrow.expression);
    assert!(matches!(&arrow.body, ArrowFuncBody::Expr(e) if matches!(&**e, Expr::Binary(_))));
}

#[test]
fn arrow_cover_falls_back_to_sequence() {
    let _ = env_logger::try_init();
    let js = "(a, b)";
    let program = parse(js);
    let paren = match first_expr(&program) {
        Expr::Paren(p) => p,
        other => panic!("expected a parenthesized expression, found {:?}", other),
    };
    match &paren.expr {
        Expr::Sequence(seq) => assert_eq!(seq.expressions.len(), 2),
        other => panic!("expected a sequence, found {:?}", other),
    }
}

#[test]
fn arrow_with_line_term_before_fat_arrow() {
    let _ = env_logger::try_init();
    let js = "var af = x
=> x;";
    let mut parser = Parser::new(js).expect("failed to create parser");
    match parser.parse() {
        Err(Error::NewLineAfterFatArrow(_)) => (),
        other => panic!("expected a new line error, found {:?}", other),
    }
}

#[test]
fn arrow_block_body_and_rest() {
    let _ = env_logger::try_init();
    let js = "(a, b = 0, [c,, d = 0], {f, g: h, i = 0}, ...k) => {;};";
    let program = parse(js);
    let arrow = match first_expr(&program) {
        Expr::ArrowFunc(a) => a,
        other => panic!("expected an arrow function, found {:?}", other),
    };
    assert_eq!(arrow.params.len(), 5);
    assert!(!arrow.expression);
    assert!(matches!(
        arrow.params.last(),
        Some(FuncArg::Pat(Pat::Rest(_)))
    ));
}

#[test]
fn strict_octal_literal() {
    let _ = env_logger::try_init();
    let js = "\"use strict\"; var x = 010;";
    match parse_err(js) {
        Error::OctalLiteral(_) => (),
        other => panic!("expected an octal literal error, found {:?}", other),
    }
}

#[test]
fn strict_octal_escape_in_directive() {
    let _ = env_logger::try_init();
    let js = "'\\051'; 'use strict';";
    match parse_err(js) {
        Error::OctalLiteral(_) => (),
        other => panic!("expected an octal literal error, found {:?}", other),
    }
}

#[test]
fn strict_delete_ident() {
    let _ = env_logger::try_init();
    let js = "'use strict'; delete x;";
    match parse_err(js) {
        Error::UnqualifiedDelete(_) => (),
        other => panic!("expected a delete error, found {:?}", other),
    }
    // deleting a member expression is still fine
    let _ = parse("'use strict'; delete x.y;");
    // and so is the bare form outside of strict mode
    let _ = parse("delete x;");
}

#[test]
fn strict_labelled_function() {
    let _ = env_logger::try_init();
    let js = "'use strict'; lbl: function f() {}";
    match parse_err(js) {
        Error::LabelledFunctionInStrict(_) => (),
        other => panic!("expected a labelled function error, found {:?}", other),
    }
    let program = parse("lbl: function f() {}");
    assert!(matches!(first_stmt(&program), Stmt::Labeled(_)));
}

#[test]
fn with_is_not_strict_checked() {
    let _ = env_logger::try_init();
    // `with` parses the same in strict and sloppy code
    let program = parse("'use strict'; with (x) y;");
    match program.parts().get(1) {
        Some(ProgramPart::Stmt(Stmt::With(_))) => (),
        other => panic!("expected a with statement, found {:?}", other),
    }
}

#[test]
fn multiple_default_clauses() {
    let _ = env_logger::try_init();
    let js = "switch (x) { default: a; default: b; }";
    match parse_err(js) {
        Error::MultipleDefaults(_) => (),
        other => panic!("expected a multiple default error, found {:?}", other),
    }
}

#[test]
fn switch_case_order() {
    let _ = env_logger::try_init();
    let js = "switch(x){case 1: a; default: b; case 2: c;}";
    let program = parse(js);
    let switch = match first_stmt(&program) {
        Stmt::Switch(s) => s,
        other => panic!("expected a switch, found {:?}", other),
    };
    assert_eq!(switch.cases.len(), 3);
    assert!(switch.cases[0].test.is_some());
    assert!(switch.cases[1].test.is_none());
    assert!(switch.cases[2].test.is_some());
    assert_eq!(switch.cases[1].consequent.len(), 1);
}

#[test]
fn try_with_no_catch_or_finally() {
    let _ = env_logger::try_init();
    match parse_err("try { x; }") {
        Error::TryWithNoCatchOrFinally(_) => (),
        other => panic!("expected a try error, found {:?}", other),
    }
    let _ = parse("try { x; } catch (e) { y; }");
    let _ = parse("try { x; } finally { z; }");
    let _ = parse("try { x; } catch (e) { y; } finally { z; }");
}

#[test]
fn nested_new_with_args() {
    let _ = env_logger::try_init();
    let js = "new new f()()";
    let program = parse(js);
    let outer = match first_expr(&program) {
        Expr::New(n) => n,
        other => panic!("expected a new expression, found {:?}", other),
    };
    assert!(outer.arguments.is_empty());
    let inner = match &*outer.callee {
        Expr::New(n) => n,
        other => panic!("expected the callee to be a new expression, found {:?}", other),
    };
    assert!(inner.arguments.is_empty());
    assert!(matches!(&*inner.callee, Expr::Ident(id) if id.matches("f")));
}

#[test]
fn tagged_template_on_member() {
    let _ = env_logger::try_init();
    let js = "a.b`${c}d`";
    let program = parse(js);
    let tagged = match first_expr(&program) {
        Expr::TaggedTemplate(t) => t,
        other => panic!("expected a tagged template, found {:?}", other),
    };
    match &*tagged.tag {
        Expr::Member(m) => {
            assert!(matches!(&*m.object, Expr::Ident(id) if id.matches("a")));
            assert!(matches!(&*m.property, Expr::Ident(id) if id.matches("b")));
            assert!(!m.computed);
        }
        other => panic!("expected a member expression tag, found {:?}", other),
    }
    assert_eq!(tagged.quasi.quasis.len(), 2);
    assert_eq!(&*tagged.quasi.quasis[0].cooked, "");
    assert_eq!(&*tagged.quasi.quasis[1].cooked, "d");
    assert!(tagged.quasi.quasis[1].tail);
    assert_eq!(tagged.quasi.expressions.len(), 1);
    assert!(matches!(&tagged.quasi.expressions[0], Expr::Ident(id) if id.matches("c")));
}

#[test]
fn block_with_let_and_update() {
    let _ = env_logger::try_init();
    let js = "{ let x = 1; x++ }";
    let program = parse(js);
    let block = match first_stmt(&program) {
        Stmt::Block(b) => b,
        other => panic!("expected a block, found {:?}", other),
    };
    assert_eq!(block.stmts.len(), 2);
    match &block.stmts[0] {
        ProgramPart::Decl(Decl::Var(decls)) => assert_eq!(decls.kind, VarKind::Let),
        other => panic!("expected a let declaration, found {:?}", other),
    }
    match &block.stmts[1] {
        ProgramPart::Stmt(Stmt::Expr(inner)) => match &inner.expr {
            Expr::Update(u) => {
                assert_eq!(u.operator, UpdateOp::Increment);
                assert!(!u.prefix);
                assert!(matches!(&*u.argument, Expr::Ident(id) if id.matches("x")));
            }
            other => panic!("expected an update expression, found {:?}", other),
        },
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn for_of_with_let_array_pattern() {
    let _ = env_logger::try_init();
    let js = "for (let [a, b] of xs) ;";
    let program = parse(js);
    let for_of = match first_stmt(&program) {
        Stmt::ForOf(f) => f,
        other => panic!("expected a for-of, found {:?}", other),
    };
    match &for_of.left {
        LoopLeft::Variable(decls) => {
            assert_eq!(decls.kind, VarKind::Let);
            assert_eq!(decls.decls.len(), 1);
            match &decls.decls[0].id {
                Pat::Array(arr) => assert_eq!(arr.elements.len(), 2),
                other => panic!("expected an array pattern, found {:?}", other),
            }
            assert!(decls.decls[0].init.is_none());
        }
        other => panic!("expected a variable loop left, found {:?}", other),
    }
    assert!(matches!(&for_of.right, Expr::Ident(id) if id.matches("xs")));
    assert!(matches!(&*for_of.body, Stmt::Empty(_)));
}

#[test]
fn for_in_reinterprets_expression_head() {
    let _ = env_logger::try_init();
    let js = "for ([a, b] in c) ;";
    let program = parse(js);
    let for_in = match first_stmt(&program) {
        Stmt::ForIn(f) => f,
        other => panic!("expected a for-in, found {:?}", other),
    };
    assert!(matches!(&for_in.left, LoopLeft::Pat(Pat::Array(_))));
}

#[test]
fn for_in_member_head_stays_an_expression() {
    let _ = env_logger::try_init();
    let js = "for (a.b in c) ;";
    let program = parse(js);
    let for_in = match first_stmt(&program) {
        Stmt::ForIn(f) => f,
        other => panic!("expected a for-in, found {:?}", other),
    };
    assert!(matches!(&for_in.left, LoopLeft::Expr(Expr::Member(_))));
}

#[test]
fn c_style_for_with_sequence_init() {
    let _ = env_logger::try_init();
    let js = "for (i = 0, j = 10; i < j; i++, j--) ;";
    let program = parse(js);
    let for_stmt = match first_stmt(&program) {
        Stmt::For(f) => f,
        other => panic!("expected a for loop, found {:?}", other),
    };
    assert!(matches!(&for_stmt.init, Some(LoopInit::Expr(Expr::Sequence(_)))));
    assert!(for_stmt.test.is_some());
    assert!(matches!(&for_stmt.update, Some(Expr::Sequence(_))));
}

#[test]
fn destructuring_assignment() {
    let _ = env_logger::try_init();
    let js = "[a, , b] = c;";
    let program = parse(js);
    let assign = match first_expr(&program) {
        Expr::Assign(a) => a,
        other => panic!("expected an assignment, found {:?}", other),
    };
    assert_eq!(assign.operator, AssignOp::Equal);
    match &assign.left {
        AssignLeft::Pat(Pat::Array(arr)) => {
            assert_eq!(arr.elements.len(), 3);
            assert!(arr.elements[1].is_none(), "the elision should survive");
        }
        other => panic!("expected an array pattern, found {:?}", other),
    }
}

#[test]
fn destructuring_keeps_member_targets() {
    let _ = env_logger::try_init();
    let js = "[a, b.c] = [1, 2];";
    let program = parse(js);
    let assign = match first_expr(&program) {
        Expr::Assign(a) => a,
        other => panic!("expected an assignment, found {:?}", other),
    };
    let arr = match &assign.left {
        AssignLeft::Pat(Pat::Array(arr)) => arr,
        other => panic!("expected an array pattern, found {:?}", other),
    };
    assert!(matches!(
        arr.elements[0],
        Some(ArrayPatPart::Pat(Pat::Ident(_)))
    ));
    assert!(matches!(
        arr.elements[1],
        Some(ArrayPatPart::Expr(Expr::Member(_)))
    ));

    let js = "({a: b.c} = src);";
    let program = parse(js);
    let paren = match first_expr(&program) {
        Expr::Paren(p) => p,
        other => panic!("expected a parenthesized expression, found {:?}", other),
    };
    let assign = match &paren.expr {
        Expr::Assign(a) => a,
        other => panic!("expected an assignment, found {:?}", other),
    };
    let obj = match &assign.left {
        AssignLeft::Pat(Pat::Obj(o)) => o,
        other => panic!("expected an object pattern, found {:?}", other),
    };
    assert!(matches!(
        &obj.props[0].value,
        PropValue::Expr(Expr::Member(_))
    ));
}

#[test]
fn object_pattern_assignment_preserves_shorthand() {
    let _ = env_logger::try_init();
    let js = "({a, b: c, d = 1} = e);";
    let program = parse(js);
    let paren = match first_expr(&program) {
        Expr::Paren(p) => p,
        other => panic!("expected a parenthesized expression, found {:?}", other),
    };
    let assign = match &paren.expr {
        Expr::Assign(a) => a,
        other => panic!("expected an assignment, found {:?}", other),
    };
    let obj = match &assign.left {
        AssignLeft::Pat(Pat::Obj(o)) => o,
        other => panic!("expected an object pattern, found {:?}", other),
    };
    assert_eq!(obj.props.len(), 3);
    assert!(obj.props[0].shorthand);
    assert!(!obj.props[1].shorthand);
    assert!(obj.props[2].shorthand);
    assert!(matches!(&obj.props[2].value, PropValue::Pat(Pat::Assign(_))));
}

#[test]
fn covert_initialized_name_rejected_as_expression() {
    let _ = env_logger::try_init();
    // a shorthand default only makes sense as a destructuring
    // target, as a plain expression it must fail
    match parse_err("({a = 1});") {
        Error::UnexpectedToken(_, _) => (),
        other => panic!("expected an unexpected token error, found {:?}", other),
    }
    // but the same text as an assignment target is fine
    let _ = parse("({a = 1} = b);");
}

#[test]
fn compound_assignment_left_stays_an_expression() {
    let _ = env_logger::try_init();
    let js = "a += 1;";
    let program = parse(js);
    let assign = match first_expr(&program) {
        Expr::Assign(a) => a,
        other => panic!("expected an assignment, found {:?}", other),
    };
    assert_eq!(assign.operator, AssignOp::PlusEqual);
    assert!(matches!(&assign.left, AssignLeft::Expr(_)));
}

#[test]
fn assignment_to_non_target_fails() {
    let _ = env_logger::try_init();
    match parse_err("a + b = c;") {
        Error::UnexpectedToken(_, _) => (),
        other => panic!("expected an unexpected token error, found {:?}", other),
    }
}

#[test]
fn yield_forms() {
    let _ = env_logger::try_init();
    let js = "function *g() { yield; yield a; yield *b; }";
    let program = parse(js);
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function, found {:?}", other),
    };
    assert!(func.generator);
    let stmts = &func.body.stmts;
    assert_eq!(stmts.len(), 3);
    let as_yield = |part: &ProgramPart| match part {
        ProgramPart::Stmt(Stmt::Expr(inner)) => match &inner.expr {
            Expr::Yield(y) => (y.argument.is_some(), y.delegate),
            other => panic!("expected a yield, found {:?}", other),
        },
        other => panic!("expected an expression statement, found {:?}", other),
    };
    assert_eq!(as_yield(&stmts[0]), (false, false));
    assert_eq!(as_yield(&stmts[1]), (true, false));
    assert_eq!(as_yield(&stmts[2]), (true, true));
}

#[test]
fn yield_is_an_ident_outside_generators() {
    let _ = env_logger::try_init();
    let program = parse("var yield = 1;");
    match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Var(decls))) => {
            assert!(matches!(&decls.decls[0].id, Pat::Ident(id) if id.matches("yield")))
        }
        other => panic!("expected a var declaration, found {:?}", other),
    }
}

#[test]
fn class_members() {
    let _ = env_logger::try_init();
    let js = "class A extends B {
    constructor(a) {}
    static create() {}
    get size() {}
    set size(value) {}
    *items() {}
    static() {}
}";
    let program = parse(js);
    let class = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Class(c))) => c,
        other => panic!("expected a class, found {:?}", other),
    };
    assert_eq!(class.id.as_ref().map(|id| &*id.name), Some("A"));
    assert!(matches!(class.super_class.as_deref(), Some(Expr::Ident(id)) if id.matches("B")));
    let els = &class.body.elements;
    assert_eq!(els.len(), 6);
    assert_eq!(els[0].kind, MethodKind::Constructor);
    assert_eq!(els[1].kind, MethodKind::Method);
    assert!(els[1].is_static);
    assert_eq!(els[2].kind, MethodKind::Get);
    assert_eq!(els[3].kind, MethodKind::Set);
    assert_eq!(els[4].kind, MethodKind::Method);
    assert!(els[4].value.generator);
    // a method actually named `static`
    assert_eq!(els[5].kind, MethodKind::Method);
    assert!(!els[5].is_static);
    assert!(els[5].key.matches("static"));
}

#[test]
fn duplicate_constructor() {
    let _ = env_logger::try_init();
    let js = "class A { constructor() {} constructor() {} }";
    match parse_err(js) {
        Error::DuplicateCtor(_) => (),
        other => panic!("expected a duplicate constructor error, found {:?}", other),
    }
}

#[test]
fn getter_and_setter_arity() {
    let _ = env_logger::try_init();
    match parse_err("class A { get x(v) {} }") {
        Error::InvalidGetterParams(_) => (),
        other => panic!("expected a getter params error, found {:?}", other),
    }
    match parse_err("class A { set x() {} }") {
        Error::InvalidSetterParams(_) => (),
        other => panic!("expected a setter params error, found {:?}", other),
    }
    match parse_err("class A { set x(...v) {} }") {
        Error::InvalidSetterParams(_) => (),
        other => panic!("expected a setter params error, found {:?}", other),
    }
}

#[test]
fn object_literal_shapes() {
    let _ = env_logger::try_init();
    let js = "var o = {
    a: 1,
    'b': 2,
    3: c,
    [d]: 4,
    e,
    f() {},
    *g() {},
    get h() {},
    set h(v) {},
};";
    let program = parse(js);
    let decls = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Var(decls))) => decls,
        other => panic!("expected a var declaration, found {:?}", other),
    };
    let obj = match &decls.decls[0].init {
        Some(Expr::Obj(o)) => o,
        other => panic!("expected an object literal, found {:?}", other),
    };
    assert_eq!(obj.props.len(), 9);
    assert!(matches!(&obj.props[0].key, PropKey::Ident(_)));
    assert!(matches!(&obj.props[1].key, PropKey::Lit(Lit::String(_))));
    assert!(matches!(&obj.props[2].key, PropKey::Lit(Lit::Number(_))));
    assert!(obj.props[3].computed);
    assert!(obj.props[4].shorthand);
    assert!(obj.props[5].method);
    assert!(obj.props[6].method);
    assert_eq!(obj.props[7].kind, PropKind::Get);
    assert_eq!(obj.props[8].kind, PropKind::Set);
}

#[test]
fn new_target_only_in_function_body() {
    let _ = env_logger::try_init();
    let program = parse("function f() { return new.target; }");
    let func = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Func(f))) => f,
        other => panic!("expected a function, found {:?}", other),
    };
    match &func.body.stmts[0] {
        ProgramPart::Stmt(Stmt::Return(ret)) => match &ret.argument {
            Some(Expr::MetaProp(meta)) => {
                assert!(meta.meta.matches("new"));
                assert!(meta.property.matches("target"));
            }
            other => panic!("expected a meta property, found {:?}", other),
        },
        other => panic!("expected a return, found {:?}", other),
    }
    match parse_err("var x = new.target;") {
        Error::InvalidNewTarget(_) => (),
        other => panic!("expected a new.target error, found {:?}", other),
    }
}

#[test]
fn super_outside_function_body() {
    let _ = env_logger::try_init();
    match parse_err("super.x;") {
        Error::InvalidSuper(_) => (),
        other => panic!("expected a super error, found {:?}", other),
    }
    let _ = parse("class A extends B { constructor() { super(); super.x; } }");
}

#[test]
fn expression_statement_restrictions() {
    let _ = env_logger::try_init();
    match parse_err("if (x) class A {}") {
        Error::InvalidStartOfExpressionStmt(_, what) => assert_eq!(what, "class"),
        other => panic!("expected a start of statement error, found {:?}", other),
    }
    match parse_err("if (x) let [a] = b;") {
        Error::InvalidStartOfExpressionStmt(_, what) => assert_eq!(what, "let ["),
        other => panic!("expected a start of statement error, found {:?}", other),
    }
}

#[test]
fn throw_requires_same_line_argument() {
    let _ = env_logger::try_init();
    match parse_err("throw\nx;") {
        Error::ThrowWithNoArg(_) => (),
        other => panic!("expected a throw error, found {:?}", other),
    }
    let _ = parse("throw x;");
}

#[test]
fn labelled_break_and_continue() {
    let _ = env_logger::try_init();
    let js = "outer: for (;;) { for (;;) { continue outer; } break outer; }";
    let program = parse(js);
    assert!(matches!(first_stmt(&program), Stmt::Labeled(_)));
}

#[test]
fn regex_literal() {
    let _ = env_logger::try_init();
    let js = "var re = /ab+c/gi;";
    let program = parse(js);
    let decls = match program.parts().first() {
        Some(ProgramPart::Decl(Decl::Var(decls))) => decls,
        other => panic!("expected a var declaration, found {:?}", other),
    };
    match &decls.decls[0].init {
        Some(Expr::Lit(Lit::RegEx(re))) => {
            assert_eq!(&*re.pattern, "ab+c");
            assert_eq!(&*re.flags, "gi");
        }
        other => panic!("expected a regex literal, found {:?}", other),
    }
}

#[test]
fn conditional_and_sequence() {
    let _ = env_logger::try_init();
    let js = "a ? b : c, d;";
    let program = parse(js);
    match first_expr(&program) {
        Expr::Sequence(seq) => {
            assert_eq!(seq.expressions.len(), 2);
            assert!(matches!(&seq.expressions[0], Expr::Conditional(_)));
        }
        other => panic!("expected a sequence, found {:?}", other),
    }
}

#[test]
fn import_forms() {
    let _ = env_logger::try_init();
    let js = "import 'side-effect';
import Thing from 'place';
import * as Stuff from 'place';
import {One, Two as Three} from 'place';
import Zero, {Four} from 'place';";
    let module = parse_module(js);
    let imports: Vec<&ModImport> = module
        .parts()
        .iter()
        .map(|part| match part {
            ProgramPart::Decl(Decl::Import(import)) => &**import,
            other => panic!("expected an import, found {:?}", other),
        })
        .collect();
    assert_eq!(imports.len(), 5);
    assert!(imports[0].specifiers.is_empty());
    assert!(matches!(imports[1].specifiers[0], ImportSpecifier::Default(_)));
    assert!(matches!(imports[2].specifiers[0], ImportSpecifier::Namespace(_)));
    match &imports[3].specifiers[1] {
        ImportSpecifier::Normal(spec) => {
            assert!(spec.imported.matches("Two"));
            assert!(spec.local().matches("Three"));
        }
        other => panic!("expected a named specifier, found {:?}", other),
    }
    assert_eq!(imports[4].specifiers.len(), 2);
}

#[test]
fn export_forms() {
    let _ = env_logger::try_init();
    let js = "export var a = 1;
export function b() {}
export default function () {}
export {c, d as e};
export * from 'place';";
    let module = parse_module(js);
    let exports: Vec<&ModExport> = module
        .parts()
        .iter()
        .filter_map(|part| match part {
            ProgramPart::Decl(Decl::Export(export)) => Some(&**export),
            _ => None,
        })
        .collect();
    assert_eq!(exports.len(), 5);
    assert!(matches!(exports[0], ModExport::Named(NamedExportDecl { decl: Some(_), .. })));
    assert!(matches!(exports[1], ModExport::Named(NamedExportDecl { decl: Some(_), .. })));
    assert!(
        matches!(exports[2], ModExport::Default(DefaultExportDecl { value: DefaultExportValue::Decl(_), .. }))
    );
    match exports[3] {
        ModExport::Named(NamedExportDecl {
            decl: None,
            specifiers,
            source: None,
            ..
        }) => {
            assert_eq!(specifiers.len(), 2);
            assert!(specifiers[1].alias.as_ref().map(|a| a.matches("e")).unwrap_or(false));
        }
        other => panic!("expected an export list, found {:?}", other),
    }
    assert!(matches!(exports[4], ModExport::All(_)));
}

#[test]
fn import_outside_module() {
    let _ = env_logger::try_init();
    match parse_err("import Thing from 'place';") {
        Error::UseOfModuleFeatureOutsideOfModule(_, _) => (),
        other => panic!("expected a module feature error, found {:?}", other),
    }
    match parse_err("export var a = 1;") {
        Error::UseOfModuleFeatureOutsideOfModule(_, _) => (),
        other => panic!("expected a module feature error, found {:?}", other),
    }
}

#[test]
fn module_is_strict() {
    let _ = env_logger::try_init();
    let mut parser = Parser::builder()
        .js("var x = 010;")
        .module(true)
        .build()
        .expect("failed to create parser");
    match parser.parse() {
        Err(Error::OctalLiteral(_)) => (),
        other => panic!("expected an octal literal error, found {:?}", other),
    }
}

#[test]
fn iterator_interface() {
    let _ = env_logger::try_init();
    let js = "var a = 1; let b = 2; a + b;";
    let parser = Parser::new(js).expect("failed to create parser");
    let parts: Vec<_> = parser.collect::<Result<Vec<_>, _>>().expect("failed to parse");
    assert_eq!(parts.len(), 3);
}

#[test]
fn iterator_stops_after_error() {
    let _ = env_logger::try_init();
    let js = "var a = 1; var = ; var b = 2;";
    let mut parser = Parser::new(js).expect("failed to create parser");
    let mut errors = 0;
    for part in &mut parser {
        if part.is_err() {
            errors += 1;
        }
    }
    assert_eq!(errors, 1);
}

#[test]
fn reparse_is_stable() {
    let _ = env_logger::try_init();
    let js = "function fib(n) { return n < 2 ? n : fib(n - 1) + fib(n - 2); }
var x = [1, 2, 3].map(fib);";
    let first = parse(js);
    let second = parse(js);
    assert_eq!(first, second);
}
