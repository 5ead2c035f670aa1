//! esparse
//!
//! A recursive descent parser for the ES2015 flavor of JavaScript,
//! built on top of the [`ress`](https://docs.rs/ress) scanner. The
//! result of a parse is an ESTree shaped AST where every node knows
//! the source location it covers.
//!
//! The two major pieces you would interact with are the `Parser`
//! and the `node` module. A `Parser` can either be driven through
//! its `Iterator` implementation, yielding one top level item at a
//! time, or asked for the whole `Program` at once with `parse`.
//!
//! ```
//! use esparse::{Parser, node::{ProgramPart, Stmt}};
//!
//! fn main() {
//!     let js = "function helloWorld() { alert('Hello world'); }";
//!     let mut p = Parser::new(js).unwrap();
//!     let program = p.parse().unwrap();
//!     for part in program.parts() {
//!         println!("{:?}", part);
//!     }
//! }
//! ```
//!
//! Scripts are the default, modules (which are strict from the
//! first token) are requested through the `Builder`:
//!
//! ```
//! use esparse::Parser;
//!
//! fn main() {
//!     let js = "export default function () {}";
//!     let mut p = Parser::builder().js(js).module(true).build().unwrap();
//!     let module = p.parse().unwrap();
//!     println!("{:?}", module);
//! }
//! ```

pub mod node;

mod comment_handler;
mod error;
mod formal_params;
mod lhs;

pub use crate::comment_handler::{CommentHandler, DefaultCommentHandler};
pub use crate::error::Error;

use crate::formal_params::FormalParams;
use crate::node::*;
use ress::prelude::{Comment, Item, Keyword, Punct, Scanner, Token};
use ress::{Position, SourceLocation, Span};
use std::borrow::Cow;
use std::mem::replace;

/// The result type for all of the parsing operations
type Res<T> = Result<T, Error>;

/// The state of the parse, the `allow_in`, `allow_yield` and
/// `in_function_body` flags are only ever updated through
/// `Parser::with_ctx` so that they are guaranteed to be put back on
/// every exit path
struct Context<'a> {
    is_module: bool,
    strict: bool,
    found_directive_octal_escape: bool,
    allow_in: bool,
    allow_yield: bool,
    in_function_body: bool,
    allow_strict_directive: bool,
    has_line_term: bool,
    past_prolog: bool,
    errored: bool,
    is_assignment_target: bool,
    is_binding_element: bool,
    first_covert_initialized_name_error: Option<Item<&'a str>>,
}

impl<'a> Default for Context<'a> {
    fn default() -> Self {
        Self {
            is_module: false,
            strict: false,
            found_directive_octal_escape: false,
            allow_in: true,
            allow_yield: false,
            in_function_body: false,
            allow_strict_directive: true,
            has_line_term: false,
            past_prolog: false,
            errored: false,
            is_assignment_target: false,
            is_binding_element: false,
            first_covert_initialized_name_error: None,
        }
    }
}

impl<'a> Context<'a> {
    fn set_is_assignment_target(&mut self, value: bool) -> bool {
        let old = self.is_assignment_target;
        self.is_assignment_target = value;
        old
    }

    fn set_is_binding_element(&mut self, value: bool) -> bool {
        let old = self.is_binding_element;
        self.is_binding_element = value;
        old
    }
}

/// The subset of context flags a single sub-parse wants changed, an
/// empty override saves and restores the flags unchanged
#[derive(Clone, Copy, Default)]
struct ContextOverride {
    allow_in: Option<bool>,
    allow_yield: Option<bool>,
    in_function_body: Option<bool>,
}

impl ContextOverride {
    fn allow_in(mut self, value: bool) -> Self {
        self.allow_in = Some(value);
        self
    }

    fn allow_yield(mut self, value: bool) -> Self {
        self.allow_yield = Some(value);
        self
    }

    fn in_function_body(mut self, value: bool) -> Self {
        self.in_function_body = Some(value);
        self
    }
}

/// This is used to create a `Parser` using
/// the builder method
#[derive(Default)]
pub struct Builder<'b> {
    is_module: bool,
    js: &'b str,
}

impl<'b> Builder<'b> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Set the parsing context to module or script
    /// default: `false` (script)
    pub fn set_module(&mut self, value: bool) {
        self.is_module = value;
    }
    /// Set the parsing context to module or script
    /// with a builder pattern
    /// default: `false` (script)
    pub fn module(mut self, value: bool) -> Self {
        self.set_module(value);
        self
    }
    /// Set the js text that this parser would operate
    /// on
    pub fn set_js(&mut self, js: &'b str) {
        self.js = js;
    }
    /// Set the js text that this parser would operate
    /// on with a builder pattern
    pub fn js(mut self, js: &'b str) -> Self {
        self.set_js(js);
        self
    }
    /// Complete the builder pattern returning
    /// `Result<Parser, Error>`
    pub fn build(self) -> Res<Parser<'b, DefaultCommentHandler>> {
        let scanner = Scanner::new(self.js);
        Parser::build(self.is_module, scanner, DefaultCommentHandler)
    }
    /// Complete the builder pattern with a custom comment handler
    pub fn with_comment_handler<CH>(self, handler: CH) -> Res<Parser<'b, CH>>
    where
        CH: CommentHandler<'b>,
    {
        let scanner = Scanner::new(self.js);
        Parser::build(self.is_module, scanner, handler)
    }
}

/// This is the primary interface that you would interact with.
/// There are two main ways to use it, the first is to utilize
/// the `Iterator` implementation. Each iteration will return
/// a `Result<ProgramPart, Error>`.
/// The other option is to use the `parse` method, which is just
/// a wrapper around the `collect` method on `Iterator`, however
/// the final result will be a `Result<Program, Error>` and the
/// `ProgramPart` collection will be the inner data.
pub struct Parser<'a, CH> {
    /// The current parsing context
    context: Context<'a>,
    /// The internal scanner (see the
    /// `ress` crate for more details)
    scanner: Scanner<'a>,
    /// The next item
    look_ahead: Item<&'a str>,
    /// Since we are looking ahead, we need
    /// to make sure we don't miss the eof
    /// by using this flag
    found_eof: bool,
    /// The start of the token the parser is about to operate on
    current_position: Position,
    look_ahead_position: Position,
    /// The end of the most recently consumed token, this is what
    /// completes a node's location
    current_end: Position,
    pub comment_handler: CH,
}

impl<'a> Parser<'a, DefaultCommentHandler> {
    /// Create a new parser with the provided
    /// javascript. This will default to parsing
    /// in the script context and discard comments.
    /// If you wanted change this behavior
    /// utilize the `Builder` pattern
    pub fn new(text: &'a str) -> Res<Self> {
        let scanner = Scanner::new(text);
        let context = Context::default();
        Self::_new(scanner, context, DefaultCommentHandler)
    }
}

impl<'a> Parser<'a, ()> {
    pub fn builder() -> Builder<'a> {
        Builder::new()
    }
}

impl<'b, CH> Parser<'b, CH>
where
    CH: CommentHandler<'b> + Sized,
{
    /// Internal constructor for completing the builder pattern
    pub fn build(is_module: bool, scanner: Scanner<'b>, comment_handler: CH) -> Res<Self> {
        let context = Context {
            is_module,
            strict: is_module,
            ..Default::default()
        };
        Self::_new(scanner, context, comment_handler)
    }

    fn _new(scanner: Scanner<'b>, context: Context<'b>, comment_handler: CH) -> Res<Self> {
        let look_ahead = Item {
            token: Token::EoF,
            span: Span { start: 0, end: 0 },
            location: SourceLocation::new(Position::new(1, 0), Position::new(1, 0)),
        };
        let mut ret = Self {
            scanner,
            look_ahead,
            found_eof: false,
            context,
            current_position: Position { line: 1, column: 0 },
            look_ahead_position: Position { line: 1, column: 0 },
            current_end: Position { line: 1, column: 0 },
            comment_handler,
        };
        let _ = ret.next_item()?;
        Ok(ret)
    }

    /// Wrapper around the `Iterator` implementation,
    /// parses a full `Program` or returns the first failure
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn parse(&mut self) -> Res<Program<'b>> {
        log::debug!(
            "{}: parse {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.context.is_module {
            self.context.strict = true;
        }
        let body: Res<Vec<ProgramPart>> = self.collect();
        Ok(if self.context.is_module {
            Program::Mod(body?)
        } else {
            Program::Script(body?)
        })
    }

    pub(crate) fn next_part(&mut self) -> Res<ProgramPart<'b>> {
        log::trace!(
            "next_part past_prolog: {}, strict: {}",
            self.context.past_prolog,
            self.context.strict
        );
        if self.context.is_module {
            self.context.strict = true;
        }
        if !self.context.past_prolog {
            if self.look_ahead.is_string() {
                let (part, was_directive) = match self.parse_directive() {
                    Ok(part) => part,
                    Err(e) => {
                        self.context.errored = true;
                        return Err(e);
                    }
                };
                self.context.past_prolog = !was_directive;
                return Ok(part);
            } else {
                self.context.past_prolog = true;
            }
        }
        match self.parse_statement_list_item() {
            Ok(part) => Ok(part),
            Err(e) => {
                self.context.errored = true;
                Err(e)
            }
        }
    }

    /// Parse the directives at the top of a statement list into a
    /// run of expression statements, flipping the strict flag when
    /// `"use strict"` shows up
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_directive_prologues(&mut self) -> Res<Vec<ProgramPart<'b>>> {
        log::debug!(
            "{}: parse_directive_prologues {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let mut ret = Vec::new();
        loop {
            if !self.look_ahead.token.is_string() {
                break;
            }
            let (part, was_directive) = self.parse_directive()?;
            ret.push(part);
            if !was_directive {
                break;
            }
        }
        Ok(ret)
    }

    /// Parse a single candidate directive. The second half of the
    /// pair reports whether the statement really was one, the
    /// strictness decision is made from the raw token text rather
    /// than the cooked value
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_directive(&mut self) -> Res<(ProgramPart<'b>, bool)> {
        log::debug!(
            "{}: parse_directive {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let orig = self.look_ahead.clone();
        let start = self.look_ahead_position;
        let expr = self.parse_expression()?;
        let was_directive = if let Expr::Lit(Lit::String(_)) = &expr {
            if let Token::String(quoted) = &orig.token {
                let (contents, octal) = match quoted {
                    ress::prelude::StringLit::Double(inner)
                    | ress::prelude::StringLit::Single(inner) => {
                        (inner.content, inner.contains_octal_escape)
                    }
                };
                self.context.found_directive_octal_escape =
                    self.context.found_directive_octal_escape || octal;
                if contents == "use strict" {
                    if !self.context.allow_strict_directive {
                        return self
                            .unexpected_token_error(&orig, "`use strict` in an invalid location");
                    }
                    self.context.strict = true;
                }
                if self.context.strict && self.context.found_directive_octal_escape {
                    return Err(Error::OctalLiteral(orig.location.start));
                }
                true
            } else {
                false
            }
        } else {
            false
        };
        self.consume_semicolon()?;
        let stmt = Stmt::Expr(ExprStmt {
            expr,
            loc: self.node_loc(start),
        });
        Ok((ProgramPart::Stmt(stmt), was_directive))
    }

    /// This is where the recursive descent begins, import/export and
    /// the declaration keywords are picked off before handing the
    /// rest to `parse_statement`
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_statement_list_item(&mut self) -> Res<ProgramPart<'b>> {
        log::debug!("{}: parse_statement_list_item", self.look_ahead.span.start);
        self.context.set_is_assignment_target(true);
        self.context.set_is_binding_element(true);
        let tok = self.look_ahead.token.clone();
        match &tok {
            Token::Keyword(ref k) => match k {
                Keyword::Import(_) => {
                    if !self.context.is_module {
                        return Err(Error::UseOfModuleFeatureOutsideOfModule(
                            self.current_position,
                            "es6 import syntax".to_string(),
                        ));
                    }
                    let import = self.parse_import_decl()?;
                    Ok(ProgramPart::Decl(Decl::Import(Box::new(import))))
                }
                Keyword::Export(_) => {
                    let export = self.parse_export_decl()?;
                    Ok(ProgramPart::Decl(Decl::Export(Box::new(export))))
                }
                Keyword::Const(_) => {
                    let decl = self.parse_lexical_decl(false)?;
                    Ok(ProgramPart::Decl(decl))
                }
                Keyword::Function(_) => {
                    let func = self.parse_function_decl(false)?;
                    Ok(ProgramPart::Decl(Decl::Func(func)))
                }
                Keyword::Class(_) => {
                    let class = self.parse_class_decl(false)?;
                    Ok(ProgramPart::Decl(Decl::Class(class)))
                }
                Keyword::Let(_) => {
                    let part = if self.at_lexical_decl() {
                        let decl = self.parse_lexical_decl(false)?;
                        ProgramPart::Decl(decl)
                    } else {
                        let stmt = self.parse_statement()?;
                        ProgramPart::Stmt(stmt)
                    };
                    Ok(part)
                }
                Keyword::Var(_) => {
                    let start = self.look_ahead_position;
                    let _var = self.next_item()?;
                    let decls = self.parse_binding_list(VarKind::Var, false)?;
                    self.consume_semicolon()?;
                    let decls = VarDecls {
                        kind: VarKind::Var,
                        decls,
                        loc: self.node_loc(start),
                    };
                    Ok(ProgramPart::Decl(Decl::Var(decls)))
                }
                _ => {
                    let stmt = self.parse_statement()?;
                    Ok(ProgramPart::Stmt(stmt))
                }
            },
            _ => {
                let stmt = self.parse_statement()?;
                Ok(ProgramPart::Stmt(stmt))
            }
        }
    }

    /// This will cover all of the import statements
    /// ```js
    /// import * as Stuff from 'place'; //namespace
    /// import Thing from 'place'; //default
    /// import {Thing} from 'place'; //named
    /// import Person, {Thing} from 'place';// default + named
    /// import Thing, * as Stuff from 'place';
    /// import 'place';
    /// ```
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_import_decl(&mut self) -> Res<ModImport<'b>> {
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Import(()))?;
        // if the next token is a string we are at an import
        // with no specifiers
        if self.look_ahead.is_string() {
            let source = self.parse_module_specifier()?;
            self.consume_semicolon()?;
            return Ok(ModImport {
                specifiers: Vec::new(),
                source,
                loc: self.node_loc(start),
            });
        }
        let mut specifiers = Vec::new();
        let mut found_namespace = false;
        while !self.look_ahead.token.is_eof() {
            if self.at_contextual_keyword("from") {
                break;
            }
            if self.at_punct(Punct::OpenBrace) {
                self.parse_named_imports(&mut specifiers)?;
            } else if self.at_punct(Punct::Asterisk) {
                if found_namespace {
                    return self.unexpected_token_error(
                        &self.look_ahead,
                        "`*` can only appear once in an import statement",
                    );
                }
                found_namespace = true;
                let namespace = self.parse_import_namespace_specifier()?;
                specifiers.push(ImportSpecifier::Namespace(namespace));
            } else if self.at_possible_ident() && !self.at_keyword(Keyword::Default(())) {
                let default = self.parse_import_default_specifier()?;
                specifiers.push(ImportSpecifier::Default(default));
            } else {
                return self
                    .expected_token_error(&self.look_ahead, &["{", "*", "[ident]", "[string]"]);
            }
            if self.at_punct(Punct::Comma) {
                let _comma = self.next_item()?;
            }
        }
        self.expect_contextual_keyword("from")?;
        let source = self.parse_module_specifier()?;
        self.consume_semicolon()?;
        Ok(ModImport {
            specifiers,
            source,
            loc: self.node_loc(start),
        })
    }

    /// The named variant of imports, `import {Thing} from 'place'`
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier<'b>>) -> Res<()> {
        self.expect_punct(Punct::OpenBrace)?;
        while !self.at_punct(Punct::CloseBrace) {
            let spec = self.parse_import_specifier()?;
            specifiers.push(ImportSpecifier::Normal(spec));
            if !self.at_punct(Punct::CloseBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::CloseBrace)?;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_import_specifier(&mut self) -> Res<NormalImportSpec<'b>> {
        let start = self.look_ahead_position;
        // the imported name may be any identifier name, the local
        // binding may not
        let is_plain = self.look_ahead.token.is_ident();
        let imported = self.parse_ident_name()?;
        let alias = if self.at_contextual_keyword("as") {
            let _as = self.next_item()?;
            Some(self.parse_plain_ident()?)
        } else {
            if !is_plain {
                return self.expected_token_error(&self.look_ahead, &["as"]);
            }
            None
        };
        Ok(NormalImportSpec {
            imported,
            alias,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_import_namespace_specifier(&mut self) -> Res<NamespaceImportSpec<'b>> {
        let start = self.look_ahead_position;
        self.expect_punct(Punct::Asterisk)?;
        if !self.at_contextual_keyword("as") {
            return self.expected_token_error(&self.look_ahead, &["as"]);
        }
        let _as = self.next_item()?;
        let id = self.parse_plain_ident()?;
        Ok(NamespaceImportSpec {
            id,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_import_default_specifier(&mut self) -> Res<DefaultImportSpec<'b>> {
        let start = self.look_ahead_position;
        let id = self.parse_plain_ident()?;
        Ok(DefaultImportSpec {
            id,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_export_decl(&mut self) -> Res<ModExport<'b>> {
        log::debug!("{} parse_export_decl", self.look_ahead_position);
        if !self.context.is_module {
            return Err(Error::UseOfModuleFeatureOutsideOfModule(
                self.current_position,
                "export syntax".to_string(),
            ));
        }
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Export(()))?;
        if self.at_keyword(Keyword::Default(())) {
            let _default = self.next_item()?;
            let value = if self.at_keyword(Keyword::Function(())) {
                DefaultExportValue::Decl(Decl::Func(self.parse_function_decl(true)?))
            } else if self.at_keyword(Keyword::Class(())) {
                DefaultExportValue::Decl(Decl::Class(self.parse_class_decl(true)?))
            } else {
                let expr = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
                self.consume_semicolon()?;
                DefaultExportValue::Expr(expr)
            };
            return Ok(ModExport::Default(DefaultExportDecl {
                value,
                loc: self.node_loc(start),
            }));
        }
        if self.at_punct(Punct::Asterisk) {
            let _star = self.next_item()?;
            self.expect_contextual_keyword("from")?;
            let source = self.parse_module_specifier()?;
            self.consume_semicolon()?;
            return Ok(ModExport::All(ExportAllDecl {
                source,
                loc: self.node_loc(start),
            }));
        }
        if self.look_ahead.token.is_keyword() {
            let decl = if self.at_keyword(Keyword::Let(())) || self.at_keyword(Keyword::Const(())) {
                self.parse_lexical_decl(false)?
            } else if self.at_keyword(Keyword::Var(())) {
                let var_start = self.look_ahead_position;
                let _var = self.next_item()?;
                let decls = self.parse_binding_list(VarKind::Var, false)?;
                self.consume_semicolon()?;
                Decl::Var(VarDecls {
                    kind: VarKind::Var,
                    decls,
                    loc: self.node_loc(var_start),
                })
            } else if self.at_keyword(Keyword::Class(())) {
                Decl::Class(self.parse_class_decl(false)?)
            } else if self.at_keyword(Keyword::Function(())) {
                Decl::Func(self.parse_function_decl(false)?)
            } else {
                return self.expected_token_error(
                    &self.look_ahead,
                    &["let", "var", "const", "class", "function"],
                );
            };
            return Ok(ModExport::Named(NamedExportDecl {
                decl: Some(Box::new(decl)),
                specifiers: Vec::new(),
                source: None,
                loc: self.node_loc(start),
            }));
        }
        self.expect_punct(Punct::OpenBrace)?;
        let mut specifiers = Vec::new();
        let mut found_default = false;
        while !self.at_punct(Punct::CloseBrace) {
            found_default = found_default || self.at_keyword(Keyword::Default(()));
            specifiers.push(self.parse_export_specifier()?);
            if !self.at_punct(Punct::CloseBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::CloseBrace)?;
        let source = if self.at_contextual_keyword("from") {
            let _from = self.next_item()?;
            Some(self.parse_module_specifier()?)
        } else {
            if found_default {
                return self.unexpected_token_error(
                    &self.look_ahead,
                    "`default` in an export list requires a `from` clause",
                );
            }
            None
        };
        self.consume_semicolon()?;
        Ok(ModExport::Named(NamedExportDecl {
            decl: None,
            specifiers,
            source,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_export_specifier(&mut self) -> Res<ExportSpecifier<'b>> {
        let start = self.look_ahead_position;
        let local = self.parse_ident_name()?;
        let alias = if self.at_contextual_keyword("as") {
            let _as = self.next_item()?;
            Some(self.parse_ident_name()?)
        } else {
            None
        };
        Ok(ExportSpecifier {
            local,
            alias,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_module_specifier(&mut self) -> Res<Lit<'b>> {
        let item = self.next_item()?;
        match &item.token {
            Token::String(_) => Ok(Lit::String(self.string_lit_from(&item)?)),
            _ => self.expected_token_error(&item, &["[string]"]),
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_statement(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_statement {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let lh = self.look_ahead.token.clone();
        let stmt = match lh {
            Token::Boolean(_)
            | Token::Null
            | Token::Number(_)
            | Token::String(_)
            | Token::RegEx(_)
            | Token::Template(_) => self.parse_expression_statement()?,
            Token::Punct(ref p) => match p {
                Punct::OpenBrace => Stmt::Block(self.parse_block()?),
                Punct::OpenParen => self.parse_expression_statement()?,
                Punct::SemiColon => {
                    let semi = self.next_item()?;
                    Stmt::Empty(semi.location)
                }
                _ => self.parse_expression_statement()?,
            },
            Token::Ident(_) => self.parse_labelled_statement()?,
            Token::Keyword(ref k) => match k {
                Keyword::Break(_) => self.parse_break_stmt()?,
                Keyword::Continue(_) => self.parse_continue_stmt()?,
                Keyword::Debugger(_) => self.parse_debugger_stmt()?,
                Keyword::Do(_) => Stmt::DoWhile(self.parse_do_while_stmt()?),
                Keyword::For(_) => self.parse_for_stmt()?,
                Keyword::Function(_) => {
                    let func = self.parse_function_decl(false)?;
                    let loc = func.loc;
                    Stmt::Expr(ExprStmt {
                        expr: Expr::Func(func),
                        loc,
                    })
                }
                Keyword::If(_) => Stmt::If(self.parse_if_stmt()?),
                Keyword::Return(_) => self.parse_return_stmt()?,
                Keyword::Switch(_) => Stmt::Switch(self.parse_switch_stmt()?),
                Keyword::Throw(_) => self.parse_throw_stmt()?,
                Keyword::Try(_) => Stmt::Try(self.parse_try_stmt()?),
                Keyword::Var(_) => self.parse_var_stmt()?,
                Keyword::While(_) => Stmt::While(self.parse_while_stmt()?),
                Keyword::With(_) => Stmt::With(self.parse_with_stmt()?),
                Keyword::Yield(_) if !self.context.strict => self.parse_labelled_statement()?,
                _ => self.parse_expression_statement()?,
            },
            _ => return self.expected_token_error(&self.look_ahead, &["statement"]),
        };
        Ok(stmt)
    }

    /// `with` parses the same in strict and sloppy code
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_with_stmt(&mut self) -> Res<WithStmt<'b>> {
        log::debug!(
            "{}: parse_with_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::With(()))?;
        self.expect_punct(Punct::OpenParen)?;
        let object = self.parse_expression()?;
        self.expect_punct(Punct::CloseParen)?;
        let body = self.parse_statement()?;
        Ok(WithStmt {
            object,
            body: Box::new(body),
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_while_stmt(&mut self) -> Res<WhileStmt<'b>> {
        log::debug!(
            "{}: parse_while_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::While(()))?;
        self.expect_punct(Punct::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect_punct(Punct::CloseParen)?;
        let body = self.parse_statement()?;
        Ok(WhileStmt {
            test,
            body: Box::new(body),
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_do_while_stmt(&mut self) -> Res<DoWhileStmt<'b>> {
        log::debug!(
            "{}: parse_do_while_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Do(()))?;
        let body = self.parse_statement()?;
        self.expect_keyword(Keyword::While(()))?;
        self.expect_punct(Punct::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect_punct(Punct::CloseParen)?;
        if self.at_punct(Punct::SemiColon) {
            let _semi = self.next_item()?;
        }
        Ok(DoWhileStmt {
            body: Box::new(body),
            test,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_var_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_var_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Var(()))?;
        let decls = self.parse_binding_list(VarKind::Var, false)?;
        self.consume_semicolon()?;
        Ok(Stmt::Var(VarDecls {
            kind: VarKind::Var,
            decls,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_try_stmt(&mut self) -> Res<TryStmt<'b>> {
        log::debug!(
            "{}: parse_try_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Try(()))?;
        let block = self.parse_block()?;
        let handler = if self.at_keyword(Keyword::Catch(())) {
            Some(self.parse_catch_clause()?)
        } else {
            None
        };
        let finalizer = if self.at_keyword(Keyword::Finally(())) {
            let _finally = self.next_item()?;
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(Error::TryWithNoCatchOrFinally(self.current_position));
        }
        Ok(TryStmt {
            block,
            handler,
            finalizer,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_catch_clause(&mut self) -> Res<CatchClause<'b>> {
        log::debug!(
            "{}: parse_catch_clause {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Catch(()))?;
        self.expect_punct(Punct::OpenParen)?;
        if self.at_punct(Punct::CloseParen) {
            return Err(Error::InvalidCatchArg(self.current_position));
        }
        let param = self.parse_pattern(false)?;
        if !self.at_punct(Punct::CloseParen) {
            return Err(Error::InvalidCatchArg(self.current_position));
        }
        self.expect_punct(Punct::CloseParen)?;
        let body = self.parse_block()?;
        Ok(CatchClause {
            param,
            body,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_throw_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_throw_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Throw(()))?;
        if self.context.has_line_term || self.at_punct(Punct::SemiColon) {
            return Err(Error::ThrowWithNoArg(self.current_position));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Stmt::Throw(ThrowStmt {
            argument,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_switch_stmt(&mut self) -> Res<SwitchStmt<'b>> {
        log::debug!(
            "{}: parse_switch_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Switch(()))?;
        self.expect_punct(Punct::OpenParen)?;
        let discriminant = self.parse_expression()?;
        self.expect_punct(Punct::CloseParen)?;
        self.expect_punct(Punct::OpenBrace)?;
        let mut found_default = false;
        let mut cases = Vec::new();
        loop {
            if self.at_punct(Punct::CloseBrace) {
                break;
            }
            let case = self.parse_switch_case()?;
            if case.test.is_none() {
                if found_default {
                    return Err(Error::MultipleDefaults(self.look_ahead_position));
                }
                found_default = true;
            }
            cases.push(case);
        }
        self.expect_punct(Punct::CloseBrace)?;
        Ok(SwitchStmt {
            discriminant,
            cases,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_switch_case(&mut self) -> Res<SwitchCase<'b>> {
        log::debug!(
            "{}: parse_switch_case {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let test = if self.at_keyword(Keyword::Default(())) {
            let _default = self.next_item()?;
            None
        } else {
            self.expect_keyword(Keyword::Case(()))?;
            Some(self.parse_expression()?)
        };
        self.expect_punct(Punct::Colon)?;
        let mut consequent = Vec::new();
        loop {
            if self.at_punct(Punct::CloseBrace)
                || self.at_keyword(Keyword::Default(()))
                || self.at_keyword(Keyword::Case(()))
            {
                break;
            }
            consequent.push(self.parse_statement_list_item()?)
        }
        Ok(SwitchCase {
            test,
            consequent,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_return_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_return_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if !self.context.in_function_body {
            return self
                .unexpected_token_error(&self.look_ahead, "cannot return in the global context");
        }
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Return(()))?;
        let argument = if self.at_return_arg() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(Stmt::Return(ReturnStmt {
            argument,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_if_stmt(&mut self) -> Res<IfStmt<'b>> {
        log::debug!(
            "{}: parse_if_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::If(()))?;
        self.expect_punct(Punct::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect_punct(Punct::CloseParen)?;
        let consequent = self.parse_if_clause()?;
        let alternate = if self.at_keyword(Keyword::Else(())) {
            let _else = self.next_item()?;
            Some(Box::new(self.parse_if_clause()?))
        } else {
            None
        };
        Ok(IfStmt {
            test,
            consequent: Box::new(consequent),
            alternate,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_if_clause(&mut self) -> Res<Stmt<'b>> {
        if self.context.strict && self.at_keyword(Keyword::Function(())) {
            return self.unexpected_token_error(
                &self.look_ahead,
                "function declarations cannot be the body of an if in strict mode",
            );
        }
        self.parse_statement()
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_for_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_for_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::For(()))?;
        self.expect_punct(Punct::OpenParen)?;
        if self.at_punct(Punct::SemiColon) {
            // any leading semi-colon means a C style loop
            // for (;;) {}
            return Ok(Stmt::For(self.parse_for_loop_cont(start, None)?));
        }
        let init_start = self.look_ahead_position;
        if self.at_keyword(Keyword::Var(())) {
            let _var = self.next_item()?;
            let mut bindings = self.with_ctx(ContextOverride::default().allow_in(false), |me| {
                me.parse_binding_list(VarKind::Var, true)
            })?;
            if bindings.len() == 1 {
                let decl = if let Some(d) = bindings.pop() {
                    d
                } else {
                    return self.expected_token_error(&self.look_ahead, &["variable decl"]);
                };
                if self.at_keyword(Keyword::In(())) {
                    let left = LoopLeft::Variable(VarDecls {
                        kind: VarKind::Var,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    let _in = self.next_item()?;
                    let right = self.parse_expression()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForIn(ForInStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                } else if self.at_contextual_keyword("of") {
                    if decl.init.is_some() {
                        return Err(Error::InvalidLHS(init_start));
                    }
                    let left = LoopLeft::Variable(VarDecls {
                        kind: VarKind::Var,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    let _of = self.next_item()?;
                    let right = self.parse_assignment_expr()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForOf(ForOfStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                } else {
                    let init = LoopInit::Variable(VarDecls {
                        kind: VarKind::Var,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    Ok(Stmt::For(self.parse_for_loop_cont(start, Some(init))?))
                }
            } else {
                let init = LoopInit::Variable(VarDecls {
                    kind: VarKind::Var,
                    decls: bindings,
                    loc: SourceLocation::new(init_start, self.current_end),
                });
                Ok(Stmt::For(self.parse_for_loop_cont(start, Some(init))?))
            }
        } else if self.at_keyword(Keyword::Const(())) || self.at_keyword(Keyword::Let(())) {
            let kind_item = self.next_item()?;
            let kind = if kind_item.token.matches_keyword(Keyword::Const(())) {
                VarKind::Const
            } else {
                VarKind::Let
            };
            if !self.context.strict && self.look_ahead.token.matches_keyword(Keyword::In(())) {
                // `for (let in obj)`, the keyword becomes an ident
                let left = LoopLeft::Expr(Expr::Ident(Ident {
                    name: self.slice_text(&kind_item)?,
                    loc: kind_item.location,
                }));
                let _in = self.next_item()?;
                let right = self.parse_expression()?;
                self.expect_punct(Punct::CloseParen)?;
                let body = self.parse_loop_body()?;
                return Ok(Stmt::ForIn(ForInStmt {
                    left,
                    right,
                    body: Box::new(body),
                    loc: self.node_loc(start),
                }));
            }
            let mut decls = self.with_ctx(ContextOverride::default().allow_in(false), |me| {
                me.parse_binding_list(kind, true)
            })?;
            if decls.len() == 1 {
                let decl = if let Some(d) = decls.pop() {
                    d
                } else {
                    return self.expected_token_error(&self.look_ahead, &["variable decl"]);
                };
                if decl.init.is_none() && self.at_keyword(Keyword::In(())) {
                    let left = LoopLeft::Variable(VarDecls {
                        kind,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    let _in = self.next_item()?;
                    let right = self.parse_expression()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForIn(ForInStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                } else if decl.init.is_none() && self.at_contextual_keyword("of") {
                    let left = LoopLeft::Variable(VarDecls {
                        kind,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    let _of = self.next_item()?;
                    let right = self.parse_assignment_expr()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForOf(ForOfStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                } else {
                    let init = LoopInit::Variable(VarDecls {
                        kind,
                        loc: SourceLocation::new(init_start, decl.loc.end),
                        decls: vec![decl],
                    });
                    Ok(Stmt::For(self.parse_for_loop_cont(start, Some(init))?))
                }
            } else {
                let init = LoopInit::Variable(VarDecls {
                    kind,
                    decls,
                    loc: SourceLocation::new(init_start, self.current_end),
                });
                Ok(Stmt::For(self.parse_for_loop_cont(start, Some(init))?))
            }
        } else {
            let init = self.with_ctx(ContextOverride::default().allow_in(false), |me| {
                me.inherit_cover_grammar(Self::parse_assignment_expr)
            })?;
            if self.at_keyword(Keyword::In(())) || self.at_contextual_keyword("of") {
                if let Expr::Assign(_) = init {
                    return Err(Error::InvalidLHS(init_start));
                }
                let left = if Self::is_reinterpret_target(&init) {
                    LoopLeft::Pat(self.reinterpret_expr_as_pat(init)?)
                } else {
                    lhs::check_loop_head_expr(&init, init_start)?;
                    LoopLeft::Expr(init)
                };
                if self.at_keyword(Keyword::In(())) {
                    let _in = self.next_item()?;
                    let right = self.parse_expression()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForIn(ForInStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                } else {
                    let _of = self.next_item()?;
                    let right = self.parse_assignment_expr()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let body = self.parse_loop_body()?;
                    Ok(Stmt::ForOf(ForOfStmt {
                        left,
                        right,
                        body: Box::new(body),
                        loc: self.node_loc(start),
                    }))
                }
            } else {
                let init = if self.at_punct(Punct::Comma) {
                    let mut seq = vec![init];
                    while self.at_punct(Punct::Comma) {
                        let _comma = self.next_item()?;
                        seq.push(self.isolate_cover_grammar(Self::parse_assignment_expr)?);
                    }
                    let loc = SourceLocation::new(seq[0].loc().start, self.current_end);
                    LoopInit::Expr(Expr::Sequence(SequenceExpr {
                        expressions: seq,
                        loc,
                    }))
                } else {
                    LoopInit::Expr(init)
                };
                Ok(Stmt::For(self.parse_for_loop_cont(start, Some(init))?))
            }
        }
    }

    /// Finish a C style loop, the head was parsed up to (but not
    /// including) the first semi-colon
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_for_loop_cont(
        &mut self,
        start: Position,
        init: Option<LoopInit<'b>>,
    ) -> Res<ForStmt<'b>> {
        log::debug!(
            "{}: parse_for_loop_cont {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        self.expect_punct(Punct::SemiColon)?;
        let test = if self.at_punct(Punct::SemiColon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_punct(Punct::SemiColon)?;
        let update = if self.at_punct(Punct::CloseParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_punct(Punct::CloseParen)?;
        let body = self.parse_loop_body()?;
        Ok(ForStmt {
            init,
            test,
            update,
            body: Box::new(body),
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_loop_body(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_loop_body {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        self.isolate_cover_grammar(|me| me.parse_statement())
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_break_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_break_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let (label, loc) = self.parse_optionally_labeled_statement(Keyword::Break(()))?;
        Ok(Stmt::Break(BreakStmt { label, loc }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_continue_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_continue_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let (label, loc) = self.parse_optionally_labeled_statement(Keyword::Continue(()))?;
        Ok(Stmt::Continue(ContinueStmt { label, loc }))
    }

    /// `break` and `continue` take an optional label, restricted to
    /// the same logical line
    fn parse_optionally_labeled_statement(
        &mut self,
        k: Keyword<()>,
    ) -> Res<(Option<Ident<'b>>, SourceLocation)> {
        let start = self.look_ahead_position;
        self.expect_keyword(k)?;
        let label = if self.look_ahead.token.is_ident() && !self.context.has_line_term {
            Some(self.parse_var_ident(false)?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok((label, self.node_loc(start)))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_debugger_stmt(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_debugger_stmt {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Debugger(()))?;
        self.consume_semicolon()?;
        Ok(Stmt::Debugger(self.node_loc(start)))
    }

    /// An identifier in statement position is either a label or the
    /// start of an expression statement, the `:` decides
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_labelled_statement(&mut self) -> Res<Stmt<'b>> {
        log::debug!("parse_labelled_statement, {:?}", self.look_ahead.token);
        let start = self.look_ahead_position;
        let expr = self.parse_expression()?;
        if expr.is_ident() && self.at_punct(Punct::Colon) {
            let _colon = self.next_item()?;
            let label = expr.as_ident()?;
            let body = if self.at_keyword(Keyword::Function(())) {
                if self.context.strict {
                    return Err(Error::LabelledFunctionInStrict(self.look_ahead_position));
                }
                let func = self.parse_function_decl(false)?;
                let loc = func.loc;
                Stmt::Expr(ExprStmt {
                    expr: Expr::Func(func),
                    loc,
                })
            } else {
                self.parse_statement()?
            };
            return Ok(Stmt::Labeled(LabeledStmt {
                label,
                body: Box::new(body),
                loc: self.node_loc(start),
            }));
        }
        self.consume_semicolon()?;
        Ok(Stmt::Expr(ExprStmt {
            expr,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_expression_statement(&mut self) -> Res<Stmt<'b>> {
        log::debug!(
            "{}: parse_expression_statement {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expr_stmt_guard()?;
        let expr = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Stmt::Expr(ExprStmt {
            expr,
            loc: self.node_loc(start),
        }))
    }

    /// The tokens that can never start an expression statement, a
    /// brace, `function`, `class` and the two token sequence `let [`
    #[tracing::instrument(level = "trace", skip(self))]
    fn expr_stmt_guard(&mut self) -> Res<()> {
        let start = self.look_ahead_position;
        match &self.look_ahead.token {
            Token::Keyword(Keyword::Let(_)) => {
                if let Some(peek) = self.scanner.look_ahead() {
                    if let Ok(peek) = &peek {
                        if peek.token.matches_punct(Punct::OpenBracket) {
                            return Err(Error::InvalidStartOfExpressionStmt(
                                start,
                                "let [".to_string(),
                            ));
                        }
                    }
                }
            }
            Token::Keyword(Keyword::Function(_)) => {
                return Err(Error::InvalidStartOfExpressionStmt(
                    start,
                    "function".to_string(),
                ));
            }
            Token::Keyword(Keyword::Class(_)) => {
                return Err(Error::InvalidStartOfExpressionStmt(
                    start,
                    "class".to_string(),
                ));
            }
            Token::Punct(Punct::OpenBrace) => {
                return Err(Error::InvalidStartOfExpressionStmt(start, "{".to_string()));
            }
            _ => (),
        }
        Ok(())
    }

    /// A comma separated run of assignment expressions folds into a
    /// sequence expression
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_expression(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_expression {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let ret = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
        if self.at_punct(Punct::Comma) {
            let mut list = vec![ret];
            while !self.look_ahead.token.is_eof() {
                if !self.at_punct(Punct::Comma) {
                    break;
                }
                let _comma = self.next_item()?;
                list.push(self.isolate_cover_grammar(Self::parse_assignment_expr)?);
            }
            let loc = SourceLocation::new(list[0].loc().start, self.current_end);
            return Ok(Expr::Sequence(SequenceExpr {
                expressions: list,
                loc,
            }));
        }
        Ok(ret)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_block(&mut self) -> Res<BlockStmt<'b>> {
        log::debug!(
            "{}: parse_block {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBrace)?;
        let mut stmts = Vec::new();
        loop {
            if self.at_punct(Punct::CloseBrace) {
                break;
            }
            let part = self.parse_statement_list_item()?;
            if let ProgramPart::Decl(Decl::Import(_)) | ProgramPart::Decl(Decl::Export(_)) = &part
            {
                return Err(Error::OperationError(
                    self.current_position,
                    "import/export is only valid at the top level of a module".to_string(),
                ));
            }
            stmts.push(part);
        }
        self.expect_punct(Punct::CloseBrace)?;
        Ok(BlockStmt {
            stmts,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_lexical_decl(&mut self, in_for: bool) -> Res<Decl<'b>> {
        log::debug!(
            "{}: parse_lexical_decl {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let next = self.next_item()?;
        let kind = match &next.token {
            Token::Keyword(Keyword::Let(_)) => VarKind::Let,
            Token::Keyword(Keyword::Const(_)) => VarKind::Const,
            _ => return self.expected_token_error(&next, &["let", "const"]),
        };
        let decls = self.parse_binding_list(kind, in_for)?;
        self.consume_semicolon()?;
        Ok(Decl::Var(VarDecls {
            kind,
            decls,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_binding_list(&mut self, kind: VarKind, in_for: bool) -> Res<Vec<VarDecl<'b>>> {
        log::debug!(
            "{}: parse_binding_list {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let mut ret = vec![self.parse_lexical_binding(kind, in_for)?];
        while self.at_punct(Punct::Comma) {
            let _comma = self.next_item()?;
            ret.push(self.parse_lexical_binding(kind, in_for)?);
        }
        Ok(ret)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_lexical_binding(&mut self, kind: VarKind, in_for: bool) -> Res<VarDecl<'b>> {
        log::debug!(
            "{}: parse_lexical_binding {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let id = self.parse_pattern(kind == VarKind::Var)?;
        let init = if kind == VarKind::Const {
            if !self.at_keyword(Keyword::In(())) && !self.at_contextual_keyword("of") {
                if self.at_punct(Punct::Equal) {
                    let _eq = self.next_item()?;
                    Some(self.isolate_cover_grammar(Self::parse_assignment_expr)?)
                } else {
                    return self.expected_token_error(&self.look_ahead, &["="]);
                }
            } else {
                None
            }
        } else if !in_for && !id.is_ident() || self.at_punct(Punct::Equal) {
            self.expect_punct(Punct::Equal)?;
            Some(self.isolate_cover_grammar(Self::parse_assignment_expr)?)
        } else {
            None
        };
        Ok(VarDecl {
            id,
            init,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_function_decl(&mut self, opt_ident: bool) -> Res<Func<'b>> {
        log::debug!(
            "{}: parse_function_decl {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Function(()))?;
        let is_gen = if self.at_punct(Punct::Asterisk) {
            let _star = self.next_item()?;
            true
        } else {
            false
        };
        let id = if !opt_ident || !self.at_punct(Punct::OpenParen) {
            Some(self.parse_var_ident(false)?)
        } else {
            None
        };
        self.parse_func_tail(start, id, is_gen)
    }

    /// The parameter list and body of any non-arrow function. The
    /// strict flag is saved around the body so a `"use strict"`
    /// prologue does not leak out of it
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_func_tail(
        &mut self,
        start: Position,
        id: Option<Ident<'b>>,
        is_gen: bool,
    ) -> Res<Func<'b>> {
        self.with_ctx(ContextOverride::default().allow_yield(is_gen), |me| {
            let params = me.parse_formal_params()?;
            let prev_strict = me.context.strict;
            let prev_oct = me.context.found_directive_octal_escape;
            let prev_allow_strict = me.context.allow_strict_directive;
            me.context.allow_strict_directive = params.simple;
            let body = me.parse_function_source_el();
            me.context.strict = prev_strict;
            me.context.found_directive_octal_escape = prev_oct;
            me.context.allow_strict_directive = prev_allow_strict;
            Ok(Func {
                id,
                params: params.params,
                body: body?,
                generator: is_gen,
                loc: me.node_loc(start),
            })
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_function_source_el(&mut self) -> Res<FuncBody<'b>> {
        log::debug!(
            "{}: parse_function_source_el {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBrace)?;
        self.with_ctx(ContextOverride::default().in_function_body(true), |me| {
            let mut body = me.parse_directive_prologues()?;
            while !me.look_ahead.token.is_eof() {
                if me.at_punct(Punct::CloseBrace) {
                    break;
                }
                body.push(me.parse_statement_list_item()?)
            }
            me.expect_punct(Punct::CloseBrace)?;
            Ok(FuncBody {
                stmts: body,
                loc: me.node_loc(start),
            })
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_formal_params(&mut self) -> Res<FormalParams<'b>> {
        log::debug!(
            "{}: parse_formal_params {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        self.expect_punct(Punct::OpenParen)?;
        let mut params = Vec::new();
        let mut simple = true;
        if !self.at_punct(Punct::CloseParen) {
            while !self.look_ahead.token.is_eof() {
                let arg = self.parse_formal_param()?;
                simple = simple && arg.is_simple();
                params.push(arg);
                if self.at_punct(Punct::CloseParen) {
                    break;
                }
                self.expect_punct(Punct::Comma)?;
                if self.at_punct(Punct::CloseParen) {
                    break;
                }
            }
        }
        self.expect_punct(Punct::CloseParen)?;
        Ok(FormalParams::new(params, simple))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_formal_param(&mut self) -> Res<FuncArg<'b>> {
        log::debug!(
            "{}: parse_formal_param {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let param = if self.at_punct(Punct::Ellipsis) {
            Pat::Rest(Box::new(self.parse_rest_element()?))
        } else {
            self.parse_pattern_with_default()?
        };
        Ok(FuncArg::Pat(param))
    }

    /// A rest element in a parameter list or arrow cover, it must be
    /// the last parameter and cannot take a default
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_rest_element(&mut self) -> Res<RestPat<'b>> {
        log::debug!(
            "{}: parse_rest_element {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::Ellipsis)?;
        let argument = self.parse_pattern(false)?;
        if self.at_punct(Punct::Equal) {
            return self.expected_token_error(&self.look_ahead, &["not assignment"]);
        }
        if !self.at_punct(Punct::CloseParen) {
            return self.expected_token_error(&self.look_ahead, &[")"]);
        }
        Ok(RestPat {
            argument,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_binding_rest_el(&mut self) -> Res<RestPat<'b>> {
        log::debug!(
            "{}: parse_binding_rest_el {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::Ellipsis)?;
        let argument = self.parse_pattern(false)?;
        Ok(RestPat {
            argument,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_pattern_with_default(&mut self) -> Res<Pat<'b>> {
        log::debug!(
            "{}: parse_pattern_with_default {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let ret = self.parse_pattern(true)?;
        if self.at_punct(Punct::Equal) {
            let _eq = self.next_item()?;
            let right = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
            return Ok(Pat::Assign(AssignPat {
                left: Box::new(ret),
                right: Box::new(right),
                loc: self.node_loc(start),
            }));
        }
        Ok(ret)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_pattern(&mut self, is_var: bool) -> Res<Pat<'b>> {
        log::debug!(
            "{}: parse_pattern {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.at_punct(Punct::OpenBracket) {
            self.parse_array_pattern()
        } else if self.at_punct(Punct::OpenBrace) {
            self.parse_object_pattern()
        } else {
            let ident = self.parse_var_ident(is_var)?;
            if !is_var && ident.matches("let") {
                return self.expected_token_error(&self.look_ahead, &["identifier"]);
            }
            Ok(Pat::Ident(ident))
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_array_pattern(&mut self) -> Res<Pat<'b>> {
        log::debug!(
            "{}: parse_array_pattern {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBracket)?;
        let mut elements = Vec::new();
        while !self.at_punct(Punct::CloseBracket) {
            if self.at_punct(Punct::Comma) {
                // an elision
                let _comma = self.next_item()?;
                elements.push(None);
            } else {
                if self.at_punct(Punct::Ellipsis) {
                    let rest = self.parse_binding_rest_el()?;
                    elements.push(Some(ArrayPatPart::Pat(Pat::Rest(Box::new(rest)))));
                    break;
                } else {
                    elements.push(Some(ArrayPatPart::Pat(self.parse_pattern_with_default()?)));
                }
                if !self.at_punct(Punct::CloseBracket) {
                    self.expect_punct(Punct::Comma)?;
                }
            }
        }
        self.expect_punct(Punct::CloseBracket)?;
        Ok(Pat::Array(ArrayPat {
            elements,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_object_pattern(&mut self) -> Res<Pat<'b>> {
        log::debug!(
            "{}: parse_object_pattern {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBrace)?;
        let mut props = Vec::new();
        while !self.at_punct(Punct::CloseBrace) {
            props.push(self.parse_property_pattern()?);
            if !self.at_punct(Punct::CloseBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::CloseBrace)?;
        Ok(Pat::Obj(ObjPat {
            props,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_property_pattern(&mut self) -> Res<Prop<'b>> {
        log::debug!(
            "{}: parse_property_pattern {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        if self.look_ahead.token.is_ident() {
            let ident = self.parse_var_ident(false)?;
            if self.at_punct(Punct::Equal) {
                let _eq = self.next_item()?;
                let right = self.parse_assignment_expr()?;
                let loc = self.node_loc(start);
                let value = Pat::Assign(AssignPat {
                    left: Box::new(Pat::Ident(ident.clone())),
                    right: Box::new(right),
                    loc,
                });
                return Ok(Prop {
                    key: PropKey::Ident(ident),
                    value: PropValue::Pat(value),
                    kind: PropKind::Init,
                    method: false,
                    shorthand: true,
                    computed: false,
                    loc,
                });
            }
            if !self.at_punct(Punct::Colon) {
                return Ok(Prop {
                    key: PropKey::Ident(ident),
                    value: PropValue::None,
                    kind: PropKind::Init,
                    method: false,
                    shorthand: true,
                    computed: false,
                    loc: self.node_loc(start),
                });
            }
            let _colon = self.next_item()?;
            let value = self.parse_pattern_with_default()?;
            Ok(Prop {
                key: PropKey::Ident(ident),
                value: PropValue::Pat(value),
                kind: PropKind::Init,
                method: false,
                shorthand: false,
                computed: false,
                loc: self.node_loc(start),
            })
        } else {
            let computed = self.at_punct(Punct::OpenBracket);
            let key = self.parse_object_property_key()?;
            self.expect_punct(Punct::Colon)?;
            let value = self.parse_pattern_with_default()?;
            Ok(Prop {
                key,
                value: PropValue::Pat(value),
                kind: PropKind::Init,
                method: false,
                shorthand: false,
                computed,
                loc: self.node_loc(start),
            })
        }
    }

    /// Classes are always strict, the previous strictness is put
    /// back once the body completes
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_class_decl(&mut self, opt_ident: bool) -> Res<Class<'b>> {
        log::debug!(
            "{}: parse_class_decl {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let prev_strict = self.context.strict;
        let prev_oct = self.context.found_directive_octal_escape;
        self.context.strict = true;
        self.expect_keyword(Keyword::Class(()))?;
        let id = if opt_ident && !self.look_ahead.token.is_ident() {
            None
        } else {
            Some(self.parse_plain_ident()?)
        };
        let super_class = if self.at_keyword(Keyword::Extends(())) {
            let _extends = self.next_item()?;
            let expr = self.isolate_cover_grammar(Self::parse_left_hand_side_expr_allow_call)?;
            Some(Box::new(expr))
        } else {
            None
        };
        let body = self.parse_class_body()?;
        self.context.strict = prev_strict;
        self.context.found_directive_octal_escape = prev_oct;
        Ok(Class {
            id,
            super_class,
            body,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_class_body(&mut self) -> Res<ClassBody<'b>> {
        log::debug!(
            "{}: parse_class_body {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let mut elements = Vec::new();
        let mut has_ctor = false;
        self.expect_punct(Punct::OpenBrace)?;
        while !self.at_punct(Punct::CloseBrace) {
            if self.at_punct(Punct::SemiColon) {
                let _semi = self.next_item()?;
            } else {
                let el = self.parse_class_el(has_ctor)?;
                has_ctor = has_ctor || el.kind == MethodKind::Constructor;
                elements.push(el)
            }
        }
        self.expect_punct(Punct::CloseBrace)?;
        Ok(ClassBody {
            elements,
            loc: self.node_loc(start),
        })
    }

    /// A single class element. `static`, `get`, `set` and `*` are
    /// all contextual here, any of them followed immediately by `(`
    /// is actually a method name
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_class_el(&mut self, has_ctor: bool) -> Res<MethodDef<'b>> {
        log::debug!(
            "{}: parse_class_el {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let mut is_static = false;
        if self.at_contextual_keyword("static") {
            let static_item = self.next_item()?;
            if self.at_punct(Punct::OpenParen) {
                let key = PropKey::Ident(self.ident_from(&static_item)?);
                return self.method_def_cont(start, key, false, false, MethodKind::Method, false);
            }
            is_static = true;
        }
        let mut kind = MethodKind::Method;
        let mut is_gen = false;
        let mut computed = false;
        let key = if self.at_punct(Punct::Asterisk) {
            let _star = self.next_item()?;
            is_gen = true;
            computed = self.at_punct(Punct::OpenBracket);
            self.parse_object_property_key()?
        } else if self.at_contextual_keyword("get") {
            let get_item = self.next_item()?;
            if self.at_punct(Punct::OpenParen) {
                PropKey::Ident(self.ident_from(&get_item)?)
            } else {
                kind = MethodKind::Get;
                computed = self.at_punct(Punct::OpenBracket);
                self.parse_object_property_key()?
            }
        } else if self.at_contextual_keyword("set") {
            let set_item = self.next_item()?;
            if self.at_punct(Punct::OpenParen) {
                PropKey::Ident(self.ident_from(&set_item)?)
            } else {
                kind = MethodKind::Set;
                computed = self.at_punct(Punct::OpenBracket);
                self.parse_object_property_key()?
            }
        } else {
            computed = self.at_punct(Punct::OpenBracket);
            self.parse_object_property_key()?
        };
        if kind == MethodKind::Method
            && !computed
            && !is_static
            && !is_gen
            && matches!(&key, PropKey::Ident(id) if id.matches("constructor"))
        {
            if has_ctor {
                return Err(Error::DuplicateCtor(start));
            }
            kind = MethodKind::Constructor;
        }
        self.method_def_cont(start, key, computed, is_static, kind, is_gen)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn method_def_cont(
        &mut self,
        start: Position,
        key: PropKey<'b>,
        computed: bool,
        is_static: bool,
        kind: MethodKind,
        is_gen: bool,
    ) -> Res<MethodDef<'b>> {
        log::debug!(
            "{}: method_def_cont {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let value = match kind {
            MethodKind::Get => self.parse_getter_method()?,
            MethodKind::Set => self.parse_setter_method()?,
            _ => self.parse_method_fn(is_gen)?,
        };
        Ok(MethodDef {
            key,
            value,
            kind,
            computed,
            is_static,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_getter_method(&mut self) -> Res<Func<'b>> {
        log::debug!(
            "{}: parse_getter_method {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let params = self.parse_formal_params()?;
        if !params.params.is_empty() {
            return Err(Error::InvalidGetterParams(start));
        }
        let body = self.with_ctx(ContextOverride::default().allow_yield(false), |me| {
            me.parse_method_body(params.simple)
        })?;
        Ok(Func {
            id: None,
            params: params.params,
            body,
            generator: false,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_setter_method(&mut self) -> Res<Func<'b>> {
        log::debug!(
            "{}: parse_setter_method {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let params = self.parse_formal_params()?;
        if params.params.len() != 1 {
            return Err(Error::InvalidSetterParams(start));
        }
        if let Some(FuncArg::Pat(Pat::Rest(_))) = params.params.first() {
            return Err(Error::InvalidSetterParams(start));
        }
        let body = self.with_ctx(ContextOverride::default().allow_yield(false), |me| {
            me.parse_method_body(params.simple)
        })?;
        Ok(Func {
            id: None,
            params: params.params,
            body,
            generator: false,
            loc: self.node_loc(start),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_method_fn(&mut self, is_gen: bool) -> Res<Func<'b>> {
        log::debug!(
            "{}: parse_method_fn {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.with_ctx(ContextOverride::default().allow_yield(is_gen), |me| {
            let params = me.parse_formal_params()?;
            let body = me.parse_method_body(params.simple)?;
            Ok(Func {
                id: None,
                params: params.params,
                body,
                generator: is_gen,
                loc: me.node_loc(start),
            })
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_method_body(&mut self, simple: bool) -> Res<FuncBody<'b>> {
        log::debug!(
            "{}: parse_method_body {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        self.context.set_is_assignment_target(false);
        self.context.set_is_binding_element(false);
        let prev_strict = self.context.strict;
        let prev_oct = self.context.found_directive_octal_escape;
        let prev_allow_strict = self.context.allow_strict_directive;
        self.context.allow_strict_directive = simple;
        let ret = self.isolate_cover_grammar(Self::parse_function_source_el);
        self.context.strict = prev_strict;
        self.context.found_directive_octal_escape = prev_oct;
        self.context.allow_strict_directive = prev_allow_strict;
        ret
    }

    /// Assignment expressions try yield, then the arrow cover, then
    /// everything else through the conditional expression
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_assignment_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_assignment_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.context.allow_yield && self.at_keyword(Keyword::Yield(())) {
            return self.parse_yield_expr();
        }
        let start = self.look_ahead_position;
        let current = self.parse_conditional_expr()?;
        // the cover node can only ever be completed by an arrow, an
        // identifier is only a parameter list when `=>` follows
        if current.is_arrow_param_placeholder()
            || (self.at_punct(Punct::EqualGreaterThan) && current.is_ident())
        {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            return self.parse_arrow_func_tail(start, current);
        }
        if self.at_assign() {
            if !self.context.is_assignment_target || !lhs::is_simple_reference(&current) {
                return self.unexpected_token_error(&self.look_ahead, "not at an assignment target");
            }
            let assign = self.parse_assignment_after_start(start, current)?;
            return Ok(Expr::Assign(assign));
        }
        Ok(current)
    }

    /// `=>` commits the arrow interpretation of whatever came before
    /// it, the cover arguments become formal parameters
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_arrow_func_tail(&mut self, start: Position, current: Expr<'b>) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_arrow_func_tail {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let params = self.reinterpret_as_cover_formals_list(current)?;
        // a committed arrow legitimizes any covered shorthand default
        // that was flagged while parsing the parameter list
        self.context.first_covert_initialized_name_error = None;
        let simple = formal_params::list_is_simple(&params);
        self.expect_fat_arrow()?;
        if self.at_punct(Punct::OpenBrace) {
            let prev_strict = self.context.strict;
            let prev_oct = self.context.found_directive_octal_escape;
            let prev_allow_strict = self.context.allow_strict_directive;
            self.context.allow_strict_directive = simple;
            let body = self.with_ctx(
                ContextOverride::default().allow_in(true).allow_yield(false),
                Self::parse_function_source_el,
            );
            self.context.strict = prev_strict;
            self.context.found_directive_octal_escape = prev_oct;
            self.context.allow_strict_directive = prev_allow_strict;
            Ok(Expr::ArrowFunc(ArrowFuncExpr {
                params,
                body: ArrowFuncBody::FuncBody(body?),
                expression: false,
                loc: self.node_loc(start),
            }))
        } else {
            let body = self.with_ctx(ContextOverride::default().allow_yield(false), |me| {
                me.isolate_cover_grammar(Self::parse_assignment_expr)
            })?;
            Ok(Expr::ArrowFunc(ArrowFuncExpr {
                params,
                body: ArrowFuncBody::Expr(Box::new(body)),
                expression: true,
                loc: self.node_loc(start),
            }))
        }
    }

    /// Rewrite the cover node (or a bare identifier) into a formal
    /// parameter list, anything that cannot be a binding target is
    /// rejected here
    #[tracing::instrument(level = "trace", skip(self))]
    fn reinterpret_as_cover_formals_list(&mut self, expr: Expr<'b>) -> Res<Vec<FuncArg<'b>>> {
        let args = match expr {
            Expr::Ident(ident) => vec![FuncArg::Pat(Pat::Ident(ident))],
            Expr::ArrowParamPlaceHolder(inner) => inner.args,
            _ => return Err(self.reinterpret_error("expression", "arrow parameters")),
        };
        let mut params = Vec::with_capacity(args.len());
        for arg in args {
            let arg = match arg {
                FuncArg::Expr(expr) => {
                    if Self::is_reinterpret_target(&expr) {
                        FuncArg::Pat(self.reinterpret_expr_as_pat(expr)?)
                    } else {
                        return Err(self.reinterpret_error("expression", "arrow parameter"));
                    }
                }
                arg => arg,
            };
            params.push(arg);
        }
        Ok(params)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_assignment_after_start(
        &mut self,
        start: Position,
        current: Expr<'b>,
    ) -> Res<AssignExpr<'b>> {
        let left = if !self.at_punct(Punct::Equal) {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            AssignLeft::Expr(Box::new(current))
        } else if !current.is_ident() && Self::is_reinterpret_target(&current) {
            AssignLeft::Pat(self.reinterpret_expr_as_pat(current)?)
        } else {
            AssignLeft::Expr(Box::new(current))
        };
        let item = self.next_item()?;
        let op = if let Token::Punct(p) = &item.token {
            AssignOp::from_punct(*p)
        } else {
            None
        };
        let op = match op {
            Some(op) => op,
            None => {
                return self.expected_token_error(
                    &item,
                    &[
                        "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "^=", "|=",
                    ],
                )
            }
        };
        let right = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
        self.context.first_covert_initialized_name_error = None;
        Ok(AssignExpr {
            operator: op,
            left,
            right: Box::new(right),
            loc: self.node_loc(start),
        })
    }

    /// The shallow structural rewrite from expression to pattern,
    /// used for destructuring targets and the arrow cover
    #[tracing::instrument(level = "trace", skip(self))]
    fn reinterpret_expr_as_pat(&self, ex: Expr<'b>) -> Res<Pat<'b>> {
        log::debug!(
            "{}: reinterpret_expr_as_pat {:?}",
            self.look_ahead.span.start,
            ex
        );
        match ex {
            Expr::Array(a) => {
                let mut elements = Vec::with_capacity(a.elements.len());
                for el in a.elements {
                    if let Some(expr) = el {
                        elements.push(Some(self.reinterpret_array_pat_part(expr)?));
                    } else {
                        elements.push(None);
                    }
                }
                Ok(Pat::Array(ArrayPat {
                    elements,
                    loc: a.loc,
                }))
            }
            Expr::Obj(o) => {
                let mut props = Vec::with_capacity(o.props.len());
                for prop in o.props {
                    props.push(self.reinterpret_prop(prop)?);
                }
                Ok(Pat::Obj(ObjPat {
                    props,
                    loc: o.loc,
                }))
            }
            Expr::Spread(s) => {
                let inner = *s;
                Ok(Pat::Rest(Box::new(RestPat {
                    argument: self.reinterpret_expr_as_pat(inner.argument)?,
                    loc: inner.loc,
                })))
            }
            Expr::Assign(a) => {
                if a.operator != AssignOp::Equal {
                    return Err(self.reinterpret_error("compound assignment", "pattern"));
                }
                let left = match a.left {
                    AssignLeft::Pat(p) => p,
                    AssignLeft::Expr(e) => self.reinterpret_expr_as_pat(*e)?,
                };
                Ok(Pat::Assign(AssignPat {
                    left: Box::new(left),
                    right: a.right,
                    loc: a.loc,
                }))
            }
            Expr::Ident(ident) => Ok(Pat::Ident(ident)),
            _ => Err(self.reinterpret_error("expression", "pattern")),
        }
    }

    /// Anything that is not a binding shape, a member expression
    /// say, is left behind as a raw expression element
    #[tracing::instrument(level = "trace", skip(self))]
    fn reinterpret_array_pat_part(&self, part: Expr<'b>) -> Res<ArrayPatPart<'b>> {
        let ret = if let Expr::Spread(spread) = part {
            if Self::is_reinterpret_target(&spread.argument) {
                let inner = *spread;
                ArrayPatPart::Pat(Pat::Rest(Box::new(RestPat {
                    argument: self.reinterpret_expr_as_pat(inner.argument)?,
                    loc: inner.loc,
                })))
            } else {
                ArrayPatPart::Expr(Expr::Spread(spread))
            }
        } else if Self::is_reinterpret_target(&part) {
            ArrayPatPart::Pat(self.reinterpret_expr_as_pat(part)?)
        } else {
            ArrayPatPart::Expr(part)
        };
        Ok(ret)
    }

    /// A property survives the rewrite with its key, flags and value
    /// intact, only the value swaps from expression to pattern
    #[tracing::instrument(level = "trace", skip(self))]
    fn reinterpret_prop(&self, prop: Prop<'b>) -> Res<Prop<'b>> {
        let Prop {
            key,
            value,
            kind,
            method,
            shorthand,
            computed,
            loc,
        } = prop;
        let value = match value {
            PropValue::Expr(expr) => {
                if Self::is_reinterpret_target(&expr) {
                    PropValue::Pat(self.reinterpret_expr_as_pat(expr)?)
                } else {
                    // a valid assignment target that is not a
                    // binding shape stays an expression
                    PropValue::Expr(expr)
                }
            }
            value => value,
        };
        Ok(Prop {
            key,
            value,
            kind,
            method,
            shorthand,
            computed,
            loc,
        })
    }

    fn is_reinterpret_target(ex: &Expr) -> bool {
        match ex {
            Expr::Ident(_) => true,
            Expr::Spread(ref s) => Self::is_reinterpret_target(&s.argument),
            Expr::Obj(_) => true,
            Expr::Array(_) => true,
            Expr::Assign(ref a) => match &a.left {
                AssignLeft::Expr(ref expr) => Self::is_reinterpret_target(expr),
                _ => true,
            },
            _ => false,
        }
    }

    /// `yield` with no same-line argument stays bare, `yield *`
    /// always takes one so `delegate` implies an argument
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_yield_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_yield_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Yield(()))?;
        let mut argument: Option<Box<Expr>> = None;
        let mut delegate = false;
        if !self.context.has_line_term {
            if self.at_punct(Punct::Asterisk) {
                let _star = self.next_item()?;
                delegate = true;
                argument = Some(Box::new(self.parse_assignment_expr()?));
            } else if self.is_start_of_expr() {
                argument = Some(Box::new(self.parse_assignment_expr()?));
            }
        }
        Ok(Expr::Yield(YieldExpr {
            argument,
            delegate,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_conditional_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_conditional_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        let expr = self.inherit_cover_grammar(Self::parse_binary_expression)?;
        if self.at_punct(Punct::QuestionMark) {
            let _question = self.next_item()?;
            let if_true = self.with_ctx(ContextOverride::default().allow_in(true), |me| {
                me.isolate_cover_grammar(Self::parse_assignment_expr)
            })?;
            self.expect_punct(Punct::Colon)?;
            let if_false = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            return Ok(Expr::Conditional(ConditionalExpr {
                test: Box::new(expr),
                consequent: Box::new(if_true),
                alternate: Box::new(if_false),
                loc: self.node_loc(start),
            }));
        }
        Ok(expr)
    }

    /// Collect a flat run of operands and operators on a stack,
    /// folding left associatively whenever the incoming operator
    /// does not bind tighter than the one below it
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_binary_expression(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_binary_expression {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let current = self.inherit_cover_grammar(Self::parse_unary_expression)?;
        let token = self.look_ahead.clone();
        let mut prec = self.bin_precedence(&token.token);
        if prec < 1 {
            return Ok(current);
        }
        let _op = self.next_item()?;
        self.context.set_is_assignment_target(false);
        self.context.set_is_binding_element(false);
        let right = self.isolate_cover_grammar(Self::parse_unary_expression)?;
        let mut stack = vec![current, right];
        let mut ops = vec![token];
        let mut precs = vec![prec];
        loop {
            prec = self.bin_precedence(&self.look_ahead.token);
            if prec < 1 {
                break;
            }
            while !stack.is_empty() && !ops.is_empty() && prec <= precs[precs.len() - 1] {
                let right = stack
                    .pop()
                    .ok_or_else(|| self.op_error("no right expression on the operand stack"))?;
                let op = ops
                    .pop()
                    .ok_or_else(|| self.op_error("too few operators"))?;
                let _ = precs.pop();
                let left = stack
                    .pop()
                    .ok_or_else(|| self.op_error("no left expression on the operand stack"))?;
                stack.push(self.combine_binary(&op, left, right)?);
            }
            ops.push(self.next_item()?);
            precs.push(prec);
            let operand = self.isolate_cover_grammar(Self::parse_unary_expression)?;
            stack.push(operand);
        }
        let mut current = stack
            .pop()
            .ok_or_else(|| self.op_error("too few expressions"))?;
        while !ops.is_empty() && !stack.is_empty() {
            let op = ops
                .pop()
                .ok_or_else(|| self.op_error("too few operators"))?;
            let left = stack
                .pop()
                .ok_or_else(|| self.op_error("too few expressions"))?;
            current = self.combine_binary(&op, left, current)?;
        }
        Ok(current)
    }

    fn combine_binary(
        &self,
        op: &Item<&'b str>,
        left: Expr<'b>,
        right: Expr<'b>,
    ) -> Res<Expr<'b>> {
        let loc = SourceLocation::new(left.loc().start, right.loc().end);
        if op.token.matches_punct(Punct::DoubleAmpersand)
            || op.token.matches_punct(Punct::DoublePipe)
        {
            let operator = self
                .logical_operator(op)
                .ok_or_else(|| self.op_error("unable to convert logical operator"))?;
            Ok(Expr::Logical(LogicalExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                loc,
            }))
        } else {
            let operator = self
                .binary_operator(op)
                .ok_or_else(|| self.op_error("unable to convert binary operator"))?;
            Ok(Expr::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                loc,
            }))
        }
    }

    /// Determine the precedence for a specific token,
    /// this will return zero for all tokens except
    /// `instanceof`, `in`, or binary punctuation
    fn bin_precedence(&self, tok: &Token<&str>) -> usize {
        match tok {
            Token::Punct(ref p) => Self::determine_precedence(*p),
            Token::Keyword(ref k) => {
                if k == &Keyword::InstanceOf(()) || (self.context.allow_in && k == &Keyword::In(()))
                {
                    7
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    fn determine_precedence(p: Punct) -> usize {
        match p {
            Punct::CloseParen
            | Punct::SemiColon
            | Punct::Comma
            | Punct::Equal
            | Punct::CloseBracket => 0,
            Punct::DoublePipe => 1,
            Punct::DoubleAmpersand => 2,
            Punct::Pipe => 3,
            Punct::Caret => 4,
            Punct::Ampersand => 5,
            Punct::DoubleEqual | Punct::BangEqual | Punct::TripleEqual | Punct::BangDoubleEqual => {
                6
            }
            Punct::GreaterThan
            | Punct::LessThan
            | Punct::LessThanEqual
            | Punct::GreaterThanEqual => 7,
            Punct::DoubleLessThan | Punct::DoubleGreaterThan | Punct::TripleGreaterThan => 8,
            Punct::Plus | Punct::Dash => 9,
            Punct::Asterisk | Punct::ForwardSlash | Punct::Percent => 11,
            _ => 0,
        }
    }

    fn binary_operator(&self, token: &Item<&str>) -> Option<BinaryOp> {
        match &token.token {
            Token::Keyword(ref key) => match key {
                Keyword::InstanceOf(_) => Some(BinaryOp::InstanceOf),
                Keyword::In(_) => Some(BinaryOp::In),
                _ => None,
            },
            Token::Punct(ref p) => match p {
                Punct::DoubleEqual => Some(BinaryOp::Equal),
                Punct::BangEqual => Some(BinaryOp::NotEqual),
                Punct::TripleEqual => Some(BinaryOp::StrictEqual),
                Punct::BangDoubleEqual => Some(BinaryOp::StrictNotEqual),
                Punct::LessThan => Some(BinaryOp::LessThan),
                Punct::LessThanEqual => Some(BinaryOp::LessThanEqual),
                Punct::GreaterThan => Some(BinaryOp::GreaterThan),
                Punct::GreaterThanEqual => Some(BinaryOp::GreaterThanEqual),
                Punct::DoubleLessThan => Some(BinaryOp::LeftShift),
                Punct::DoubleGreaterThan => Some(BinaryOp::RightShift),
                Punct::TripleGreaterThan => Some(BinaryOp::UnsignedRightShift),
                Punct::Plus => Some(BinaryOp::Plus),
                Punct::Dash => Some(BinaryOp::Minus),
                Punct::Asterisk => Some(BinaryOp::Times),
                Punct::ForwardSlash => Some(BinaryOp::Over),
                Punct::Percent => Some(BinaryOp::Mod),
                Punct::Ampersand => Some(BinaryOp::And),
                Punct::Pipe => Some(BinaryOp::Or),
                Punct::Caret => Some(BinaryOp::XOr),
                _ => None,
            },
            _ => None,
        }
    }

    fn logical_operator(&self, token: &Item<&str>) -> Option<LogicalOp> {
        match &token.token {
            Token::Punct(ref p) => match p {
                Punct::DoubleAmpersand => Some(LogicalOp::And),
                Punct::DoublePipe => Some(LogicalOp::Or),
                _ => None,
            },
            _ => None,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_unary_expression(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_unary_expression {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.at_punct(Punct::Plus)
            || self.at_punct(Punct::Dash)
            || self.at_punct(Punct::Tilde)
            || self.at_punct(Punct::Bang)
            || self.at_keyword(Keyword::Delete(()))
            || self.at_keyword(Keyword::Void(()))
            || self.at_keyword(Keyword::TypeOf(()))
        {
            let op = self.next_item()?;
            let argument = self.inherit_cover_grammar(Self::parse_unary_expression)?;
            if op.token.matches_keyword(Keyword::Delete(()))
                && self.context.strict
                && argument.is_ident()
            {
                return Err(Error::UnqualifiedDelete(op.location.start));
            }
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let operator = self
                .unary_operator(&op)
                .ok_or_else(|| self.op_error("unable to convert unary operator"))?;
            let loc = SourceLocation::new(op.location.start, self.current_end);
            Ok(Expr::Unary(UnaryExpr {
                operator,
                argument: Box::new(argument),
                loc,
            }))
        } else {
            self.parse_update_expr()
        }
    }

    fn unary_operator(&self, item: &Item<&str>) -> Option<UnaryOp> {
        match &item.token {
            Token::Punct(ref p) => match p {
                Punct::Dash => Some(UnaryOp::Minus),
                Punct::Plus => Some(UnaryOp::Plus),
                Punct::Bang => Some(UnaryOp::Not),
                Punct::Tilde => Some(UnaryOp::Tilde),
                _ => None,
            },
            Token::Keyword(ref k) => match k {
                Keyword::TypeOf(_) => Some(UnaryOp::TypeOf),
                Keyword::Void(_) => Some(UnaryOp::Void),
                Keyword::Delete(_) => Some(UnaryOp::Delete),
                _ => None,
            },
            _ => None,
        }
    }

    /// Prefix and postfix `++`/`--`, the postfix form only binds on
    /// the same logical line
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_update_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_update_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.at_punct(Punct::DoublePlus) || self.at_punct(Punct::DoubleDash) {
            let op = self.next_item()?;
            let operator = if op.token.matches_punct(Punct::DoublePlus) {
                UpdateOp::Increment
            } else {
                UpdateOp::Decrement
            };
            let argument = self.inherit_cover_grammar(Self::parse_unary_expression)?;
            if !self.context.is_assignment_target {
                return self
                    .unexpected_token_error(&op, "cannot increment when not at an assignment target");
            }
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let loc = SourceLocation::new(op.location.start, self.current_end);
            Ok(Expr::Update(UpdateExpr {
                operator,
                argument: Box::new(argument),
                prefix: true,
                loc,
            }))
        } else {
            let expr = self.inherit_cover_grammar(Self::parse_left_hand_side_expr_allow_call)?;
            if !self.context.has_line_term
                && self.look_ahead.token.is_punct()
                && (self.at_punct(Punct::DoublePlus) || self.at_punct(Punct::DoubleDash))
            {
                let op = self.next_item()?;
                if !self.context.is_assignment_target {
                    return self.unexpected_token_error(
                        &op,
                        "cannot increment when not at an assignment target",
                    );
                }
                self.context.set_is_assignment_target(false);
                self.context.set_is_binding_element(false);
                let operator = if op.token.matches_punct(Punct::DoublePlus) {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                let loc = SourceLocation::new(expr.loc().start, op.location.end);
                return Ok(Expr::Update(UpdateExpr {
                    operator,
                    argument: Box::new(expr),
                    prefix: false,
                    loc,
                }));
            }
            Ok(expr)
        }
    }

    /// The left hand side suffixes that are valid as a `new` callee,
    /// member access and tagged templates but no calls
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_left_hand_side_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_left_hand_side_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let mut expr = if self.at_keyword(Keyword::Super(())) {
            self.parse_super()?
        } else if self.at_keyword(Keyword::New(())) {
            self.inherit_cover_grammar(Self::parse_new_expr)?
        } else {
            self.inherit_cover_grammar(Self::parse_primary_expression)?
        };
        loop {
            if self.at_punct(Punct::OpenBracket) {
                self.context.set_is_binding_element(false);
                self.context.set_is_assignment_target(true);
                let _open = self.next_item()?;
                let property = self.isolate_cover_grammar(Self::parse_expression)?;
                self.expect_punct(Punct::CloseBracket)?;
                let loc = SourceLocation::new(expr.loc().start, self.current_end);
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: true,
                    loc,
                });
            } else if self.at_punct(Punct::Period) {
                self.context.set_is_binding_element(false);
                self.context.set_is_assignment_target(true);
                let _period = self.next_item()?;
                let property = Expr::Ident(self.parse_ident_name()?);
                let loc = SourceLocation::new(expr.loc().start, self.current_end);
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: false,
                    loc,
                });
            } else if self.look_ahead.token.is_template_head() {
                let quasi = self.parse_template_lit(true)?;
                let loc = SourceLocation::new(expr.loc().start, quasi.loc.end);
                expr = Expr::TaggedTemplate(TaggedTemplateExpr {
                    tag: Box::new(expr),
                    quasi,
                    loc,
                });
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// The full suffix loop, `.` `[` template and `(` folded left to
    /// right over the base expression
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_left_hand_side_expr_allow_call(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_left_hand_side_expr_allow_call",
            self.look_ahead.span.start
        );
        self.with_ctx(ContextOverride::default().allow_in(true), |me| {
            let mut expr = if me.at_keyword(Keyword::Super(())) {
                me.parse_super()?
            } else if me.at_keyword(Keyword::New(())) {
                me.inherit_cover_grammar(Self::parse_new_expr)?
            } else {
                me.inherit_cover_grammar(Self::parse_primary_expression)?
            };
            loop {
                if me.at_punct(Punct::Period) {
                    me.context.set_is_binding_element(false);
                    me.context.set_is_assignment_target(true);
                    let _period = me.next_item()?;
                    let property = Expr::Ident(me.parse_ident_name()?);
                    let loc = SourceLocation::new(expr.loc().start, me.current_end);
                    expr = Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: false,
                        loc,
                    });
                } else if me.at_punct(Punct::OpenParen) {
                    me.context.set_is_binding_element(false);
                    me.context.set_is_assignment_target(false);
                    let arguments = me.parse_args()?;
                    let loc = SourceLocation::new(expr.loc().start, me.current_end);
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        arguments,
                        loc,
                    });
                } else if me.at_punct(Punct::OpenBracket) {
                    me.context.set_is_assignment_target(true);
                    me.context.set_is_binding_element(false);
                    let _open = me.next_item()?;
                    let property = me.isolate_cover_grammar(Self::parse_expression)?;
                    me.expect_punct(Punct::CloseBracket)?;
                    let loc = SourceLocation::new(expr.loc().start, me.current_end);
                    expr = Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                        loc,
                    });
                } else if me.look_ahead.token.is_template_head() {
                    let quasi = me.parse_template_lit(true)?;
                    let loc = SourceLocation::new(expr.loc().start, quasi.loc.end);
                    expr = Expr::TaggedTemplate(TaggedTemplateExpr {
                        tag: Box::new(expr),
                        quasi,
                        loc,
                    });
                } else {
                    break;
                }
            }
            Ok(expr)
        })
    }

    /// `super` is only valid inside a function body and must be
    /// followed by a property access or a call
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_super(&mut self) -> Res<Expr<'b>> {
        let super_item = self.next_item()?;
        if !self.context.in_function_body {
            return Err(Error::InvalidSuper(super_item.location.start));
        }
        if !self.at_punct(Punct::OpenBracket)
            && !self.at_punct(Punct::Period)
            && !self.at_punct(Punct::OpenParen)
        {
            return Err(Error::InvalidSuper(super_item.location.start));
        }
        Ok(Expr::Super(super_item.location))
    }

    /// Parse call arguments, expecting to open with `(` and close
    /// with `)`
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_args(&mut self) -> Res<Vec<Expr<'b>>> {
        log::debug!(
            "{}: parse_args {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        self.expect_punct(Punct::OpenParen)?;
        let mut args = Vec::new();
        if !self.at_punct(Punct::CloseParen) {
            loop {
                let expr = if self.at_punct(Punct::Ellipsis) {
                    Expr::Spread(Box::new(self.parse_spread_element()?))
                } else {
                    self.isolate_cover_grammar(Self::parse_assignment_expr)?
                };
                args.push(expr);
                if self.at_punct(Punct::CloseParen) {
                    break;
                }
                self.expect_punct(Punct::Comma)?;
                if self.at_punct(Punct::CloseParen) {
                    break;
                }
            }
        }
        self.expect_punct(Punct::CloseParen)?;
        Ok(args)
    }

    /// An expression preceded by `...`
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_spread_element(&mut self) -> Res<SpreadExpr<'b>> {
        log::debug!(
            "{}: parse_spread_element {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::Ellipsis)?;
        let argument = self.inherit_cover_grammar(Self::parse_assignment_expr)?;
        Ok(SpreadExpr {
            argument,
            loc: self.node_loc(start),
        })
    }

    /// Either `new Thing()` or the meta property `new.target`, the
    /// latter terminates the `new` chain and only appears in a
    /// function body
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_new_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_new_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let new_item = self.next_item()?;
        if self.at_punct(Punct::Period) {
            let _dot = self.next_item()?;
            if self.at_contextual_keyword("target") {
                if !self.context.in_function_body {
                    return Err(Error::InvalidNewTarget(self.look_ahead_position));
                }
                let property = self.parse_ident_name()?;
                let meta = Ident {
                    name: self.slice_text(&new_item)?,
                    loc: new_item.location,
                };
                let loc = SourceLocation::new(new_item.location.start, property.loc.end);
                Ok(Expr::MetaProp(MetaProp {
                    meta,
                    property,
                    loc,
                }))
            } else {
                self.expected_token_error(&self.look_ahead, &["target"])
            }
        } else {
            let callee = self.isolate_cover_grammar(Self::parse_left_hand_side_expr)?;
            let arguments = if self.at_punct(Punct::OpenParen) {
                self.parse_args()?
            } else {
                Vec::new()
            };
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            Ok(Expr::New(NewExpr {
                callee: Box::new(callee),
                arguments,
                loc: SourceLocation::new(new_item.location.start, self.current_end),
            }))
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_primary_expression(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_primary_expression {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        if self.context.strict && self.look_ahead.token.is_strict_reserved() {
            return self.unexpected_token_error(
                &self.look_ahead,
                "strict mode reserved word used as an identifier",
            );
        }
        if self.look_ahead.token.is_ident()
            || (!self.context.is_module && self.at_keyword(Keyword::Await(())))
        {
            let ident = self.next_item()?;
            Ok(Expr::Ident(self.ident_from(&ident)?))
        } else if self.look_ahead.token.is_number() {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let item = self.next_item()?;
            self.octal_literal_guard(&item)?;
            Ok(Expr::Lit(Lit::Number(NumberLit {
                raw: self.slice_text(&item)?,
                loc: item.location,
            })))
        } else if self.look_ahead.token.is_string() {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let item = self.next_item()?;
            if self.context.strict && Self::string_contains_octal_escape(&item) {
                return Err(Error::OctalLiteral(item.location.start));
            }
            Ok(Expr::Lit(Lit::String(self.string_lit_from(&item)?)))
        } else if self.look_ahead.token.is_boolean() {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let item = self.next_item()?;
            let value = self.scanner.str_for(&item.span) == Some("true");
            Ok(Expr::Lit(Lit::Boolean(BoolLit {
                value,
                loc: item.location,
            })))
        } else if self.look_ahead.token.is_null() {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let item = self.next_item()?;
            Ok(Expr::Lit(Lit::Null(item.location)))
        } else if self.look_ahead.is_template() {
            let lit = self.parse_template_lit(false)?;
            Ok(Expr::Lit(Lit::Template(lit)))
        } else if self.look_ahead.token.is_punct() {
            if self.at_punct(Punct::OpenParen) {
                self.inherit_cover_grammar(Self::parse_group_expr)
            } else if self.at_punct(Punct::OpenBracket) {
                self.inherit_cover_grammar(Self::parse_array_init)
            } else if self.at_punct(Punct::OpenBrace) {
                self.inherit_cover_grammar(Self::parse_obj_init)
            } else {
                self.expected_token_error(&self.look_ahead, &["{", "[", "("])
            }
        } else if self.look_ahead.token.is_regex() {
            self.context.set_is_assignment_target(false);
            self.context.set_is_binding_element(false);
            let item = self.next_item()?;
            Ok(Expr::Lit(Lit::RegEx(self.regex_lit_from(&item)?)))
        } else if self.look_ahead.token.is_keyword() {
            if !self.context.strict
                && ((!self.context.allow_yield && self.at_keyword(Keyword::Yield(())))
                    || self.at_keyword(Keyword::Let(()))
                    || self.look_ahead.token.is_strict_reserved())
            {
                let ident = self.parse_ident_name()?;
                Ok(Expr::Ident(ident))
            } else {
                self.context.set_is_assignment_target(false);
                self.context.set_is_binding_element(false);
                if self.at_keyword(Keyword::Function(())) {
                    self.parse_function_expr()
                } else if self.at_keyword(Keyword::This(())) {
                    let item = self.next_item()?;
                    Ok(Expr::This(item.location))
                } else if self.at_keyword(Keyword::Class(())) {
                    let cls = self.parse_class_decl(true)?;
                    Ok(Expr::Class(Box::new(cls)))
                } else {
                    self.expected_token_error(&self.look_ahead, &["function", "this", "class"])
                }
            }
        } else {
            self.expected_token_error(
                &self.look_ahead,
                &[
                    "[identifier]",
                    "[Number]",
                    "[String]",
                    "[RegEx]",
                    "yield",
                    "let",
                    "function",
                    "this",
                    "class",
                ],
            )
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_function_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_function_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_keyword(Keyword::Function(()))?;
        let is_gen = if self.at_punct(Punct::Asterisk) {
            let _star = self.next_item()?;
            true
        } else {
            false
        };
        let id = if !self.at_punct(Punct::OpenParen) {
            Some(self.parse_var_ident(false)?)
        } else {
            None
        };
        let func = self.parse_func_tail(start, id, is_gen)?;
        Ok(Expr::Func(func))
    }

    /// The parenthesized cover, either an arrow parameter list or a
    /// wrapped expression depending on the token after `)`
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_group_expr(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_group_expr {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenParen)?;
        if self.at_punct(Punct::CloseParen) {
            let _close = self.next_item()?;
            if !self.at_punct(Punct::EqualGreaterThan) {
                self.expect_punct(Punct::EqualGreaterThan)?;
            }
            return Ok(Expr::ArrowParamPlaceHolder(ArrowParamPlaceHolder {
                args: Vec::new(),
                loc: self.node_loc(start),
            }));
        }
        if self.at_punct(Punct::Ellipsis) {
            let rest = self.parse_rest_element()?;
            let arg = FuncArg::Pat(Pat::Rest(Box::new(rest)));
            self.expect_punct(Punct::CloseParen)?;
            if !self.at_punct(Punct::EqualGreaterThan) {
                self.expect_punct(Punct::EqualGreaterThan)?;
            }
            return Ok(Expr::ArrowParamPlaceHolder(ArrowParamPlaceHolder {
                args: vec![arg],
                loc: self.node_loc(start),
            }));
        }
        self.context.set_is_binding_element(true);
        let mut ex = self.inherit_cover_grammar(Self::parse_assignment_expr)?;
        if self.at_punct(Punct::Comma) {
            let mut exprs = vec![ex];
            while !self.look_ahead.token.is_eof() {
                if !self.at_punct(Punct::Comma) {
                    break;
                }
                let _comma = self.next_item()?;
                if self.at_punct(Punct::CloseParen) {
                    // a trailing comma is only valid in an arrow
                    // parameter list
                    let _close = self.next_item()?;
                    let args = exprs.into_iter().map(FuncArg::Expr).collect();
                    return Ok(Expr::ArrowParamPlaceHolder(ArrowParamPlaceHolder {
                        args,
                        loc: self.node_loc(start),
                    }));
                } else if self.at_punct(Punct::Ellipsis) {
                    if !self.context.is_binding_element {
                        return self.expected_token_error(&self.look_ahead, &["not ..."]);
                    }
                    let rest = self.parse_rest_element()?;
                    self.expect_punct(Punct::CloseParen)?;
                    let mut args = Vec::with_capacity(exprs.len() + 1);
                    for expr in exprs {
                        let arg = if Self::is_reinterpret_target(&expr) {
                            FuncArg::Pat(self.reinterpret_expr_as_pat(expr)?)
                        } else {
                            FuncArg::Expr(expr)
                        };
                        args.push(arg);
                    }
                    args.push(FuncArg::Pat(Pat::Rest(Box::new(rest))));
                    return Ok(Expr::ArrowParamPlaceHolder(ArrowParamPlaceHolder {
                        args,
                        loc: self.node_loc(start),
                    }));
                } else {
                    exprs.push(self.inherit_cover_grammar(Self::parse_assignment_expr)?);
                }
            }
            let loc = SourceLocation::new(exprs[0].loc().start, self.current_end);
            ex = Expr::Sequence(SequenceExpr {
                expressions: exprs,
                loc,
            });
        }
        self.expect_punct(Punct::CloseParen)?;
        if self.at_punct(Punct::EqualGreaterThan) {
            if !ex.is_ident() && !self.context.is_binding_element {
                return self.expected_token_error(&self.look_ahead, &["binding element"]);
            }
            self.context.set_is_binding_element(false);
            let args = if let Expr::Sequence(seq) = ex {
                seq.expressions.into_iter().map(FuncArg::Expr).collect()
            } else {
                vec![FuncArg::Expr(ex)]
            };
            return Ok(Expr::ArrowParamPlaceHolder(ArrowParamPlaceHolder {
                args,
                loc: self.node_loc(start),
            }));
        }
        if let Expr::Obj(_) = &ex {
            if let Some(item) = &self.context.first_covert_initialized_name_error {
                return Err(Error::UnexpectedToken(
                    item.location.start,
                    format!("{:?}", item.token),
                ));
            }
        }
        Ok(Expr::Paren(Box::new(ParenExpr {
            expr: ex,
            loc: self.node_loc(start),
        })))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_array_init(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_array_init {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBracket)?;
        let mut elements = Vec::new();
        while !self.at_punct(Punct::CloseBracket) {
            if self.at_punct(Punct::Comma) {
                // an elision
                let _comma = self.next_item()?;
                elements.push(None);
            } else if self.at_punct(Punct::Ellipsis) {
                let el = self.parse_spread_element()?;
                elements.push(Some(Expr::Spread(Box::new(el))));
                if !self.at_punct(Punct::CloseBracket) {
                    self.context.set_is_assignment_target(false);
                    self.context.set_is_binding_element(false);
                    self.expect_punct(Punct::Comma)?;
                }
            } else {
                let el = self.inherit_cover_grammar(Self::parse_assignment_expr)?;
                elements.push(Some(el));
                if !self.at_punct(Punct::CloseBracket) {
                    self.expect_punct(Punct::Comma)?;
                }
            }
        }
        self.expect_punct(Punct::CloseBracket)?;
        Ok(Expr::Array(ArrayExpr {
            elements,
            loc: self.node_loc(start),
        }))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_obj_init(&mut self) -> Res<Expr<'b>> {
        log::debug!(
            "{}: parse_obj_init {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        self.expect_punct(Punct::OpenBrace)?;
        let mut props = Vec::new();
        let mut proto_count = 0;
        while !self.at_punct(Punct::CloseBrace) {
            let (found_proto, prop) = self.parse_obj_prop()?;
            if found_proto {
                proto_count += 1;
            }
            props.push(prop);
            if !self.at_punct(Punct::CloseBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::CloseBrace)?;
        if !self.at_punct(Punct::Equal) && proto_count > 1 {
            return Err(Error::OperationError(
                start,
                "an object literal may only define `__proto__` once".to_string(),
            ));
        }
        Ok(Expr::Obj(ObjExpr {
            props,
            loc: self.node_loc(start),
        }))
    }

    /// One object literal property, covering shorthand, methods,
    /// getters/setters and generator methods. `get`/`set`/`*` are
    /// contextual the same way they are in a class body
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_obj_prop(&mut self) -> Res<(bool, Prop<'b>)> {
        log::debug!(
            "{}: parse_obj_prop {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start_item = self.look_ahead.clone();
        let start = self.look_ahead_position;
        let mut keyword_get = false;
        let mut keyword_set = false;
        let mut star = false;
        let mut computed = false;
        let key = if start_item.token.is_ident()
            || (!self.context.strict && start_item.token.matches_keyword(Keyword::Let(())))
        {
            let ident = self.next_item()?;
            keyword_get = ident.token.matches_ident_str("get");
            keyword_set = ident.token.matches_ident_str("set");
            Some(PropKey::Ident(self.ident_from(&ident)?))
        } else if self.at_punct(Punct::Asterisk) {
            let _star = self.next_item()?;
            star = true;
            None
        } else {
            computed = self.at_punct(Punct::OpenBracket);
            Some(self.parse_object_property_key()?)
        };
        let at_qualified = self.at_qualified_prop_key();
        if keyword_get && at_qualified {
            computed = self.at_punct(Punct::OpenBracket);
            let key = self.parse_object_property_key()?;
            let value = self.parse_getter_method()?;
            return Ok((
                false,
                Prop {
                    key,
                    value: PropValue::Expr(Expr::Func(value)),
                    kind: PropKind::Get,
                    method: false,
                    shorthand: false,
                    computed,
                    loc: self.node_loc(start),
                },
            ));
        }
        if keyword_set && at_qualified {
            computed = self.at_punct(Punct::OpenBracket);
            let key = self.parse_object_property_key()?;
            let value = self.parse_setter_method()?;
            return Ok((
                false,
                Prop {
                    key,
                    value: PropValue::Expr(Expr::Func(value)),
                    kind: PropKind::Set,
                    method: false,
                    shorthand: false,
                    computed,
                    loc: self.node_loc(start),
                },
            ));
        }
        if star && at_qualified {
            computed = self.at_punct(Punct::OpenBracket);
            let key = self.parse_object_property_key()?;
            let value = self.parse_method_fn(true)?;
            return Ok((
                false,
                Prop {
                    key,
                    value: PropValue::Expr(Expr::Func(value)),
                    kind: PropKind::Init,
                    method: true,
                    shorthand: false,
                    computed,
                    loc: self.node_loc(start),
                },
            ));
        }
        let key = if let Some(key) = key {
            key
        } else {
            return self.expected_token_error(&start_item, &["object property key"]);
        };
        let is_proto = !computed && key.matches("__proto__");
        if self.at_punct(Punct::Colon) {
            let _colon = self.next_item()?;
            let value = self.inherit_cover_grammar(Self::parse_assignment_expr)?;
            return Ok((
                is_proto,
                Prop {
                    key,
                    value: PropValue::Expr(value),
                    kind: PropKind::Init,
                    method: false,
                    shorthand: false,
                    computed,
                    loc: self.node_loc(start),
                },
            ));
        }
        if self.at_punct(Punct::OpenParen) {
            let value = self.parse_method_fn(false)?;
            return Ok((
                false,
                Prop {
                    key,
                    value: PropValue::Expr(Expr::Func(value)),
                    kind: PropKind::Init,
                    method: true,
                    shorthand: false,
                    computed,
                    loc: self.node_loc(start),
                },
            ));
        }
        if start_item.token.is_ident()
            || start_item.token.matches_keyword(Keyword::Yield(()))
            || (!self.context.strict && start_item.token.matches_keyword(Keyword::Let(())))
        {
            if self.at_punct(Punct::Equal) {
                // shorthand with a default only makes sense as a
                // pattern, remember the token so the cover grammar
                // can reject the expression interpretation
                self.context.first_covert_initialized_name_error =
                    Some(self.look_ahead.clone());
                let _eq = self.next_item()?;
                let right = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
                let left = match &key {
                    PropKey::Ident(ident) => Pat::Ident(ident.clone()),
                    _ => return self.expected_token_error(&start_item, &["shorthand key"]),
                };
                let loc = self.node_loc(start);
                let value = Pat::Assign(AssignPat {
                    left: Box::new(left),
                    right: Box::new(right),
                    loc,
                });
                return Ok((
                    false,
                    Prop {
                        key,
                        value: PropValue::Pat(value),
                        kind: PropKind::Init,
                        method: false,
                        shorthand: true,
                        computed: false,
                        loc,
                    },
                ));
            }
            return Ok((
                false,
                Prop {
                    key,
                    value: PropValue::None,
                    kind: PropKind::Init,
                    method: false,
                    shorthand: true,
                    computed: false,
                    loc: self.node_loc(start),
                },
            ));
        }
        self.expected_token_error(&start_item, &["object property value"])
    }

    fn at_qualified_prop_key(&self) -> bool {
        match &self.look_ahead.token {
            Token::Ident(_)
            | Token::String(_)
            | Token::Boolean(_)
            | Token::Null
            | Token::Keyword(_)
            | Token::Number(_) => true,
            Token::Punct(ref p) => p == &Punct::OpenBracket,
            _ => false,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_object_property_key(&mut self) -> Res<PropKey<'b>> {
        log::debug!(
            "{}: parse_object_property_key {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let item = self.next_item()?;
        match &item.token {
            Token::String(_) => {
                if self.context.strict && Self::string_contains_octal_escape(&item) {
                    return Err(Error::OctalLiteral(item.location.start));
                }
                Ok(PropKey::Lit(Lit::String(self.string_lit_from(&item)?)))
            }
            Token::Number(_) => {
                self.octal_literal_guard(&item)?;
                Ok(PropKey::Lit(Lit::Number(NumberLit {
                    raw: self.slice_text(&item)?,
                    loc: item.location,
                })))
            }
            Token::Ident(_) | Token::Null | Token::Keyword(_) | Token::Boolean(_) => {
                Ok(PropKey::Ident(self.ident_from(&item)?))
            }
            Token::Punct(Punct::OpenBracket) => {
                let key = self.isolate_cover_grammar(Self::parse_assignment_expr)?;
                let id = if Self::is_valid_property_key_lit(&key) {
                    match key {
                        Expr::Lit(lit) => PropKey::Lit(lit),
                        _ => {
                            return self
                                .expected_token_error(&self.look_ahead, &["property key literal"])
                        }
                    }
                } else {
                    PropKey::Expr(key)
                };
                self.expect_punct(Punct::CloseBracket)?;
                Ok(id)
            }
            _ => self.expected_token_error(
                &item,
                &[
                    "[string]",
                    "[number]",
                    "[ident]",
                    "[boolean]",
                    "null",
                    "[keyword]",
                    "[",
                ],
            ),
        }
    }

    fn is_valid_property_key_lit(expr: &Expr) -> bool {
        match expr {
            Expr::Lit(ref l) => matches!(l, Lit::String(_) | Lit::Number(_) | Lit::Boolean(_)),
            _ => false,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_template_lit(&mut self, is_tagged: bool) -> Res<TemplateLit<'b>> {
        log::debug!(
            "{}: parse_template_lit {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let start = self.look_ahead_position;
        if !self.look_ahead.token.is_template_head() {
            return self
                .expected_token_error(&self.look_ahead, &["template head", "template no sub"]);
        }
        let mut expressions = Vec::new();
        let mut quasis = Vec::new();
        let quasi = self.parse_template_element(is_tagged)?;
        let mut breaking = quasi.tail;
        quasis.push(quasi);
        while !breaking {
            expressions.push(self.parse_expression()?);
            let quasi = self.parse_template_element(is_tagged)?;
            breaking = quasi.tail;
            quasis.push(quasi);
        }
        Ok(TemplateLit {
            quasis,
            expressions,
            loc: self.node_loc(start),
        })
    }

    /// A tagged template is allowed to carry otherwise illegal
    /// escapes, an untagged one is not
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_template_element(&mut self, is_tagged: bool) -> Res<TemplateElement<'b>> {
        log::debug!(
            "{}: parse_template_element {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let item = self.next_item()?;
        if let Token::Template(t) = &item.token {
            let raw = self.slice_text(&item)?;
            let (cooked, tail, octal) = match t {
                ress::prelude::Template::Head(c) | ress::prelude::Template::Middle(c) => {
                    (Cow::Borrowed(c.content), false, c.contains_octal_escape)
                }
                ress::prelude::Template::Tail(c) | ress::prelude::Template::NoSub(c) => {
                    (Cow::Borrowed(c.content), true, c.contains_octal_escape)
                }
            };
            if self.context.strict && !is_tagged && octal {
                return Err(Error::OctalLiteral(item.location.start));
            }
            Ok(TemplateElement {
                raw,
                cooked,
                tail,
                loc: item.location,
            })
        } else {
            self.expected_token_error(&item, &["template part"])
        }
    }

    /// ALLOW_ALL identifier parsing, any identifier name including
    /// keywords, used for member names, property keys and export
    /// specifiers
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_ident_name(&mut self) -> Res<Ident<'b>> {
        log::debug!(
            "{}: parse_ident_name {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let ident = self.next_item()?;
        match &ident.token {
            Token::Ident(_) | Token::Keyword(_) | Token::Boolean(_) | Token::Null => (),
            _ => return self.expected_token_error(&ident, &["identifier"]),
        }
        self.ident_from(&ident)
    }

    /// ALLOW_NOTHING identifier parsing, a plain identifier token or
    /// nothing, used for class names and import bindings
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_plain_ident(&mut self) -> Res<Ident<'b>> {
        let ident = self.next_item()?;
        if let Token::Ident(_) = &ident.token {
            self.ident_from(&ident)
        } else {
            self.expected_token_error(&ident, &["identifier"])
        }
    }

    /// MIXED identifier parsing for binding identifiers and labels,
    /// future reserved words are rejected in strict mode and `yield`
    /// is rejected inside a generator
    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_var_ident(&mut self, is_var: bool) -> Res<Ident<'b>> {
        log::debug!(
            "{}: parse_var_ident {:?}",
            self.look_ahead.span.start,
            self.look_ahead.token
        );
        let ident = self.next_item()?;
        if ident.token.matches_keyword(Keyword::Yield(())) {
            if self.context.strict || self.context.allow_yield {
                return self.expected_token_error(&ident, &["variable identifier"]);
            }
        } else if !ident.token.is_ident() && !ident.token.matches_keyword(Keyword::Await(())) {
            if self.context.strict && ident.token.is_keyword() && ident.token.is_strict_reserved() {
                return self.expected_token_error(&ident, &["variable identifier"]);
            }
            if self.context.strict
                || (!ident.token.is_strict_reserved()
                    && !ident.token.matches_keyword(Keyword::Let(())))
                || !is_var
            {
                return self.expected_token_error(&ident, &["variable identifier", "let"]);
            }
        } else if self.context.is_module && ident.token.matches_keyword(Keyword::Await(())) {
            return self.expected_token_error(&ident, &["not `await`"]);
        }
        match &ident.token {
            Token::Ident(_) | Token::Keyword(_) => self.ident_from(&ident),
            _ => self.expected_token_error(&ident, &["variable identifier"]),
        }
    }

    fn ident_from(&self, item: &Item<&'b str>) -> Res<Ident<'b>> {
        Ok(Ident {
            name: self.slice_text(item)?,
            loc: item.location,
        })
    }

    fn string_lit_from(&self, item: &Item<&'b str>) -> Res<StringLit<'b>> {
        let content = match &item.token {
            Token::String(lit) => match lit {
                ress::prelude::StringLit::Double(inner)
                | ress::prelude::StringLit::Single(inner) => inner.content,
            },
            _ => return self.expected_token_error(item, &["[string]"]),
        };
        Ok(StringLit {
            value: Cow::Borrowed(content),
            loc: item.location,
        })
    }

    fn string_contains_octal_escape(item: &Item<&str>) -> bool {
        if let Token::String(lit) = &item.token {
            match lit {
                ress::prelude::StringLit::Double(inner)
                | ress::prelude::StringLit::Single(inner) => inner.contains_octal_escape,
            }
        } else {
            false
        }
    }

    fn regex_lit_from(&self, item: &Item<&'b str>) -> Res<RegExLit<'b>> {
        let raw = self
            .scanner
            .str_for(&item.span)
            .ok_or(Error::UnexpectedEoF)?;
        let close = raw
            .rfind('/')
            .ok_or_else(|| self.op_error("regular expression with no closing slash"))?;
        Ok(RegExLit {
            pattern: Cow::Borrowed(&raw[1..close]),
            flags: Cow::Borrowed(&raw[close + 1..]),
            loc: item.location,
        })
    }

    /// The legacy octal numeric literal check, the raw text matching
    /// `0` followed by only octal digits is rejected in strict mode
    fn octal_literal_guard(&self, item: &Item<&'b str>) -> Res<()> {
        if !self.context.strict {
            return Ok(());
        }
        let raw = self
            .scanner
            .str_for(&item.span)
            .ok_or(Error::UnexpectedEoF)?;
        if raw.len() > 1 && raw.starts_with('0') {
            let rest = &raw[1..];
            if rest.chars().all(|c| ('0'..='7').contains(&c)) {
                return Err(Error::OctalLiteral(item.location.start));
            }
        }
        Ok(())
    }

    /// Save the three grammar context flags, apply the overrides,
    /// run the production and put the flags back no matter how it
    /// exited. This is the only place those flags change
    #[tracing::instrument(level = "trace", skip(self, overrides, f))]
    fn with_ctx<T>(
        &mut self,
        overrides: ContextOverride,
        f: impl FnOnce(&mut Self) -> Res<T>,
    ) -> Res<T> {
        let saved = (
            self.context.allow_in,
            self.context.allow_yield,
            self.context.in_function_body,
        );
        if let Some(allow_in) = overrides.allow_in {
            self.context.allow_in = allow_in;
        }
        if let Some(allow_yield) = overrides.allow_yield {
            self.context.allow_yield = allow_yield;
        }
        if let Some(in_function_body) = overrides.in_function_body {
            self.context.in_function_body = in_function_body;
        }
        let ret = f(self);
        self.context.allow_in = saved.0;
        self.context.allow_yield = saved.1;
        self.context.in_function_body = saved.2;
        ret
    }

    #[tracing::instrument(level = "trace", skip(self, f))]
    fn isolate_cover_grammar<T>(&mut self, f: impl Fn(&mut Self) -> Res<T>) -> Res<T> {
        let is_binding = self.context.set_is_binding_element(true);
        let is_assign = self.context.set_is_assignment_target(true);
        let first_covert = self.context.first_covert_initialized_name_error.take();
        let ret = f(self)?;
        if let Some(item) = &self.context.first_covert_initialized_name_error {
            return Err(Error::UnexpectedToken(
                item.location.start,
                format!("{:?}", item.token),
            ));
        }
        self.context.set_is_binding_element(is_binding);
        self.context.set_is_assignment_target(is_assign);
        self.context.first_covert_initialized_name_error = first_covert;
        Ok(ret)
    }

    #[tracing::instrument(level = "trace", skip(self, f))]
    fn inherit_cover_grammar<T>(&mut self, f: impl Fn(&mut Self) -> Res<T>) -> Res<T> {
        let is_binding = self.context.set_is_binding_element(true);
        let is_assign = self.context.set_is_assignment_target(true);
        let prev_first = self.context.first_covert_initialized_name_error.take();
        let ret = f(self)?;
        self.context
            .set_is_binding_element(self.context.is_binding_element && is_binding);
        self.context
            .set_is_assignment_target(self.context.is_assignment_target && is_assign);
        if prev_first.is_some() {
            self.context.first_covert_initialized_name_error = prev_first;
        }
        Ok(ret)
    }

    /// Request the next token from the scanner
    /// swap the last look ahead with this new token
    /// and return the last token
    #[tracing::instrument(level = "trace", skip(self))]
    fn next_item(&mut self) -> Res<Item<&'b str>> {
        log::trace!("next_item {}", self.context.has_line_term);
        let mut comment_line_term = false;
        loop {
            self.context.has_line_term = comment_line_term || self.scanner.has_pending_new_line();
            if let Some(look_ahead) = self.scanner.next() {
                let look_ahead = look_ahead?;
                self.look_ahead_position = look_ahead.location.start;
                if look_ahead.token.is_comment() {
                    if let Token::Comment(ref inner) = look_ahead.token {
                        if inner.is_multi_line() {
                            comment_line_term =
                                self.context.has_line_term || Self::comment_has_line_term(inner);
                        }
                    }
                    self.comment_handler.handle_comment(look_ahead);
                    continue;
                }
                self.current_position = self.look_ahead_position;
                let ret = replace(&mut self.look_ahead, look_ahead);
                self.current_end = ret.location.end;
                return Ok(ret);
            } else {
                // if the next item is None, the iterator is spent
                // if the last token was EOF then we want to return that
                // and mark that we have found EOF, if we get here a second
                // time we want to return the ParseAfterEoF error
                if self.look_ahead.token.is_eof() {
                    if self.found_eof {
                        return Err(Error::ParseAfterEoF);
                    } else {
                        self.found_eof = true;
                        self.current_end = self.look_ahead.location.end;
                        return Ok(self.look_ahead.clone());
                    }
                } else {
                    return Err(Error::UnexpectedEoF);
                }
            }
        }
    }

    fn comment_has_line_term(comment: &Comment<&'b str>) -> bool {
        if let ress::tokens::CommentKind::Multi = comment.kind {
            comment
                .content
                .chars()
                .any(|c| c == '\n' || c == '\r' || c == '\u{2028}' || c == '\u{2029}')
        } else {
            false
        }
    }

    /// Get the next token and validate that it matches
    /// the punct provided, discarding the result
    /// if it does
    fn expect_punct(&mut self, p: Punct) -> Res<()> {
        let next = self.next_item()?;
        if !next.token.matches_punct(p) {
            return self.expected_token_error(&next, &[&format!("{:?}", p)]);
        }
        Ok(())
    }

    /// Move on to the next item and validate it matches
    /// the keyword provided, discarding the result
    /// if it does
    fn expect_keyword(&mut self, k: Keyword<()>) -> Res<()> {
        let next = self.next_item()?;
        if !next.token.matches_keyword(k) {
            return self.expected_token_error(&next, &[&format!("{:?}", k)]);
        }
        Ok(())
    }

    fn expect_contextual_keyword(&mut self, target: &str) -> Res<()> {
        let next = self.next_item()?;
        if !next.token.matches_ident_str(target) {
            return self.expected_token_error(&next, &[target]);
        }
        Ok(())
    }

    /// The arrow must appear on the same line as its parameters
    #[tracing::instrument(level = "trace", skip(self))]
    fn expect_fat_arrow(&mut self) -> Res<()> {
        if self.look_ahead.token.matches_punct(Punct::EqualGreaterThan) {
            if self.context.has_line_term {
                Err(Error::NewLineAfterFatArrow(self.look_ahead_position))
            } else {
                let _arrow = self.next_item()?;
                Ok(())
            }
        } else {
            self.expected_token_error(&self.look_ahead, &["=>"])
        }
    }

    /// Test for if the next token is a specific punct
    fn at_punct(&self, p: Punct) -> bool {
        self.look_ahead.token.matches_punct(p)
    }

    /// Test for if the next token is a specific keyword
    fn at_keyword(&self, k: Keyword<()>) -> bool {
        self.look_ahead.token.matches_keyword(k)
    }

    /// Tests if a token matches an &str that might represent
    /// a contextual keyword like `of` or `static`
    fn at_contextual_keyword(&self, s: &str) -> bool {
        self.look_ahead.token.matches_ident_str(s)
    }

    /// This test is for all the operators that might be part
    /// of an assignment statement
    fn at_assign(&self) -> bool {
        self.look_ahead.token.matches_punct(Punct::Equal)
            || self.look_ahead.token.matches_punct(Punct::AsteriskEqual)
            || self
                .look_ahead
                .token
                .matches_punct(Punct::ForwardSlashEqual)
            || self.look_ahead.token.matches_punct(Punct::PercentEqual)
            || self.look_ahead.token.matches_punct(Punct::PlusEqual)
            || self.look_ahead.token.matches_punct(Punct::DashEqual)
            || self
                .look_ahead
                .token
                .matches_punct(Punct::DoubleLessThanEqual)
            || self
                .look_ahead
                .token
                .matches_punct(Punct::DoubleGreaterThanEqual)
            || self
                .look_ahead
                .token
                .matches_punct(Punct::TripleGreaterThanEqual)
            || self.look_ahead.token.matches_punct(Punct::PipeEqual)
            || self.look_ahead.token.matches_punct(Punct::CaretEqual)
            || self.look_ahead.token.matches_punct(Punct::AmpersandEqual)
    }

    /// Lexical declarations require the next token
    /// (not including any comments)
    /// to be an identifier, `let`, `yield`, `{`, or `[`
    #[tracing::instrument(level = "trace", skip(self))]
    fn at_lexical_decl(&mut self) -> bool {
        let state = self.scanner.get_state();
        if self.scanner.skip_comments().is_err() {
            self.scanner.set_state(state);
            return false;
        }
        let ret = if let Some(next) = self.scanner.next() {
            if let Ok(next) = next {
                next.token.is_ident()
                    || next.token.matches_punct(Punct::OpenBracket)
                    || next.token.matches_punct(Punct::OpenBrace)
                    || next.token.matches_keyword(Keyword::Let(()))
                    || next.token.matches_keyword(Keyword::Yield(()))
            } else {
                false
            }
        } else {
            false
        };
        self.scanner.set_state(state);
        ret
    }

    fn at_possible_ident(&self) -> bool {
        self.look_ahead.token.is_ident()
            || self.look_ahead.token.is_keyword()
            || self.look_ahead.token.is_null()
            || matches!(self.look_ahead.token, Token::Boolean(_))
    }

    /// A return argument must start on the same logical line, a
    /// preceding line terminator always means the bare form
    fn at_return_arg(&self) -> bool {
        if self.context.has_line_term {
            return false;
        }
        !self.at_punct(Punct::SemiColon)
            && !self.at_punct(Punct::CloseBrace)
            && !self.look_ahead.is_eof()
    }

    /// Tests if the parser is currently at the
    /// start of an expression, used by `yield` to decide if an
    /// argument follows
    fn is_start_of_expr(&self) -> bool {
        let mut ret = true;
        let token = &self.look_ahead.token;
        if token.is_punct() {
            ret = token.matches_punct(Punct::OpenBracket)
                || token.matches_punct(Punct::OpenParen)
                || token.matches_punct(Punct::OpenBrace)
                || token.matches_punct(Punct::Plus)
                || token.matches_punct(Punct::Dash)
                || token.matches_punct(Punct::Bang)
                || token.matches_punct(Punct::Tilde)
                || token.matches_punct(Punct::DoublePlus)
                || token.matches_punct(Punct::DoubleDash)
        }
        if token.is_keyword() {
            ret = token.matches_keyword(Keyword::Class(()))
                || token.matches_keyword(Keyword::Delete(()))
                || token.matches_keyword(Keyword::Function(()))
                || token.matches_keyword(Keyword::Let(()))
                || token.matches_keyword(Keyword::New(()))
                || token.matches_keyword(Keyword::Super(()))
                || token.matches_keyword(Keyword::This(()))
                || token.matches_keyword(Keyword::TypeOf(()))
                || token.matches_keyword(Keyword::Void(()))
                || token.matches_keyword(Keyword::Yield(()))
        }
        if token.is_regex() {
            ret = true;
        }
        ret
    }

    /// Since semi-colons are optional, this function will
    /// check the next token, if it is a semi-colon it will
    /// consume it otherwise we need to either be at a line terminator
    /// EoF or a close brace
    #[tracing::instrument(level = "trace", skip(self))]
    fn consume_semicolon(&mut self) -> Res<()> {
        log::trace!("consume_semicolon {}", self.context.has_line_term);
        if self.at_punct(Punct::SemiColon) {
            let _semi = self.next_item()?;
        } else if !self.context.has_line_term
            && !self.look_ahead.token.is_eof()
            && !self.at_punct(Punct::CloseBrace)
        {
            return self.expected_token_error(&self.look_ahead, &["`;`", "`eof`", "`}`"]);
        }
        Ok(())
    }

    fn slice_text(&self, item: &Item<&'b str>) -> Res<Cow<'b, str>> {
        let slice = self
            .scanner
            .str_for(&item.span)
            .ok_or_else(|| self.op_error("unable to get the source text for a token"))?;
        Ok(Cow::Borrowed(slice))
    }

    /// Complete a node's location, from the provided start through
    /// the end of the most recently consumed token
    fn node_loc(&self, start: Position) -> SourceLocation {
        SourceLocation::new(start, self.current_end)
    }

    fn expected_token_error<T>(&self, item: &Item<&'b str>, expectation: &[&str]) -> Res<T> {
        let pos = item.location.start;
        let expectation = expectation
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == expectation.len() - 1 && expectation.len() > 1 {
                    format!("or `{}`", s)
                } else {
                    format!("`{}`", s)
                }
            })
            .collect::<Vec<String>>()
            .join(", ");
        Err(Error::UnexpectedToken(
            pos,
            format!("Expected {}; found {:?}", expectation, item.token),
        ))
    }

    fn unexpected_token_error<T>(&self, item: &Item<&'b str>, msg: &str) -> Res<T> {
        let pos = item.location.start;
        let name = self.scanner.string_for(&item.span).unwrap_or_default();
        Err(Error::UnexpectedToken(
            pos,
            format!("Found unexpected token: {}; {}", name, msg),
        ))
    }

    fn op_error(&self, msg: &str) -> Error {
        Error::OperationError(self.current_position, msg.to_owned())
    }

    fn reinterpret_error(&self, from: &str, to: &str) -> Error {
        Error::UnableToReinterpret(self.current_position, from.to_owned(), to.to_owned())
    }
}

impl<'b, CH> Iterator for Parser<'b, CH>
where
    CH: CommentHandler<'b> + Sized,
{
    type Item = Res<ProgramPart<'b>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.look_ahead.token.is_eof() || self.context.errored {
            None
        } else {
            Some(self.next_part())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive() {
        let js = "'use strict'";
        let mut p = Parser::new(js).unwrap();
        let script = p.parse().unwrap();
        assert_eq!(script.parts().len(), 1);
    }

    #[test]
    fn context_flags_restored_on_error() {
        let mut parser = Parser::new("1").unwrap();
        let flags = (
            parser.context.allow_in,
            parser.context.allow_yield,
            parser.context.in_function_body,
        );
        let res: Res<()> = parser.with_ctx(
            ContextOverride::default()
                .allow_in(false)
                .allow_yield(true)
                .in_function_body(true),
            |me| {
                assert!(!me.context.allow_in);
                assert!(me.context.allow_yield);
                assert!(me.context.in_function_body);
                Err(Error::UnexpectedEoF)
            },
        );
        assert!(res.is_err());
        let after = (
            parser.context.allow_in,
            parser.context.allow_yield,
            parser.context.in_function_body,
        );
        assert_eq!(flags, after);
    }

    #[test]
    fn empty_override_is_a_no_op() {
        let mut parser = Parser::new("1").unwrap();
        let flags = (
            parser.context.allow_in,
            parser.context.allow_yield,
            parser.context.in_function_body,
        );
        let _: Res<()> = parser.with_ctx(ContextOverride::default(), |_| Ok(()));
        let after = (
            parser.context.allow_in,
            parser.context.allow_yield,
            parser.context.in_function_body,
        );
        assert_eq!(flags, after);
    }

    #[test]
    fn octal_guard_only_rejects_octal_digits() {
        let mut strict = Parser::new("'use strict'; var x = 08;").unwrap();
        assert!(strict.parse().is_ok(), "08 does not match ^0[0-7]+$");
        let mut strict = Parser::new("'use strict'; var x = 010;").unwrap();
        match strict.parse() {
            Err(Error::OctalLiteral(_)) => (),
            other => panic!("expected an octal literal error, found {:?}", other),
        }
        let mut loose = Parser::new("var x = 010;").unwrap();
        assert!(loose.parse().is_ok());
    }
}
