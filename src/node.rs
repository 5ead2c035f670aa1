//! The AST produced by the parser. The node set mirrors the ESTree
//! ES2015 shapes, every node carries the `SourceLocation` covering
//! its first through last token.
use ress::SourceLocation;
use std::borrow::Cow;

use crate::error::Error;

/// Anything that knows where it came from in the original source
pub trait Node {
    fn loc(&self) -> SourceLocation;
}

/// The fully parsed program, either a script or a module
#[derive(Debug, Clone, PartialEq)]
pub enum Program<'a> {
    /// An ES module, strict from the first token
    Mod(Vec<ProgramPart<'a>>),
    /// A plain old script
    Script(Vec<ProgramPart<'a>>),
}

impl<'a> Program<'a> {
    pub fn parts(&self) -> &[ProgramPart<'a>] {
        match self {
            Program::Mod(parts) | Program::Script(parts) => parts,
        }
    }
}

/// One top level item, also the contents of blocks and function bodies
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramPart<'a> {
    Decl(Decl<'a>),
    Stmt(Stmt<'a>),
}

impl<'a> ProgramPart<'a> {
    pub fn decl(decl: Decl<'a>) -> Self {
        ProgramPart::Decl(decl)
    }
    pub fn stmt(stmt: Stmt<'a>) -> Self {
        ProgramPart::Stmt(stmt)
    }
}

impl<'a> Node for ProgramPart<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            ProgramPart::Decl(inner) => inner.loc(),
            ProgramPart::Stmt(inner) => inner.loc(),
        }
    }
}

/// The declarations, things that appear in statement list item
/// position but are not plain statements
#[derive(Debug, Clone, PartialEq)]
pub enum Decl<'a> {
    Var(VarDecls<'a>),
    Func(Func<'a>),
    Class(Class<'a>),
    Import(Box<ModImport<'a>>),
    Export(Box<ModExport<'a>>),
}

impl<'a> Node for Decl<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            Decl::Var(inner) => inner.loc,
            Decl::Func(inner) => inner.loc,
            Decl::Class(inner) => inner.loc,
            Decl::Import(inner) => inner.loc,
            Decl::Export(inner) => inner.loc(),
        }
    }
}

/// A `var`, `let` or `const` declaration with its declarators
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecls<'a> {
    pub kind: VarKind,
    pub decls: Vec<VarDecl<'a>>,
    pub loc: SourceLocation,
}

/// A single declarator, `x = 1` in `var x = 1, y;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl<'a> {
    pub id: Pat<'a>,
    pub init: Option<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// `import` in all of its shapes
/// ```js
/// import Thing from 'place';
/// import * as Stuff from 'place';
/// import {Thing as Other} from 'place';
/// import 'place';
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModImport<'a> {
    pub specifiers: Vec<ImportSpecifier<'a>>,
    pub source: Lit<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier<'a> {
    Default(DefaultImportSpec<'a>),
    Namespace(NamespaceImportSpec<'a>),
    Normal(NormalImportSpec<'a>),
}

impl<'a> Node for ImportSpecifier<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            ImportSpecifier::Default(inner) => inner.loc,
            ImportSpecifier::Namespace(inner) => inner.loc,
            ImportSpecifier::Normal(inner) => inner.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultImportSpec<'a> {
    pub id: Ident<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceImportSpec<'a> {
    pub id: Ident<'a>,
    pub loc: SourceLocation,
}

/// `{Thing}` or `{Thing as Other}`, the alias is the local binding
/// when present
#[derive(Debug, Clone, PartialEq)]
pub struct NormalImportSpec<'a> {
    pub imported: Ident<'a>,
    pub alias: Option<Ident<'a>>,
    pub loc: SourceLocation,
}

impl<'a> NormalImportSpec<'a> {
    pub fn local(&self) -> &Ident<'a> {
        self.alias.as_ref().unwrap_or(&self.imported)
    }
}

/// `export` in all of its shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ModExport<'a> {
    /// ```js
    /// export * from 'mod';
    /// ```
    All(ExportAllDecl<'a>),
    /// ```js
    /// export default function() {}
    /// export default 1;
    /// ```
    Default(DefaultExportDecl<'a>),
    /// ```js
    /// export {foo as bar};
    /// export {foo} from 'mod';
    /// export var foo = 1;
    /// ```
    Named(NamedExportDecl<'a>),
}

impl<'a> Node for ModExport<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            ModExport::All(inner) => inner.loc,
            ModExport::Default(inner) => inner.loc,
            ModExport::Named(inner) => inner.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDecl<'a> {
    pub source: Lit<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultExportDecl<'a> {
    pub value: DefaultExportValue<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExportValue<'a> {
    Decl(Decl<'a>),
    Expr(Expr<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedExportDecl<'a> {
    pub decl: Option<Box<Decl<'a>>>,
    pub specifiers: Vec<ExportSpecifier<'a>>,
    pub source: Option<Lit<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier<'a> {
    pub local: Ident<'a>,
    pub alias: Option<Ident<'a>>,
    pub loc: SourceLocation,
}

/// The statement family
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    Expr(ExprStmt<'a>),
    Block(BlockStmt<'a>),
    Empty(SourceLocation),
    Debugger(SourceLocation),
    With(WithStmt<'a>),
    Return(ReturnStmt<'a>),
    Labeled(LabeledStmt<'a>),
    Break(BreakStmt<'a>),
    Continue(ContinueStmt<'a>),
    If(IfStmt<'a>),
    Switch(SwitchStmt<'a>),
    Throw(ThrowStmt<'a>),
    Try(TryStmt<'a>),
    While(WhileStmt<'a>),
    DoWhile(DoWhileStmt<'a>),
    For(ForStmt<'a>),
    ForIn(ForInStmt<'a>),
    ForOf(ForOfStmt<'a>),
    Var(VarDecls<'a>),
}

impl<'a> Node for Stmt<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            Stmt::Expr(inner) => inner.loc,
            Stmt::Block(inner) => inner.loc,
            Stmt::Empty(loc) => *loc,
            Stmt::Debugger(loc) => *loc,
            Stmt::With(inner) => inner.loc,
            Stmt::Return(inner) => inner.loc,
            Stmt::Labeled(inner) => inner.loc,
            Stmt::Break(inner) => inner.loc,
            Stmt::Continue(inner) => inner.loc,
            Stmt::If(inner) => inner.loc,
            Stmt::Switch(inner) => inner.loc,
            Stmt::Throw(inner) => inner.loc,
            Stmt::Try(inner) => inner.loc,
            Stmt::While(inner) => inner.loc,
            Stmt::DoWhile(inner) => inner.loc,
            Stmt::For(inner) => inner.loc,
            Stmt::ForIn(inner) => inner.loc,
            Stmt::ForOf(inner) => inner.loc,
            Stmt::Var(inner) => inner.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt<'a> {
    pub expr: Expr<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt<'a> {
    pub stmts: Vec<ProgramPart<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStmt<'a> {
    pub object: Expr<'a>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt<'a> {
    pub argument: Option<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt<'a> {
    pub label: Ident<'a>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt<'a> {
    pub label: Option<Ident<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt<'a> {
    pub label: Option<Ident<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt<'a> {
    pub test: Expr<'a>,
    pub consequent: Box<Stmt<'a>>,
    pub alternate: Option<Box<Stmt<'a>>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt<'a> {
    pub discriminant: Expr<'a>,
    pub cases: Vec<SwitchCase<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase<'a> {
    /// `None` for the `default` clause
    pub test: Option<Expr<'a>>,
    pub consequent: Vec<ProgramPart<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStmt<'a> {
    pub argument: Expr<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt<'a> {
    pub block: BlockStmt<'a>,
    pub handler: Option<CatchClause<'a>>,
    pub finalizer: Option<BlockStmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause<'a> {
    pub param: Pat<'a>,
    pub body: BlockStmt<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt<'a> {
    pub test: Expr<'a>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt<'a> {
    pub body: Box<Stmt<'a>>,
    pub test: Expr<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt<'a> {
    pub init: Option<LoopInit<'a>>,
    pub test: Option<Expr<'a>>,
    pub update: Option<Expr<'a>>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopInit<'a> {
    Variable(VarDecls<'a>),
    Expr(Expr<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStmt<'a> {
    pub left: LoopLeft<'a>,
    pub right: Expr<'a>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStmt<'a> {
    pub left: LoopLeft<'a>,
    pub right: Expr<'a>,
    pub body: Box<Stmt<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopLeft<'a> {
    Variable(VarDecls<'a>),
    Pat(Pat<'a>),
    Expr(Expr<'a>),
}

pub type Identifier<'a> = Cow<'a, str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Ident<'a> {
    pub name: Identifier<'a>,
    pub loc: SourceLocation,
}

impl<'a> Ident<'a> {
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

/// A function, shared by declarations, expressions and method values
#[derive(Debug, Clone, PartialEq)]
pub struct Func<'a> {
    pub id: Option<Ident<'a>>,
    pub params: Vec<FuncArg<'a>>,
    pub body: FuncBody<'a>,
    pub generator: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FuncArg<'a> {
    Expr(Expr<'a>),
    Pat(Pat<'a>),
}

impl<'a> FuncArg<'a> {
    /// A simple argument is a plain identifier, no destructuring,
    /// no default, no rest
    pub fn is_simple(&self) -> bool {
        match self {
            FuncArg::Pat(Pat::Ident(_)) | FuncArg::Expr(Expr::Ident(_)) => true,
            _ => false,
        }
    }
}

impl<'a> Node for FuncArg<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            FuncArg::Expr(inner) => inner.loc(),
            FuncArg::Pat(inner) => inner.loc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody<'a> {
    pub stmts: Vec<ProgramPart<'a>>,
    pub loc: SourceLocation,
}

/// A class, either a declaration or an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Class<'a> {
    pub id: Option<Ident<'a>>,
    pub super_class: Option<Box<Expr<'a>>>,
    pub body: ClassBody<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody<'a> {
    pub elements: Vec<MethodDef<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef<'a> {
    pub key: PropKey<'a>,
    pub value: Func<'a>,
    pub kind: MethodKind,
    pub computed: bool,
    pub is_static: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// The expression family
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Array(ArrayExpr<'a>),
    ArrowFunc(ArrowFuncExpr<'a>),
    /// The cover node for a parenthesized arrow parameter list, only
    /// alive between `(`…`)` and the `=>` that commits it. It never
    /// appears in a completed parse result.
    ArrowParamPlaceHolder(ArrowParamPlaceHolder<'a>),
    Assign(AssignExpr<'a>),
    Binary(BinaryExpr<'a>),
    Call(CallExpr<'a>),
    Class(Box<Class<'a>>),
    Conditional(ConditionalExpr<'a>),
    Func(Func<'a>),
    Ident(Ident<'a>),
    Lit(Lit<'a>),
    Logical(LogicalExpr<'a>),
    Member(MemberExpr<'a>),
    MetaProp(MetaProp<'a>),
    New(NewExpr<'a>),
    Obj(ObjExpr<'a>),
    Paren(Box<ParenExpr<'a>>),
    Sequence(SequenceExpr<'a>),
    Spread(Box<SpreadExpr<'a>>),
    Super(SourceLocation),
    TaggedTemplate(TaggedTemplateExpr<'a>),
    This(SourceLocation),
    Unary(UnaryExpr<'a>),
    Update(UpdateExpr<'a>),
    Yield(YieldExpr<'a>),
}

impl<'a> Expr<'a> {
    pub fn is_ident(&self) -> bool {
        matches!(self, Expr::Ident(_))
    }

    pub fn is_arrow_param_placeholder(&self) -> bool {
        matches!(self, Expr::ArrowParamPlaceHolder(_))
    }

    pub fn as_ident(self) -> Result<Ident<'a>, Error> {
        match self {
            Expr::Ident(ident) => Ok(ident),
            _ => Err(Error::UnableToReinterpret(
                self.loc().start,
                "expression".to_string(),
                "identifier".to_string(),
            )),
        }
    }
}

impl<'a> Node for Expr<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            Expr::Array(inner) => inner.loc,
            Expr::ArrowFunc(inner) => inner.loc,
            Expr::ArrowParamPlaceHolder(inner) => inner.loc,
            Expr::Assign(inner) => inner.loc,
            Expr::Binary(inner) => inner.loc,
            Expr::Call(inner) => inner.loc,
            Expr::Class(inner) => inner.loc,
            Expr::Conditional(inner) => inner.loc,
            Expr::Func(inner) => inner.loc,
            Expr::Ident(inner) => inner.loc,
            Expr::Lit(inner) => inner.loc(),
            Expr::Logical(inner) => inner.loc,
            Expr::Member(inner) => inner.loc,
            Expr::MetaProp(inner) => inner.loc,
            Expr::New(inner) => inner.loc,
            Expr::Obj(inner) => inner.loc,
            Expr::Paren(inner) => inner.loc,
            Expr::Sequence(inner) => inner.loc,
            Expr::Spread(inner) => inner.loc,
            Expr::Super(loc) => *loc,
            Expr::TaggedTemplate(inner) => inner.loc,
            Expr::This(loc) => *loc,
            Expr::Unary(inner) => inner.loc,
            Expr::Update(inner) => inner.loc,
            Expr::Yield(inner) => inner.loc,
        }
    }
}

/// An array literal, `None` elements are elisions
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr<'a> {
    pub elements: Vec<Option<Expr<'a>>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjExpr<'a> {
    pub props: Vec<Prop<'a>>,
    pub loc: SourceLocation,
}

/// A property of an object literal or object pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Prop<'a> {
    pub key: PropKey<'a>,
    pub value: PropValue<'a>,
    pub kind: PropKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropKey<'a> {
    Ident(Ident<'a>),
    Lit(Lit<'a>),
    /// A computed key, `[a + 1]: x`
    Expr(Expr<'a>),
}

impl<'a> PropKey<'a> {
    /// Compare a non-computed key against a known name, covering both
    /// the identifier and string literal spellings
    pub fn matches(&self, name: &str) -> bool {
        match self {
            PropKey::Ident(ident) => ident.name == name,
            PropKey::Lit(Lit::String(s)) => s.value == name,
            _ => false,
        }
    }
}

impl<'a> Node for PropKey<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            PropKey::Ident(inner) => inner.loc,
            PropKey::Lit(inner) => inner.loc(),
            PropKey::Expr(inner) => inner.loc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue<'a> {
    Expr(Expr<'a>),
    Pat(Pat<'a>),
    /// Shorthand, the key doubles as the value
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadExpr<'a> {
    pub argument: Expr<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr<'a> {
    pub operator: AssignOp,
    pub left: AssignLeft<'a>,
    pub right: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignLeft<'a> {
    Pat(Pat<'a>),
    Expr(Box<Expr<'a>>),
}

impl<'a> Node for AssignLeft<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            AssignLeft::Pat(inner) => inner.loc(),
            AssignLeft::Expr(inner) => inner.loc(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Equal,
    PlusEqual,
    MinusEqual,
    TimesEqual,
    DivEqual,
    ModEqual,
    LeftShiftEqual,
    RightShiftEqual,
    UnsignedRightShiftEqual,
    OrEqual,
    XOrEqual,
    AndEqual,
}

impl AssignOp {
    pub fn from_punct(p: ress::prelude::Punct) -> Option<Self> {
        use ress::prelude::Punct;
        match p {
            Punct::Equal => Some(AssignOp::Equal),
            Punct::PlusEqual => Some(AssignOp::PlusEqual),
            Punct::DashEqual => Some(AssignOp::MinusEqual),
            Punct::AsteriskEqual => Some(AssignOp::TimesEqual),
            Punct::ForwardSlashEqual => Some(AssignOp::DivEqual),
            Punct::PercentEqual => Some(AssignOp::ModEqual),
            Punct::DoubleLessThanEqual => Some(AssignOp::LeftShiftEqual),
            Punct::DoubleGreaterThanEqual => Some(AssignOp::RightShiftEqual),
            Punct::TripleGreaterThanEqual => Some(AssignOp::UnsignedRightShiftEqual),
            Punct::PipeEqual => Some(AssignOp::OrEqual),
            Punct::CaretEqual => Some(AssignOp::XOrEqual),
            Punct::AmpersandEqual => Some(AssignOp::AndEqual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr<'a> {
    pub operator: BinaryOp,
    pub left: Box<Expr<'a>>,
    pub right: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Times,
    Over,
    Mod,
    Or,
    XOr,
    And,
    In,
    InstanceOf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr<'a> {
    pub operator: LogicalOp,
    pub left: Box<Expr<'a>>,
    pub right: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    Or,
    And,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr<'a> {
    pub object: Box<Expr<'a>>,
    pub property: Box<Expr<'a>>,
    pub computed: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr<'a> {
    pub test: Box<Expr<'a>>,
    pub consequent: Box<Expr<'a>>,
    pub alternate: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr<'a> {
    pub callee: Box<Expr<'a>>,
    pub arguments: Vec<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr<'a> {
    pub callee: Box<Expr<'a>>,
    pub arguments: Vec<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpr<'a> {
    pub expressions: Vec<Expr<'a>>,
    pub loc: SourceLocation,
}

/// An expression wrapped in parentheses that did not turn out to be
/// an arrow parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr<'a> {
    pub expr: Expr<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowParamPlaceHolder<'a> {
    pub args: Vec<FuncArg<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFuncExpr<'a> {
    pub params: Vec<FuncArg<'a>>,
    pub body: ArrowFuncBody<'a>,
    /// true for the concise form, `x => x + 1`
    pub expression: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowFuncBody<'a> {
    FuncBody(FuncBody<'a>),
    Expr(Box<Expr<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr<'a> {
    pub operator: UnaryOp,
    pub argument: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

impl<'a> UnaryExpr<'a> {
    pub fn has_operator(&self, op: UnaryOp) -> bool {
        self.operator == op
    }

    pub fn has_ident_arg(&self) -> bool {
        self.argument.is_ident()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    Tilde,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpr<'a> {
    pub operator: UpdateOp,
    pub argument: Box<Expr<'a>>,
    pub prefix: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpr<'a> {
    pub argument: Option<Box<Expr<'a>>>,
    pub delegate: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpr<'a> {
    pub tag: Box<Expr<'a>>,
    pub quasi: TemplateLit<'a>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLit<'a> {
    pub quasis: Vec<TemplateElement<'a>>,
    pub expressions: Vec<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement<'a> {
    /// The text between the backtick/brace delimiters, escapes intact
    pub raw: Cow<'a, str>,
    pub cooked: Cow<'a, str>,
    pub tail: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaProp<'a> {
    pub meta: Ident<'a>,
    pub property: Ident<'a>,
    pub loc: SourceLocation,
}

/// The literals
#[derive(Debug, Clone, PartialEq)]
pub enum Lit<'a> {
    Null(SourceLocation),
    String(StringLit<'a>),
    Number(NumberLit<'a>),
    Boolean(BoolLit),
    RegEx(RegExLit<'a>),
    Template(TemplateLit<'a>),
}

impl<'a> Node for Lit<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            Lit::Null(loc) => *loc,
            Lit::String(inner) => inner.loc,
            Lit::Number(inner) => inner.loc,
            Lit::Boolean(inner) => inner.loc,
            Lit::RegEx(inner) => inner.loc,
            Lit::Template(inner) => inner.loc,
        }
    }
}

/// A string literal, the value has its quotes removed and escapes
/// left as written
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit<'a> {
    pub value: Cow<'a, str>,
    pub loc: SourceLocation,
}

/// A number literal, kept as the raw text it was written as
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit<'a> {
    pub raw: Cow<'a, str>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegExLit<'a> {
    pub pattern: Cow<'a, str>,
    pub flags: Cow<'a, str>,
    pub loc: SourceLocation,
}

/// The pattern family, the binding side of declarations and
/// destructuring
#[derive(Debug, Clone, PartialEq)]
pub enum Pat<'a> {
    Ident(Ident<'a>),
    Array(ArrayPat<'a>),
    Obj(ObjPat<'a>),
    Assign(AssignPat<'a>),
    Rest(Box<RestPat<'a>>),
}

impl<'a> Pat<'a> {
    pub fn is_ident(&self) -> bool {
        matches!(self, Pat::Ident(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Pat::Array(_))
    }

    pub fn is_obj(&self) -> bool {
        matches!(self, Pat::Obj(_))
    }
}

impl<'a> Node for Pat<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            Pat::Ident(inner) => inner.loc,
            Pat::Array(inner) => inner.loc,
            Pat::Obj(inner) => inner.loc,
            Pat::Assign(inner) => inner.loc,
            Pat::Rest(inner) => inner.loc,
        }
    }
}

/// An array destructuring target, `None` elements are elisions
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPat<'a> {
    pub elements: Vec<Option<ArrayPatPart<'a>>>,
    pub loc: SourceLocation,
}

/// One element of an array destructuring target. Assignment targets
/// that are not binding patterns, `[a, b.c] = x` say, stay behind as
/// raw expressions
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayPatPart<'a> {
    Pat(Pat<'a>),
    Expr(Expr<'a>),
}

impl<'a> Node for ArrayPatPart<'a> {
    fn loc(&self) -> SourceLocation {
        match self {
            ArrayPatPart::Pat(inner) => inner.loc(),
            ArrayPatPart::Expr(inner) => inner.loc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjPat<'a> {
    pub props: Vec<Prop<'a>>,
    pub loc: SourceLocation,
}

/// A default, `[a = 1] = []` or `function f(a = 1) {}`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignPat<'a> {
    pub left: Box<Pat<'a>>,
    pub right: Box<Expr<'a>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestPat<'a> {
    pub argument: Pat<'a>,
    pub loc: SourceLocation,
}

impl<'a> Node for Program<'a> {
    fn loc(&self) -> SourceLocation {
        let parts = self.parts();
        let start = parts
            .first()
            .map(|p| p.loc().start)
            .unwrap_or_else(|| ress::Position::new(1, 0));
        let end = parts
            .last()
            .map(|p| p.loc().end)
            .unwrap_or_else(|| ress::Position::new(1, 0));
        SourceLocation::new(start, end)
    }
}
