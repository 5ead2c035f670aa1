use ress::Position;
use std::fmt::{Display, Formatter, Result};

/// The error type produced by a failed parse. Every variant that
/// can point at the source carries the scanner position where the
/// parser gave up.
#[derive(Debug)]
pub enum Error {
    UnexpectedToken(Position, String),
    ScannerError(ress::error::Error),
    UnexpectedEoF,
    ParseAfterEoF,
    UnableToReinterpret(Position, String, String),
    OctalLiteral(Position),
    LabelledFunctionInStrict(Position),
    UnqualifiedDelete(Position),
    MultipleDefaults(Position),
    ThrowWithNoArg(Position),
    TryWithNoCatchOrFinally(Position),
    InvalidCatchArg(Position),
    InvalidStartOfExpressionStmt(Position, String),
    NewLineAfterFatArrow(Position),
    InvalidGetterParams(Position),
    InvalidSetterParams(Position),
    InvalidSuper(Position),
    InvalidNewTarget(Position),
    InvalidLHS(Position),
    DuplicateCtor(Position),
    UseOfModuleFeatureOutsideOfModule(Position, String),
    OperationError(Position, String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Error::UnexpectedToken(ref pos, ref msg) => {
                write!(f, "Unexpected token at {}: {}", pos, msg)
            }
            Error::ScannerError(ref inner) => write!(f, "Failed to tokenize input: {}", inner),
            Error::UnexpectedEoF => write!(f, "Unexpectedly found the end of the file"),
            Error::ParseAfterEoF => write!(
                f,
                "Parser attempted to get the next token after finding the end of the file"
            ),
            Error::UnableToReinterpret(ref pos, ref from, ref to) => {
                write!(f, "Unable to re-interpret {} as {} at {}", from, to, pos)
            }
            Error::OctalLiteral(ref pos) => {
                write!(f, "Octal literals are not allowed in strict mode at {}", pos)
            }
            Error::LabelledFunctionInStrict(ref pos) => write!(
                f,
                "Labelled functions are not allowed in strict mode at {}",
                pos
            ),
            Error::UnqualifiedDelete(ref pos) => write!(
                f,
                "Deleting an unqualified identifier is not allowed in strict mode at {}",
                pos
            ),
            Error::MultipleDefaults(ref pos) => {
                write!(f, "Multiple default clause in switch statement at {}", pos)
            }
            Error::ThrowWithNoArg(ref pos) => {
                write!(f, "Found a throw statement with no argument at {}", pos)
            }
            Error::TryWithNoCatchOrFinally(ref pos) => write!(
                f,
                "Found a try statement with no catch or finally clause at {}",
                pos
            ),
            Error::InvalidCatchArg(ref pos) => {
                write!(f, "Found a catch clause with an invalid argument at {}", pos)
            }
            Error::InvalidStartOfExpressionStmt(ref pos, ref token) => write!(
                f,
                "An expression statement cannot start with `{}` at {}",
                token, pos
            ),
            Error::NewLineAfterFatArrow(ref pos) => write!(
                f,
                "A fat arrow must appear on the same line as its arguments at {}",
                pos
            ),
            Error::InvalidGetterParams(ref pos) => {
                write!(f, "A getter method must have no parameters at {}", pos)
            }
            Error::InvalidSetterParams(ref pos) => write!(
                f,
                "A setter method must have exactly one non-rest parameter at {}",
                pos
            ),
            Error::InvalidSuper(ref pos) => write!(
                f,
                "Found `super` outside of a function body or not followed by `(`, `.` or `[` at {}",
                pos
            ),
            Error::InvalidNewTarget(ref pos) => write!(
                f,
                "`new.target` is only valid inside of a function body at {}",
                pos
            ),
            Error::InvalidLHS(ref pos) => write!(f, "Invalid left hand side at {}", pos),
            Error::DuplicateCtor(ref pos) => {
                write!(f, "Found a class with more than one constructor at {}", pos)
            }
            Error::UseOfModuleFeatureOutsideOfModule(ref pos, ref feature) => write!(
                f,
                "Attempted to use a module feature ({}) outside of a module at {}",
                feature, pos
            ),
            Error::OperationError(ref pos, ref msg) => {
                write!(f, "Invalid operation: {} at {}", msg, pos)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ress::error::Error> for Error {
    fn from(other: ress::error::Error) -> Self {
        Error::ScannerError(other)
    }
}

impl Error {
    /// The source position this error points at, if any. The end of
    /// input errors have no position.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::UnexpectedEoF | Error::ParseAfterEoF | Error::ScannerError(_) => None,
            Error::UnexpectedToken(pos, _)
            | Error::UnableToReinterpret(pos, _, _)
            | Error::OctalLiteral(pos)
            | Error::LabelledFunctionInStrict(pos)
            | Error::UnqualifiedDelete(pos)
            | Error::MultipleDefaults(pos)
            | Error::ThrowWithNoArg(pos)
            | Error::TryWithNoCatchOrFinally(pos)
            | Error::InvalidCatchArg(pos)
            | Error::InvalidStartOfExpressionStmt(pos, _)
            | Error::NewLineAfterFatArrow(pos)
            | Error::InvalidGetterParams(pos)
            | Error::InvalidSetterParams(pos)
            | Error::InvalidSuper(pos)
            | Error::InvalidNewTarget(pos)
            | Error::InvalidLHS(pos)
            | Error::DuplicateCtor(pos)
            | Error::UseOfModuleFeatureOutsideOfModule(pos, _)
            | Error::OperationError(pos, _) => Some(*pos),
        }
    }
}
