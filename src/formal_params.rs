use crate::node::FuncArg;

/// The parsed parameter list of a function along with the facts
/// about its shape the enclosing productions care about
pub struct FormalParams<'a> {
    pub params: Vec<FuncArg<'a>>,
    /// true when every parameter is a plain identifier, the only
    /// shape that may be followed by a `"use strict"` directive
    pub simple: bool,
}

impl<'a> FormalParams<'a> {
    pub fn new(params: Vec<FuncArg<'a>>, simple: bool) -> Self {
        Self { params, simple }
    }
}

/// Check a formal parameter list built out of cover grammar
/// arguments, used when `=>` commits an arrow interpretation
pub fn list_is_simple(params: &[FuncArg]) -> bool {
    params.iter().all(FuncArg::is_simple)
}
