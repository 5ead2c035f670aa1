use ress::prelude::*;

/// Comments are skipped by the parser the same way whitespace is,
/// a comment handler gets a look at each one on the way past. The
/// default is to throw them away.
pub trait CommentHandler<'a> {
    fn handle_comment(&mut self, comment: Item<&'a str>);
}

/// The default comment handler, discards every comment it is handed
pub struct DefaultCommentHandler;

impl<'a> CommentHandler<'a> for DefaultCommentHandler {
    fn handle_comment(&mut self, _: Item<&'a str>) {}
}

impl<'a, F> CommentHandler<'a> for F
where
    F: FnMut(Item<&'a str>),
{
    fn handle_comment(&mut self, item: Item<&'a str>) {
        self(item)
    }
}
