//! `DataInput`: Context-specific data extraction
//!
//! The `DataInput` trait pulls one piece of data out of a context (for xmlsift,
//! a [`FactMapping`](crate::FactMapping)) and returns it as [`MatchingData`]
//! borrowed from that context.

use crate::MatchingData;
use std::fmt::Debug;

/// Extracts data from a context.
///
/// `DataInput` is the bridge between a context and the context-agnostic
/// [`InputMatcher`](crate::InputMatcher)s.
///
/// # Example
///
/// ```
/// use xmlsift::{DataInput, MatchingData};
///
/// #[derive(Debug)]
/// struct Invoice { number: String }
///
/// #[derive(Debug)]
/// struct NumberInput;
///
/// impl DataInput<Invoice> for NumberInput {
///     fn get<'a>(&self, ctx: &'a Invoice) -> MatchingData<'a> {
///         MatchingData::Text(&ctx.number)
///     }
/// }
///
/// let invoice = Invoice { number: "INV-1".into() };
/// assert_eq!(NumberInput.get(&invoice), MatchingData::Text("INV-1"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `DataInput<{Ctx}>`",
    label = "this type cannot extract data from `{Ctx}`",
    note = "DataInput<Ctx> extracts data from a specific context type, e.g. DataInput<FactMapping>"
)]
pub trait DataInput<Ctx>: Send + Sync + Debug {
    /// Extract data from the given context.
    ///
    /// Returns [`MatchingData::None`] if the requested data is not present.
    fn get<'a>(&self, ctx: &'a Ctx) -> MatchingData<'a>;
}

#[diagnostic::do_not_recommend]
impl<Ctx> DataInput<Ctx> for Box<dyn DataInput<Ctx>> {
    fn get<'a>(&self, ctx: &'a Ctx) -> MatchingData<'a> {
        (**self).get(ctx)
    }
}
