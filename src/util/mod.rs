pub(crate) mod calendar;
pub(crate) mod escape;
pub(crate) mod parse;
