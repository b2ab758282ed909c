pub(crate) mod ambiguous;
pub(crate) mod db;
pub(crate) mod posix;
pub(crate) mod tzif;
