pub(crate) mod dot;
pub(crate) mod grid;
