pub(crate) mod naming;
pub(crate) mod png;
