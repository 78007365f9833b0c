pub(crate) mod mask;
pub(crate) mod normalize;
pub(crate) mod premul;
