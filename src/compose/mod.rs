pub(crate) mod compositor;
pub(crate) mod fill;
pub(crate) mod overlay;
