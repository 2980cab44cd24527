pub(crate) mod decompose;
pub(crate) mod normalize;
