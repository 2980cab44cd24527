pub(crate) mod stitch;
pub(crate) mod volume;
