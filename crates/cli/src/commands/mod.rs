pub(crate) mod datasets;
pub(crate) mod serve;
