pub(crate) mod mapper;
pub(crate) mod named;
pub(crate) mod table;
