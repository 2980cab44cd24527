pub(crate) mod parser;
