pub mod schema_ext;
pub mod spec;

pub(crate) use schema_ext::{OperationExt, SchemaExt, SpecExt, is_deprecated, ref_name};
