pub mod fact;
pub mod result;
pub mod value;

pub use fact::{CpFact, SetFact};
pub use result::DataflowResult;
pub use value::Value;
