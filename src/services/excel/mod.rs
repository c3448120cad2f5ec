pub mod layout;
pub mod reader;
pub mod types;
pub mod utils;

pub use layout::LayoutError;
pub use reader::read_workbook;
pub use types::{Sheet, Workbook};
