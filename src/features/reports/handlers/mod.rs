mod comment_handler;
mod report_handler;
mod vote_handler;

pub use comment_handler::*;
pub use report_handler::*;
pub use vote_handler::*;
