mod comment_service;
mod report_service;
mod vote_service;

pub use comment_service::CommentService;
pub(crate) use report_service::REPORT_DETAIL_SELECT;
pub use report_service::ReportService;
pub use vote_service::VoteService;
