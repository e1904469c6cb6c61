mod comment;
mod report;

pub use comment::{Comment, CommentWithAuthor};
pub use report::{NewReport, Report, ReportDetail, ReportStatus, StatusTransition, Urgency};
