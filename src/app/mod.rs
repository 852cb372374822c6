//! Application layer: runs scans over ports and shapes their results.

pub mod forex;
pub mod report;
pub mod session;
pub mod sports;
pub mod status;

pub use forex::{discover_currencies, ForexReport, ForexScanner};
pub use report::{LegRecord, OpportunityRecord, OpportunityRow, SpreadRow};
pub use session::{Bookmark, ProfitPoint, Session, SessionSummary};
pub use sports::{EventScan, SportScan, SportsReport, SportsScanner};
pub use status::SourceStatus;
