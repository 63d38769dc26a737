use async_trait::async_trait;
use time::Date;

use crate::domain::{
    models::{DailySummary, EmployeeId, RangeSummary, SessionDetail, SessionId},
    EngineError,
};

/// Inbound port for read-side session aggregation.
///
/// Never writes; safe to call concurrently with session mutations. A
/// session flipping from active to stopped mid-read is counted with
/// whichever duration value was read.
#[async_trait]
pub trait ReportingService: Send + Sync + 'static {
    /// Work time for one day, grouped by task. `date` defaults to today.
    async fn daily_summary(
        &self,
        employee_id: EmployeeId,
        date: Option<Date>,
    ) -> Result<DailySummary, EngineError>;

    /// Work time over an inclusive date range with per-day subtotals.
    async fn range_summary(
        &self,
        employee_id: EmployeeId,
        range: (Date, Date),
    ) -> Result<RangeSummary, EngineError>;

    /// One session with its live duration and same-day task total.
    async fn session_detail(
        &self,
        session_id: SessionId,
        employee_id: EmployeeId,
    ) -> Result<SessionDetail, EngineError>;
}
