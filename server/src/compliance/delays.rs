//! Accumulated-delay alerting.
//!
//! Runs inline after every delay mark. When an employee reaches the
//! monthly threshold, one alert per recipient is created: the roster
//! owner and, if that tutor has one, their supervisor. The database
//! unique index keeps re-crossing the threshold idempotent, so marking
//! a fourth or fifth delay in the same month adds nothing.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::repository::{alert, attendance, employee, roster, user, RepoError, RepoResult};
use crate::utils::time;
use shared::models::{AlertDetails, DelayEntry};

/// Delays in a month that trigger an alert.
pub const DELAY_ALERT_THRESHOLD: usize = 3;

const ALERT_KIND: &str = "3_delays";
const ALERT_SUBTYPE: &str = "accumulated";

/// Evaluate the threshold for `employee_id` in the month of `date` and
/// notify the roster owner and their supervisor if it has been reached.
pub async fn on_delay_marked(pool: &SqlitePool, employee_id: i64, date: &str) -> RepoResult<()> {
    let (year, month) =
        time::year_month_of(date).map_err(|e| RepoError::Validation(e.to_string()))?;

    let delays = attendance::delays_in_month(pool, employee_id, &time::month_pattern(year, month)).await?;
    if delays.len() < DELAY_ALERT_THRESHOLD {
        return Ok(());
    }

    let Some(owner_id) = roster::owner_of(pool, employee_id).await? else {
        debug!(employee_id, "Delay threshold reached for unassigned employee, no alert");
        return Ok(());
    };
    let supervisor_id = match user::find_by_id(pool, owner_id).await? {
        Some(owner) => owner.supervisor_id,
        None => None,
    };

    let employee_name = employee::find_by_id(pool, employee_id)
        .await?
        .map(|e| e.full_name)
        .unwrap_or_else(|| format!("Employee #{employee_id}"));

    let details = AlertDetails {
        kind: ALERT_KIND.to_string(),
        subtype: ALERT_SUBTYPE.to_string(),
        employee_name,
        month: time::month_name_es(month).to_string(),
        year: year as i64,
        count: delays.len(),
        latest_date: delays.last().map(|d| d.date.clone()).unwrap_or_default(),
        delays: delays
            .iter()
            .map(|d| DelayEntry {
                date: d.date.clone(),
                comment: d.comment.clone(),
            })
            .collect(),
    };

    let mut recipients = vec![owner_id];
    if let Some(supervisor_id) = supervisor_id {
        if supervisor_id != owner_id {
            recipients.push(supervisor_id);
        }
    }
    for recipient in recipients {
        let inserted =
            alert::insert_if_absent(pool, recipient, employee_id, month, year, &details).await?;
        if inserted {
            info!(
                recipient,
                employee_id,
                month,
                year,
                count = details.count,
                "Created accumulated delay alert"
            );
        }
    }

    Ok(())
}
