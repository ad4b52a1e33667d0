//! # Expedition rules
//!
//! The guards of the expedition state machine, kept free of ledger access so every call can be
//! judged as a whole before anything is written. A batch either yields the full list of generals
//! to act on, or the first error met while walking the ids in the given order.

use crate::error::ExpeditionError;
use crate::registry::ExpeditionStatus;
use scrypto::prelude::*;

/// Checks a batch of expedition starts.
///
/// ## INPUT
/// - `is_open`: whether the registry currently accepts new expeditions
/// - `general_ids`: the generals to send out, in the order given by the caller
/// - `owns`: whether the caller proved ownership of a general
/// - `status_of`: the current status of a general
///
/// ## OUTPUT
/// - the generals that depart, or the reason the whole batch is refused
///
/// ## LOGIC
/// - the registry must be open
/// - the batch must not be empty
/// - every general must be owned by the caller and idle, a general listed twice counts as already departed
pub fn plan_departures<O, S>(
    is_open: bool,
    general_ids: &[u64],
    owns: O,
    status_of: S,
) -> Result<Vec<u64>, ExpeditionError>
where
    O: Fn(u64) -> bool,
    S: Fn(u64) -> ExpeditionStatus,
{
    if !is_open {
        return Err(ExpeditionError::ContractClosed);
    }
    if general_ids.is_empty() {
        return Err(ExpeditionError::EmptyBatch);
    }

    let mut departing: Vec<u64> = Vec::with_capacity(general_ids.len());
    for &general_id in general_ids {
        if !owns(general_id) {
            return Err(ExpeditionError::NotOwner);
        }
        if !status_of(general_id).is_idle() || departing.contains(&general_id) {
            return Err(ExpeditionError::AlreadyOnExpedition);
        }
        departing.push(general_id);
    }

    Ok(departing)
}

/// Checks a batch of expedition completions.
///
/// ## INPUT
/// - `general_ids`: the generals to bring back, in the order given by the caller
/// - `now`: the single clock reading used for the whole call
/// - `expedition_duration`: the current expedition duration in seconds
/// - `owns`: whether the caller proved ownership of a general
/// - `status_of`: the current status of a general
///
/// ## OUTPUT
/// - the generals that return, or the reason the whole batch is refused
///
/// ## LOGIC
/// - the batch must not be empty
/// - every general must be owned by the caller and on an expedition, a general listed twice counts as already returned
/// - every expedition must have lasted at least the expedition duration
pub fn plan_returns<O, S>(
    general_ids: &[u64],
    now: Instant,
    expedition_duration: i64,
    owns: O,
    status_of: S,
) -> Result<Vec<u64>, ExpeditionError>
where
    O: Fn(u64) -> bool,
    S: Fn(u64) -> ExpeditionStatus,
{
    if general_ids.is_empty() {
        return Err(ExpeditionError::EmptyBatch);
    }

    let mut returning: Vec<u64> = Vec::with_capacity(general_ids.len());
    for &general_id in general_ids {
        if !owns(general_id) {
            return Err(ExpeditionError::NotOwner);
        }
        let start_time = match status_of(general_id) {
            ExpeditionStatus::OnExpedition(start_time) if !returning.contains(&general_id) => {
                start_time
            }
            _ => return Err(ExpeditionError::NotOnExpedition),
        };
        if !has_finished(start_time, now, expedition_duration) {
            return Err(ExpeditionError::ExpeditionNotFinished);
        }
        returning.push(general_id);
    }

    Ok(returning)
}

/// Whether an expedition started at `start_time` has lasted `expedition_duration` seconds at `now`.
pub fn has_finished(start_time: Instant, now: Instant, expedition_duration: i64) -> bool {
    now.seconds_since_unix_epoch
        .saturating_sub(start_time.seconds_since_unix_epoch)
        >= expedition_duration
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000;

    fn everything_owned(_: u64) -> bool {
        true
    }

    fn all_idle(_: u64) -> ExpeditionStatus {
        ExpeditionStatus::Idle
    }

    fn out_since(start: i64) -> impl Fn(u64) -> ExpeditionStatus {
        move |_| ExpeditionStatus::OnExpedition(Instant::new(start))
    }

    #[test]
    fn departures_keep_caller_order() {
        let departing = plan_departures(true, &[3, 1, 2], everything_owned, all_idle);
        assert_eq!(departing, Ok(vec![3, 1, 2]));
    }

    #[test]
    fn departures_refused_while_closed() {
        let departing = plan_departures(false, &[0], everything_owned, all_idle);
        assert_eq!(departing, Err(ExpeditionError::ContractClosed));
    }

    #[test]
    fn closed_is_reported_before_ownership() {
        let departing = plan_departures(false, &[0], |_| false, all_idle);
        assert_eq!(departing, Err(ExpeditionError::ContractClosed));
    }

    #[test]
    fn departures_need_every_general_owned() {
        let departing = plan_departures(true, &[0, 1, 2, 3], |id| id != 1, all_idle);
        assert_eq!(departing, Err(ExpeditionError::NotOwner));
    }

    #[test]
    fn departure_of_active_general_fails_the_batch() {
        let status_of = |id: u64| {
            if id == 2 {
                ExpeditionStatus::OnExpedition(Instant::new(T))
            } else {
                ExpeditionStatus::Idle
            }
        };
        let departing = plan_departures(true, &[1, 2], everything_owned, status_of);
        assert_eq!(departing, Err(ExpeditionError::AlreadyOnExpedition));
    }

    #[test]
    fn general_listed_twice_departs_once() {
        let departing = plan_departures(true, &[4, 4], everything_owned, all_idle);
        assert_eq!(departing, Err(ExpeditionError::AlreadyOnExpedition));
    }

    #[test]
    fn empty_batches_are_refused() {
        assert_eq!(
            plan_departures(true, &[], everything_owned, all_idle),
            Err(ExpeditionError::EmptyBatch)
        );
        assert_eq!(
            plan_returns(&[], Instant::new(T), 60, everything_owned, out_since(T)),
            Err(ExpeditionError::EmptyBatch)
        );
    }

    #[test]
    fn returns_wait_for_the_full_duration() {
        let early = plan_returns(&[0], Instant::new(T + 59), 60, everything_owned, out_since(T));
        assert_eq!(early, Err(ExpeditionError::ExpeditionNotFinished));

        let on_time = plan_returns(&[0], Instant::new(T + 60), 60, everything_owned, out_since(T));
        assert_eq!(on_time, Ok(vec![0]));
    }

    #[test]
    fn zero_duration_returns_immediately() {
        let returning = plan_returns(&[0], Instant::new(T), 0, everything_owned, out_since(T));
        assert_eq!(returning, Ok(vec![0]));
    }

    #[test]
    fn return_of_idle_general_fails() {
        let returning = plan_returns(&[0], Instant::new(T), 0, everything_owned, all_idle);
        assert_eq!(returning, Err(ExpeditionError::NotOnExpedition));
    }

    #[test]
    fn general_listed_twice_returns_once() {
        let returning = plan_returns(&[5, 5], Instant::new(T), 0, everything_owned, out_since(T));
        assert_eq!(returning, Err(ExpeditionError::NotOnExpedition));
    }

    #[test]
    fn returns_need_every_general_owned() {
        let returning = plan_returns(&[0, 1], Instant::new(T + 60), 60, |id| id == 0, out_since(T));
        assert_eq!(returning, Err(ExpeditionError::NotOwner));
    }

    #[test]
    fn expedition_started_at_epoch_zero_is_still_active() {
        let status_of = |_| ExpeditionStatus::OnExpedition(Instant::new(0));
        let departing = plan_departures(true, &[0], everything_owned, status_of);
        assert_eq!(departing, Err(ExpeditionError::AlreadyOnExpedition));

        let returning = plan_returns(&[0], Instant::new(60), 60, everything_owned, status_of);
        assert_eq!(returning, Ok(vec![0]));
    }

    #[test]
    fn clock_behind_start_never_finishes() {
        assert!(!has_finished(Instant::new(T), Instant::new(T - 10), 0));
    }
}
