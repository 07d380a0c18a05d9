use chrono::{Local, NaiveDate};
use log::debug;
use shared::{ProtocolProgress, WeeklySummary};
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::analytics::{self, local_date};
use crate::error::StoreResult;
use crate::storage::memory::{CheckInRepository, FlareRepository, MemoryConnection, PetRepository, ProtocolRepository};
use crate::storage::traits::{CheckInStorage, FlareStorage, PetStorage, ProtocolStorage};

/// Read-only views computed from the store on every call.
///
/// Everything scoped to a pet uses the currently active pet and yields the
/// empty value when no pet is active.
#[derive(Clone)]
pub struct AnalyticsService {
    pet_repository: PetRepository,
    check_in_repository: CheckInRepository,
    flare_repository: FlareRepository,
    protocol_repository: ProtocolRepository,
    weekly_window_days: u32,
}

impl AnalyticsService {
    pub fn new(connection: Arc<MemoryConnection>, config: &TrackerConfig) -> Self {
        Self {
            pet_repository: PetRepository::new(connection.clone()),
            check_in_repository: CheckInRepository::new(connection.clone()),
            flare_repository: FlareRepository::new(connection.clone()),
            protocol_repository: ProtocolRepository::new(connection),
            weekly_window_days: config.weekly_window_days,
        }
    }

    /// Streak for the active pet, using the device's local date
    pub fn current_streak(&self) -> StoreResult<u32> {
        self.current_streak_on(Local::now().date_naive())
    }

    pub fn current_streak_on(&self, today: NaiveDate) -> StoreResult<u32> {
        let dates = self.active_check_in_dates()?;
        let streak = analytics::calculate_streak(dates.into_iter().map(|(date, _)| date), today);
        debug!("Current streak on {}: {}", today, streak);
        Ok(streak)
    }

    pub fn has_checked_in_today(&self) -> StoreResult<bool> {
        self.has_checked_in_on(Local::now().date_naive())
    }

    pub fn has_checked_in_on(&self, today: NaiveDate) -> StoreResult<bool> {
        Ok(self.active_check_in_dates()?.iter().any(|(date, _)| *date == today))
    }

    pub fn weekly_summary(&self, today: NaiveDate) -> StoreResult<WeeklySummary> {
        let check_ins = self.active_check_in_dates()?;
        let flare_dates: Vec<NaiveDate> = match self.pet_repository.get_active_pet()? {
            Some(pet) => self
                .flare_repository
                .list_flares(&pet.id)?
                .iter()
                .map(|flare| local_date(&flare.date))
                .collect(),
            None => Vec::new(),
        };

        Ok(analytics::weekly_summary(&check_ins, &flare_dates, today, self.weekly_window_days))
    }

    /// Progress of the running protocol, if one is running
    pub fn protocol_progress(&self) -> StoreResult<Option<ProtocolProgress>> {
        Ok(self
            .protocol_repository
            .get_protocol()?
            .as_ref()
            .map(analytics::protocol_progress))
    }

    fn active_check_in_dates(&self) -> StoreResult<Vec<(NaiveDate, u8)>> {
        let Some(pet) = self.pet_repository.get_active_pet()? else {
            return Ok(Vec::new());
        };
        Ok(self
            .check_in_repository
            .list_check_ins(&pet.id)?
            .iter()
            .map(|check_in| (local_date(&check_in.date), check_in.itch_level))
            .collect())
    }
}
