//! # Expedition Registry Blueprint
//!
//! Blueprint used to instantiate an ExpeditionRegistry component, which holds the expedition configuration and the expedition status of every general.
//!
//! The registry does not judge anything itself. It is owned by an ExpeditionController component, which is the only one able to change it, while anyone can read it.
//! Statuses are stored explicitly as `Idle` or `OnExpedition(start_time)`, a general without a stored status is idle.

use crate::error::ExpeditionError;
use scrypto::prelude::*;

/// Expedition status of a single general.
#[derive(ScryptoSbor, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpeditionStatus {
    Idle,
    OnExpedition(Instant),
}

impl ExpeditionStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ExpeditionStatus::Idle)
    }

    pub fn start_time(&self) -> Option<Instant> {
        match self {
            ExpeditionStatus::Idle => None,
            ExpeditionStatus::OnExpedition(start_time) => Some(*start_time),
        }
    }
}

#[blueprint]
#[types(u64, ExpeditionStatus)]
mod registry {
    enable_method_auth! {
        methods {
            get_expedition_duration => PUBLIC;
            is_open => PUBLIC;
            get_start_time => PUBLIC;
            get_status => PUBLIC;
            get_active_expeditions => PUBLIC;
            set_expedition_duration => restrict_to: [OWNER];
            toggle_open => restrict_to: [OWNER];
            set_start_time => restrict_to: [OWNER];
        }
    }

    /// ExpeditionRegistry component, storing configuration and expedition statuses.
    struct ExpeditionRegistry {
        /// Seconds a general has to be on an expedition before it can be completed.
        expedition_duration: i64,
        /// Whether new expeditions can be started.
        open: bool,
        /// KVS storing the status of every general currently on an expedition, indexed by general id.
        expeditions: KeyValueStore<u64, ExpeditionStatus>,
        /// Number of generals currently on an expedition.
        active_expeditions: u64,
    }

    impl ExpeditionRegistry {
        /// Instantiates a new ExpeditionRegistry component.
        ///
        /// # Input
        /// - `controller`: Address of the controller component that will own the registry
        /// - `expedition_duration`: Initial expedition duration in seconds
        ///
        /// # Output
        /// - `Global<ExpeditionRegistry>`: The newly instantiated ExpeditionRegistry component
        ///
        /// # Logic
        /// - Instantiates an open registry without any expeditions, owned by the controller component
        pub fn instantiate_registry(
            controller: ComponentAddress,
            expedition_duration: i64,
        ) -> Global<ExpeditionRegistry> {
            assert!(
                expedition_duration >= 0,
                "{}",
                ExpeditionError::NegativeDuration
            );

            Self {
                expedition_duration,
                open: true,
                expeditions: ExpeditionRegistryKeyValueStore::new_with_registered_type(),
                active_expeditions: 0,
            }
            .instantiate()
            .prepare_to_globalize(OwnerRole::Fixed(rule!(require(global_caller(controller)))))
            .globalize()
        }

        pub fn get_expedition_duration(&self) -> i64 {
            self.expedition_duration
        }

        pub fn set_expedition_duration(&mut self, expedition_duration: i64) {
            assert!(
                expedition_duration >= 0,
                "{}",
                ExpeditionError::NegativeDuration
            );
            self.expedition_duration = expedition_duration;
        }

        pub fn is_open(&self) -> bool {
            self.open
        }

        pub fn toggle_open(&mut self) {
            self.open = !self.open;
        }

        pub fn get_start_time(&self, general_id: u64) -> Option<Instant> {
            self.get_status(general_id).start_time()
        }

        pub fn get_status(&self, general_id: u64) -> ExpeditionStatus {
            self.expeditions
                .get(&general_id)
                .map(|status| *status)
                .unwrap_or(ExpeditionStatus::Idle)
        }

        pub fn get_active_expeditions(&self) -> u64 {
            self.active_expeditions
        }

        /// Sets or clears the start time of a general.
        ///
        /// # Input
        /// - `general_id`: ID of the general
        /// - `start_time`: Start of the general's expedition, or `None` to mark it idle
        ///
        /// # Logic
        /// - Stores the general as on an expedition since `start_time`, or removes its status
        /// - Keeps the active expedition counter in line with the transition
        pub fn set_start_time(&mut self, general_id: u64, start_time: Option<Instant>) {
            let was_active = !self.get_status(general_id).is_idle();

            match start_time {
                Some(start_time) => {
                    self.expeditions
                        .insert(general_id, ExpeditionStatus::OnExpedition(start_time));
                    if !was_active {
                        self.active_expeditions += 1;
                    }
                }
                None => {
                    self.expeditions.remove(&general_id);
                    if was_active {
                        self.active_expeditions -= 1;
                    }
                }
            }
        }
    }
}
