//! # Expedition Controller Blueprint
//!
//! Blueprint used to instantiate an ExpeditionController component, through which generals are sent on and brought back from expeditions.
//!
//! A general is any non-fungible of the generals resource the controller is instantiated with. Owning a general means being able to present a proof of it.
//! Expeditions are started and completed in batches, and each batch is all-or-nothing: every general in it is checked before a single status is written.
//! On completion, the generals are marked idle again before the reward ledger is asked for the rewards, which are returned to the caller.
//!
//! The controller owns an ExpeditionRegistry component storing all configuration and expedition statuses. The administrator, holder of the admin badge, can open / close the controller and change the expedition duration through the controller.

use crate::error::ExpeditionError;
use crate::registry::registry::*;
use crate::registry::ExpeditionStatus;
use crate::reward_ledger::reward_ledger::*;
use crate::rules::{plan_departures, plan_returns};
use scrypto::prelude::*;

/// Reward units credited for every general that returns from an expedition.
pub const REWARD_PER_EXPEDITION: i64 = 100;

/// Emitted for every general that starts an expedition.
#[derive(ScryptoSbor, ScryptoEvent)]
pub struct ExpeditionStarted {
    pub general_id: u64,
    pub generals_resource: ResourceAddress,
    pub start_time: Instant,
}

/// Emitted for every general that completes an expedition.
#[derive(ScryptoSbor, ScryptoEvent)]
pub struct ExpeditionCompleted {
    pub general_id: u64,
    pub generals_resource: ResourceAddress,
    pub reward_amount: Decimal,
    pub completion_time: Instant,
}

#[blueprint]
#[events(ExpeditionStarted, ExpeditionCompleted)]
mod expedition_controller {
    enable_method_auth! {
        methods {
            start_expedition => PUBLIC;
            start_expeditions => PUBLIC;
            complete_expedition => PUBLIC;
            complete_expeditions => PUBLIC;
            is_open => PUBLIC;
            get_expedition_duration => PUBLIC;
            get_start_time => PUBLIC;
            get_status => PUBLIC;
            get_active_expeditions => PUBLIC;
            get_generals_address => PUBLIC;
            get_reward_ledger_address => PUBLIC;
            get_reward_address => PUBLIC;
            get_reward_per_expedition => PUBLIC;
            toggle_open => restrict_to: [OWNER];
            set_expedition_duration => restrict_to: [OWNER];
        }
    }

    struct ExpeditionController {
        /// The registry holding configuration and expedition statuses, owned by this component.
        registry: Global<ExpeditionRegistry>,
        /// The ledger crediting expedition rewards. This component has to be on its allow-list.
        reward_ledger: Global<RewardLedger>,
        /// Address of the generals resource, proofs of which prove ownership of a general.
        generals_address: ResourceAddress,
        /// Reward credited per returning general.
        reward_per_expedition: Decimal,
        /// Address of this component, used to identify itself to the reward ledger.
        component_address: ComponentAddress,
    }

    impl ExpeditionController {
        /// Instantiates a new ExpeditionController component.
        ///
        /// # Input
        /// - `admin_badge_address`: Address of the admin badge, which will be the owner of the controller.
        /// - `reward_ledger_address`: Address of the RewardLedger component crediting rewards.
        /// - `generals_address`: Address of the generals resource.
        /// - `expedition_duration`: Initial expedition duration in seconds.
        ///
        /// # Output
        /// - The ExpeditionController component
        ///
        /// # Logic
        /// - Reserve the controller's address
        /// - Instantiate an ExpeditionRegistry owned by that address
        /// - Instantiate the controller, owned by the admin badge
        pub fn instantiate_expedition_controller(
            admin_badge_address: ResourceAddress,
            reward_ledger_address: ComponentAddress,
            generals_address: ResourceAddress,
            expedition_duration: i64,
        ) -> Global<ExpeditionController> {
            let (address_reservation, component_address) =
                Runtime::allocate_component_address(ExpeditionController::blueprint_id());

            let registry: Global<ExpeditionRegistry> =
                ExpeditionRegistry::instantiate_registry(component_address, expedition_duration);

            info!(
                "Expedition controller instantiated with an expedition duration of {} seconds",
                expedition_duration
            );

            Self {
                registry,
                reward_ledger: Global::<RewardLedger>::from(reward_ledger_address),
                generals_address,
                reward_per_expedition: Decimal::from(REWARD_PER_EXPEDITION),
                component_address,
            }
            .instantiate()
            .prepare_to_globalize(OwnerRole::Fixed(rule!(require(admin_badge_address))))
            .with_address(address_reservation)
            .globalize()
        }

        /// Sends a single general on an expedition. See `start_expeditions`.
        pub fn start_expedition(&mut self, generals: NonFungibleProof, general_id: u64) {
            self.start_expeditions(generals, vec![general_id]);
        }

        /// Sends generals on an expedition.
        ///
        /// # Input
        /// - `generals`: Proof of the caller's generals
        /// - `general_ids`: IDs of the generals to send out
        ///
        /// # Output
        /// - None
        ///
        /// # Logic
        /// - Checks the controller is open
        /// - Checks every general is held by the caller and idle, failing the whole batch otherwise
        /// - Records the current time as start time of every general
        /// - Emits an ExpeditionStarted event per general
        pub fn start_expeditions(&mut self, generals: NonFungibleProof, general_ids: Vec<u64>) {
            let now: Instant = Clock::current_time_rounded_to_seconds();
            let held: IndexSet<NonFungibleLocalId> = self.held_generals(generals);

            let departing = plan_departures(
                self.registry.is_open(),
                &general_ids,
                |general_id| held.contains(&NonFungibleLocalId::integer(general_id)),
                |general_id| self.registry.get_status(general_id),
            )
            .unwrap_or_else(|error| panic!("{}", error));

            for general_id in departing {
                self.registry.set_start_time(general_id, Some(now));
                Runtime::emit_event(ExpeditionStarted {
                    general_id,
                    generals_resource: self.generals_address,
                    start_time: now,
                });
                info!("General {} started an expedition", general_id);
            }
        }

        /// Brings a single general back from an expedition. See `complete_expeditions`.
        pub fn complete_expedition(&mut self, generals: NonFungibleProof, general_id: u64) -> Bucket {
            self.complete_expeditions(generals, vec![general_id])
        }

        /// Brings generals back from their expeditions and hands out the rewards.
        ///
        /// # Input
        /// - `generals`: Proof of the caller's generals
        /// - `general_ids`: IDs of the generals to bring back
        ///
        /// # Output
        /// - The rewards for all returning generals
        ///
        /// # Logic
        /// - Checks every general is held by the caller, on an expedition, and has been so for at least the expedition duration, failing the whole batch otherwise
        /// - Checks the controller is allowed to credit rewards
        /// - Marks every general idle
        /// - Gets the rewards from the reward ledger
        /// - Emits an ExpeditionCompleted event per general
        pub fn complete_expeditions(
            &mut self,
            generals: NonFungibleProof,
            general_ids: Vec<u64>,
        ) -> Bucket {
            let now: Instant = Clock::current_time_rounded_to_seconds();
            let held: IndexSet<NonFungibleLocalId> = self.held_generals(generals);

            let returning = plan_returns(
                &general_ids,
                now,
                self.registry.get_expedition_duration(),
                |general_id| held.contains(&NonFungibleLocalId::integer(general_id)),
                |general_id| self.registry.get_status(general_id),
            )
            .unwrap_or_else(|error| panic!("{}", error));

            assert!(
                self.reward_ledger.is_allowed(self.component_address),
                "{}",
                ExpeditionError::RewardLedgerRejected
            );

            for &general_id in &returning {
                self.registry.set_start_time(general_id, None);
            }

            let total_reward: Decimal =
                self.reward_per_expedition * Decimal::from(returning.len() as u64);
            let rewards: Bucket = self
                .reward_ledger
                .credit(self.component_address, total_reward);

            for general_id in returning {
                Runtime::emit_event(ExpeditionCompleted {
                    general_id,
                    generals_resource: self.generals_address,
                    reward_amount: self.reward_per_expedition,
                    completion_time: now,
                });
                info!("General {} completed an expedition", general_id);
            }

            rewards
        }

        pub fn is_open(&self) -> bool {
            self.registry.is_open()
        }

        pub fn get_expedition_duration(&self) -> i64 {
            self.registry.get_expedition_duration()
        }

        pub fn get_start_time(&self, general_id: u64) -> Option<Instant> {
            self.registry.get_start_time(general_id)
        }

        pub fn get_status(&self, general_id: u64) -> ExpeditionStatus {
            self.registry.get_status(general_id)
        }

        pub fn get_active_expeditions(&self) -> u64 {
            self.registry.get_active_expeditions()
        }

        pub fn get_generals_address(&self) -> ResourceAddress {
            self.generals_address
        }

        pub fn get_reward_ledger_address(&self) -> ComponentAddress {
            self.reward_ledger.address()
        }

        pub fn get_reward_address(&self) -> ResourceAddress {
            self.reward_ledger.get_reward_address()
        }

        pub fn get_reward_per_expedition(&self) -> Decimal {
            self.reward_per_expedition
        }

        //===================================================================
        //                          ADMIN METHODS
        //===================================================================

        /// Method opens the controller if closed, and closes it if open. Running expeditions are not affected.
        pub fn toggle_open(&mut self) {
            self.registry.toggle_open();
            info!("Expeditions open: {}", self.registry.is_open());
        }

        /// Method sets the expedition duration in seconds, also for running expeditions
        pub fn set_expedition_duration(&mut self, expedition_duration: i64) {
            self.registry.set_expedition_duration(expedition_duration);
            info!("Expedition duration set to {} seconds", expedition_duration);
        }

        //===================================================================
        //                          HELPER METHODS
        //===================================================================

        /// This method checks a proof is of the generals resource and returns the generals in it
        fn held_generals(&self, generals: NonFungibleProof) -> IndexSet<NonFungibleLocalId> {
            generals
                .check_with_message(self.generals_address, ExpeditionError::NotOwner.message())
                .non_fungible_local_ids()
        }
    }
}
