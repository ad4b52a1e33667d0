//! # Reward Ledger Blueprint
//!
//! Blueprint used to instantiate a RewardLedger component, the issuer of the fungible expedition reward.
//!
//! Only the ledger component itself can mint the reward resource. Other components get rewards by calling `credit`, which is open to callers on the ledger's allow-list only.
//! The administrator maintains this allow-list, so an ExpeditionController has to be allowed before any of its expeditions can be completed.

use scrypto::prelude::*;

#[blueprint]
#[types(ComponentAddress, bool)]
mod reward_ledger {
    enable_method_auth! {
        methods {
            credit => PUBLIC;
            is_allowed => PUBLIC;
            get_reward_address => PUBLIC;
            get_total_credited => PUBLIC;
            add_allowed => restrict_to: [OWNER];
            remove_allowed => restrict_to: [OWNER];
        }
    }

    struct RewardLedger {
        /// resource manager of the reward token
        reward_manager: ResourceManager,
        /// components allowed to credit rewards
        allowed: KeyValueStore<ComponentAddress, bool>,
        /// total amount of rewards ever credited
        total_credited: Decimal,
    }

    impl RewardLedger {
        /// this function instantiates the reward ledger component
        ///
        /// ## INPUT
        /// - `admin_badge_address`: the address of the admin badge, which will be the owner of the ledger and the reward token
        /// - `name`: the name of the reward token
        /// - `symbol`: the symbol of the reward token
        ///
        /// ## OUTPUT
        /// - the reward ledger component
        /// - the address of the reward token
        ///
        /// ## LOGIC
        /// - the reward token is created, mintable by the ledger component only
        /// - the ledger component is instantiated with an empty allow-list
        pub fn instantiate_reward_ledger(
            admin_badge_address: ResourceAddress,
            name: String,
            symbol: String,
        ) -> (Global<RewardLedger>, ResourceAddress) {
            let (address_reservation, component_address) =
                Runtime::allocate_component_address(RewardLedger::blueprint_id());

            let reward_address: ResourceAddress =
                ResourceBuilder::new_fungible(OwnerRole::Fixed(rule!(require(admin_badge_address))))
                    .divisibility(DIVISIBILITY_MAXIMUM)
                    .metadata(metadata!(
                        init {
                            "name" => name, updatable;
                            "symbol" => symbol, updatable;
                            "description" => "Reward for generals returning from an expedition.", updatable;
                        }
                    ))
                    .mint_roles(mint_roles!(
                        minter => rule!(require(global_caller(component_address)));
                        minter_updater => rule!(deny_all);
                    ))
                    .create_with_no_initial_supply()
                    .address();

            let ledger = Self {
                reward_manager: ResourceManager::from(reward_address),
                allowed: RewardLedgerKeyValueStore::new_with_registered_type(),
                total_credited: dec!(0),
            }
            .instantiate()
            .prepare_to_globalize(OwnerRole::Fixed(rule!(require(admin_badge_address))))
            .with_address(address_reservation)
            .globalize();

            (ledger, reward_address)
        }

        /// This method mints rewards for an allowed caller
        ///
        /// ## INPUT
        /// - `caller`: the address of the calling component
        /// - `amount`: the amount of rewards to mint
        ///
        /// ## OUTPUT
        /// - the minted rewards
        ///
        /// ## LOGIC
        /// - the method checks the caller is on the allow-list
        /// - the method checks the caller actually is the component calling
        /// - the method mints the rewards and records them
        pub fn credit(&mut self, caller: ComponentAddress, amount: Decimal) -> Bucket {
            assert!(
                self.is_allowed(caller),
                "Caller is not allowed to credit rewards."
            );
            Runtime::assert_access_rule(rule!(require(global_caller(caller))));
            assert!(amount > dec!(0), "Credited amount must be positive.");

            self.total_credited += amount;
            debug!("Crediting {} reward to {:?}", amount, caller);

            self.reward_manager.mint(amount)
        }

        pub fn is_allowed(&self, component: ComponentAddress) -> bool {
            self.allowed
                .get(&component)
                .map(|allowed| *allowed)
                .unwrap_or(false)
        }

        pub fn get_reward_address(&self) -> ResourceAddress {
            self.reward_manager.address()
        }

        pub fn get_total_credited(&self) -> Decimal {
            self.total_credited
        }

        //===================================================================
        //                          ADMIN METHODS
        //===================================================================

        /// Method allows a component to credit rewards
        pub fn add_allowed(&mut self, component: ComponentAddress) {
            self.allowed.insert(component, true);
            info!("Component {:?} allowed to credit rewards", component);
        }

        /// Method stops a component from crediting rewards
        pub fn remove_allowed(&mut self, component: ComponentAddress) {
            self.allowed.remove(&component);
            info!("Component {:?} no longer allowed to credit rewards", component);
        }
    }
}
