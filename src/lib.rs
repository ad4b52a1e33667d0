//! # Expedition package
//!
//! This package contains the blueprints to let holders of "general" non-fungibles send their generals on timed expeditions, after which a fungible reward can be claimed.
//!
//! A general on an expedition stays in its owner's account. The expedition is a record of when it left, and the owner proves ownership with a proof of the general whenever starting or completing one.
//!
//! This works through a number of components:
//!
//! - **ExpeditionController component**: The public surface. Starts and completes expeditions in all-or-nothing batches, enforces ownership and timing, hands out rewards and emits events. The administrator can open / close it and change the expedition duration.
//! - **ExpeditionRegistry component**: Owned by the controller. Holds the configuration (open / closed, expedition duration) and the expedition status of every general.
//! - **RewardLedger component**: Issues the reward token. Only components on its allow-list can get rewards credited, so a controller has to be allowed by the administrator before expeditions can be completed.
//!
//! The guards deciding whether a batch is accepted live in the `rules` module, the ways a call can be refused in the `error` module.

pub mod controller;
pub mod error;
pub mod registry;
pub mod reward_ledger;
pub mod rules;
