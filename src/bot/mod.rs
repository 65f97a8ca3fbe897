//! Fishing bot core: the cast cycle and everything it drives

pub mod action_gate;
pub mod context;
pub mod cycle;
pub mod loot;
pub mod motion;
pub mod scheduler;
pub mod state;
pub mod tracker;

pub use action_gate::ActionGate;
pub use context::{BotContext, Collaborators};
pub use cycle::FishingBot;
pub use loot::{LootHandler, LootReport};
pub use motion::{curve_path, jitter, MotionPlanner};
pub use scheduler::Scheduled;
pub use state::{RuntimeState, Status};
pub use tracker::BobberTracker;
