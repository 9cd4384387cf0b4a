pub mod signal_policy;

pub use signal_policy::{
    Signal, SignalDecision, SignalParams, SignalPolicyInput, SignalReason, signal_policy_decision,
};
