//! Frame-driven runtime: the animation session, frame cadence and hosts.

pub(crate) mod animation_session;
pub(crate) mod host;
pub(crate) mod scheduler;
