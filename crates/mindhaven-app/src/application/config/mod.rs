mod engagement;

pub use engagement::EngagementConfig;
