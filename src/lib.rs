pub mod averager;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod noise;
pub mod poller;
pub mod render;
pub mod selector;
pub mod state;
