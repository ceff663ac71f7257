pub mod actors;
pub mod driver;
pub mod event;
pub mod shared;
pub mod step;
pub mod world;
