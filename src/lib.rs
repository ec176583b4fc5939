pub mod agent;
pub mod game;
