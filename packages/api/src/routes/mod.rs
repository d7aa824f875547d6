pub mod auth;
pub mod challenges;
pub mod connections;
pub mod games;
pub mod health;
pub mod matches;
pub mod players;
pub mod profile;
