pub mod export;
pub mod resource;
pub mod sprint;
pub mod team;
