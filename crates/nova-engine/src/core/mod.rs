pub mod collision;
pub mod engine;
pub mod events;
pub mod game_loop;
pub mod objects;
pub mod rng;
pub mod scaling;
pub mod scene;
pub mod time;
