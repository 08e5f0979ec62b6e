pub mod downloads;
pub mod history;
pub mod playlist;
pub mod state;
