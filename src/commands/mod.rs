pub mod extract;
pub mod report;
pub mod roster;
pub mod theme;
