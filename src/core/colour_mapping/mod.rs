pub mod gradient;
pub mod nightmare;
pub mod palette;
pub mod theme;
