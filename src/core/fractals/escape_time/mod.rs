pub mod algorithm;
pub mod evaluate;
