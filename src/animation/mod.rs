pub mod ease;
pub mod latch;
