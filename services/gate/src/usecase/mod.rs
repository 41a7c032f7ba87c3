pub mod gate;
pub mod recovery;
pub mod resolve;
pub mod rotate;
