pub mod completion;
pub mod context;
pub mod delay;
pub mod effect;
pub mod message;
pub mod parallel;
pub mod sequence;
pub mod shape;
pub mod vector;
