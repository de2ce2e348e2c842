pub mod bounds;
pub mod distributions;
pub mod frame;
pub mod interval;
pub mod point;
pub mod quaternion;
pub mod vec;
