pub use interference::*;
pub use quality::*;
pub use rssi::*;
pub use throughput::*;


pub mod interference;
pub mod quality;
pub mod rssi;
pub mod throughput;
