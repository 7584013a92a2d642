//! Parking Lot Semaphore Simulation Library
//!
//! A producer/consumer teaching simulation: cars enter and leave a parking
//! structure through a single gate guarded by `mutex`, `empty` and `full`
//! semaphores. The engine runs headless and is driven through commands.

pub mod simulation;
