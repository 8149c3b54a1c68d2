#![cfg(not(target_arch = "wasm32"))]

pub mod integration;
pub mod network;
