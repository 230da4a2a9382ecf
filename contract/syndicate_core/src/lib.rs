#![no_std]

pub mod claims;
pub mod emergency;
pub mod events;
pub mod governance;
pub mod interfaces;
pub mod ledger;
pub mod settlement;
pub mod storage_types;
pub mod utils;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
