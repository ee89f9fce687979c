pub mod abi;
pub mod calls;
