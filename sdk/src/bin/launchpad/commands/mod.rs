pub mod launch;
pub mod utils;
pub mod wallet;
