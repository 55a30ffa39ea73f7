pub mod cert;
pub mod ciphers;
#[cfg(feature = "cli")]
pub mod cli;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod probe;
pub mod protocol;
pub mod records;
pub mod scan;
pub mod scanner;
pub mod starttls;
pub mod util;
pub mod vuln;
