pub mod keys;
pub mod run;
