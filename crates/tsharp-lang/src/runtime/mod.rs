pub mod value;
pub mod environment;
pub mod objects;
pub mod output;
pub mod binops;
pub mod interpreter;
